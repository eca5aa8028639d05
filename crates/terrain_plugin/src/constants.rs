//! Compile-time caps and default configuration values.
//!
//! The selection algorithm and the instance buffer are sized by these
//! constants; changing them changes the worst-case per-frame cost, so they
//! live in one place.

/// Maximum depth of the LOD hierarchy and length of the range table.
///
/// A tile subdivides at most `MAX_LODS - 1` times so that the selection
/// entry level (`num_lods`) always indexes a valid range. Selection
/// recursion depth is bounded by this constant.
pub const MAX_LODS: usize = 8;

/// Fixed capacity of the per-frame instance buffer, across all tiles.
///
/// Sized for the default world/surface configuration with headroom; a
/// selection pass that exceeds it is a misconfiguration and surfaces as a
/// deterministic error, never a silent truncation.
pub const MAX_INSTANCES: usize = 4096;

/// Default edge length of the whole terrain, in world units.
pub const DEFAULT_WORLD_SIZE: f32 = 2048.0;

/// Default edge length of one surface tile, in world units.
/// Must evenly divide the world size.
pub const DEFAULT_SURFACE_SIZE: f32 = 512.0;

/// Default tessellation density of the unit patch mesh.
///
/// Consumed by the renderer when building the instanced patch geometry;
/// carried in the config so renderer and core agree on one source.
pub const DEFAULT_GRID_SIZE: u32 = 64;

/// Base of the geometric LOD range progression, in world units.
/// Ring `i` ends at `DEFAULT_MIN_LOD_DISTANCE * 2^i`.
pub const DEFAULT_MIN_LOD_DISTANCE: f32 = 4.0;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
