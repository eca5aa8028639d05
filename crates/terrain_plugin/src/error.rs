//! Error type for construction and per-frame capacity violations.

use thiserror::Error;

/// Errors surfaced by terrain construction and instance building.
#[derive(Debug, Error)]
pub enum TerrainError {
  /// Heightfield sample buffer does not match the declared dimensions.
  #[error("heightfield buffer is {actual} bytes, expected {expected} for {width}x{height}")]
  SampleSizeMismatch {
    width: u32,
    height: u32,
    expected: usize,
    actual: usize,
  },

  /// Heightmap image bytes could not be decoded.
  #[error("failed to decode heightmap image")]
  HeightmapDecode(#[from] image::ImageError),

  /// World size is not an integer multiple of the surface tile size.
  #[error("world size {world_size} is not an integer multiple of surface size {surface_size}")]
  WorldNotTileable { world_size: f32, surface_size: f32 },

  /// A selection pass produced more instances than the fixed buffer holds.
  ///
  /// This indicates a misconfiguration of world/surface/LOD sizing, not a
  /// runtime-recoverable condition.
  #[error("selected instances exceed the fixed capacity of {capacity}")]
  InstanceCapacity { capacity: usize },
}
