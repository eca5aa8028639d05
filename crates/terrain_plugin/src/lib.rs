//! terrain_plugin - Framework/engine independent terrain LOD selection
//!
//! This crate turns a heightfield into per-frame GPU instancing work: each
//! surface tile carries a fixed-depth quadtree, and every frame a
//! distance- and frustum-aware recursive pass picks the coarsest set of
//! nodes that covers the visible terrain with no gaps and no overlap. The
//! selected nodes become a packed instance-transform buffer consumed by a
//! single instanced draw of a unit patch mesh.
//!
//! # Features
//!
//! - **Discrete LOD selection**: concentric distance rings with geometric
//!   range progression, refined toward the viewer
//! - **Frustum culling**: conservative per-node AABB rejection with a
//!   debug list of culled boxes
//! - **Background height precompute**: per-tile min/max height ranges
//!   built on the rayon pool and published race-free over a channel
//! - **Tiling**: independent quadtrees on a regular grid for worlds
//!   larger than one range table can address
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use glam::Vec3;
//! use terrain_plugin::{
//!   FrameView, HeightField, InstanceBuilder, Selection, TerrainConfig, TileGrid,
//! };
//!
//! let heightfield = Arc::new(HeightField::from_png_bytes(&png_bytes)?);
//! let mut grid = TileGrid::new(&TerrainConfig::default(), heightfield)?;
//! grid.spawn_height_builds();
//!
//! let mut selection = Selection::new();
//! let mut instances = InstanceBuilder::default();
//!
//! // Per frame:
//! grid.poll_height_builds();
//! grid.select(&FrameView { origin, frustum, height_scale }, &mut selection);
//! instances.clear();
//! instances.append(&selection)?;
//! upload(instances.bytes());
//! ```

pub mod constants;
pub mod error;
pub mod heightfield;
pub mod view;

// Re-export commonly used items
pub use constants::{MAX_INSTANCES, MAX_LODS};
pub use error::TerrainError;
pub use heightfield::{HeightField, TexelMapping};
pub use view::{Aabb, FrameView, Frustum};

// Quadtree and the per-frame selection pass
pub mod quadtree;
pub use quadtree::{num_lods_for_tile, Node, NodeId, QuadTree, SelectedNode, Selection};

// Background height precompute on the rayon pool
pub mod background;
pub use background::HeightBuildTask;

// Tile grid covering worlds larger than one tile
pub mod tiling;
pub use tiling::{TerrainConfig, TileGrid};

// Instance buffer building for the renderer
pub mod instancing;
pub use instancing::{InstanceBuilder, InstanceData};

// Engine-agnostic selection statistics
pub mod metrics;
pub use metrics::SelectionMetrics;
