//! Tile grid: one quadtree per surface tile on a regular grid.
//!
//! A single tile's LOD range table only usefully addresses a limited area,
//! so a larger world is covered by laying out `(world / surface)^2`
//! independent tiles around the world origin. Tiles share the heightfield
//! by reference and never interact with each other.

use std::sync::Arc;

use glam::Vec3;
use web_time::Instant;

use crate::constants::{
  DEFAULT_GRID_SIZE, DEFAULT_MIN_LOD_DISTANCE, DEFAULT_SURFACE_SIZE, DEFAULT_WORLD_SIZE,
};
use crate::error::TerrainError;
use crate::heightfield::{HeightField, TexelMapping};
use crate::metrics::SelectionMetrics;
use crate::quadtree::{QuadTree, Selection};
use crate::view::FrameView;

/// Terrain layout configuration.
#[derive(Clone, Copy, Debug)]
pub struct TerrainConfig {
  /// Edge length of the whole terrain in world units.
  pub world_size: f32,
  /// Edge length of one tile; must evenly divide `world_size`.
  pub surface_size: f32,
  /// Tessellation density of the unit patch mesh, consumed by the
  /// renderer. Carried here so one struct describes the terrain.
  pub grid_size: u32,
  /// Base of the geometric LOD range progression.
  pub min_lod_distance: f32,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      world_size: DEFAULT_WORLD_SIZE,
      surface_size: DEFAULT_SURFACE_SIZE,
      grid_size: DEFAULT_GRID_SIZE,
      min_lod_distance: DEFAULT_MIN_LOD_DISTANCE,
    }
  }
}

impl TerrainConfig {
  /// Tiles per grid side.
  pub fn tiles_per_side(&self) -> Result<usize, TerrainError> {
    if self.surface_size <= 0.0
      || self.world_size < self.surface_size
      || self.world_size % self.surface_size != 0.0
    {
      return Err(TerrainError::WorldNotTileable {
        world_size: self.world_size,
        surface_size: self.surface_size,
      });
    }
    Ok((self.world_size / self.surface_size) as usize)
  }
}

/// All tiles of one terrain, with per-frame selection across them.
pub struct TileGrid {
  trees: Vec<QuadTree>,
  tiles_per_side: usize,
  metrics: SelectionMetrics,
}

impl TileGrid {
  /// Lay out the tile grid centered at the world origin.
  ///
  /// An empty heightfield is accepted and produces flat tiles; the caller
  /// is expected to log that condition.
  pub fn new(config: &TerrainConfig, heightfield: Arc<HeightField>) -> Result<Self, TerrainError> {
    let tiles_per_side = config.tiles_per_side()?;
    if heightfield.is_empty() {
      log::warn!("terrain: no heightfield data, building flat tiles");
    }
    let mapping = TexelMapping::centered(&heightfield, config.world_size);

    let half_span = (tiles_per_side as f32 - 1.0) * 0.5;
    let mut trees = Vec::with_capacity(tiles_per_side * tiles_per_side);
    for row in 0..tiles_per_side {
      for col in 0..tiles_per_side {
        let origin = Vec3::new(
          (col as f32 - half_span) * config.surface_size,
          0.0,
          (row as f32 - half_span) * config.surface_size,
        );
        trees.push(QuadTree::new(
          config.surface_size,
          config.surface_size,
          origin,
          Arc::clone(&heightfield),
          mapping,
          config.min_lod_distance,
        ));
      }
    }

    log::info!(
      "terrain: {n}x{n} tiles of {s} units, {d} LOD levels per tile",
      n = tiles_per_side,
      s = config.surface_size,
      d = trees[0].num_lods(),
    );

    Ok(Self {
      trees,
      tiles_per_side,
      metrics: SelectionMetrics::default(),
    })
  }

  /// Assign heights to every tile on the calling thread.
  pub fn compute_heights(&mut self) {
    for tree in &mut self.trees {
      tree.compute_heights();
    }
  }

  /// Dispatch one background height build per tile.
  pub fn spawn_height_builds(&mut self) {
    for tree in &mut self.trees {
      tree.spawn_height_build();
    }
  }

  /// Poll all in-flight height builds; true once every tile is ready.
  pub fn poll_height_builds(&mut self) -> bool {
    let mut all_ready = true;
    for tree in &mut self.trees {
      all_ready &= tree.poll_height_build();
    }
    all_ready
  }

  /// Run selection for one view across every tile.
  ///
  /// Clears `out`, then accumulates each tile's selection in tile order
  /// (row-major from the -X/-Z corner).
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
  pub fn select(&mut self, view: &FrameView, out: &mut Selection) {
    let start = Instant::now();
    out.clear();
    for tree in &self.trees {
      tree.select_into(view, out);
    }
    self
      .metrics
      .record_selection(out, start.elapsed().as_micros() as u64);
  }

  /// Tiles in layout order.
  #[inline]
  pub fn trees(&self) -> &[QuadTree] {
    &self.trees
  }

  #[inline]
  pub fn tiles_per_side(&self) -> usize {
    self.tiles_per_side
  }

  #[inline]
  pub fn tile_count(&self) -> usize {
    self.trees.len()
  }

  /// Selection statistics for the most recent frames.
  #[inline]
  pub fn metrics(&self) -> &SelectionMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "tiling_test.rs"]
mod tiling_test;
