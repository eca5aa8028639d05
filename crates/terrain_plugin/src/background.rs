//! Background height precompute.
//!
//! The task builds a complete, fully-heighted node arena on the rayon pool
//! and hands it back over a one-shot channel. The consumer swaps the whole
//! arena in on receipt, so the render thread never reads a node the worker
//! is still writing.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use web_time::Instant;

use glam::Vec3;

use crate::heightfield::{HeightField, TexelMapping};
use crate::quadtree::node::Node;
use crate::quadtree::tree::{assign_heights, build_nodes};

/// Handle to an in-flight height build.
pub struct HeightBuildTask {
  receiver: Receiver<Vec<Node>>,
}

impl HeightBuildTask {
  /// Take the finished arena if the worker has published it.
  ///
  /// Non-blocking; returns `None` while the build is still running.
  pub fn try_take(&self) -> Option<Vec<Node>> {
    self.receiver.try_recv().ok()
  }
}

/// Spawn a height build for one tile on the rayon pool.
pub(crate) fn spawn(
  heightfield: Arc<HeightField>,
  mapping: TexelMapping,
  width: f32,
  height: f32,
  origin: Vec3,
  num_lods: usize,
) -> HeightBuildTask {
  let (sender, receiver) = bounded(1);
  rayon::spawn(move || {
    let start = Instant::now();
    let mut nodes = build_nodes(width, height, origin, num_lods);
    assign_heights(&mut nodes, &heightfield, &mapping);
    log::debug!(
      "height build for tile at {origin:?}: {} nodes in {}us",
      nodes.len(),
      start.elapsed().as_micros()
    );
    // Receiver dropped means the tile was torn down; the arena is discarded.
    let _ = sender.send(nodes);
  });
  HeightBuildTask { receiver }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_background_build_publishes_complete_arena() {
    let samples: Vec<u8> = (0..64u32 * 64).map(|i| (i % 256) as u8).collect();
    let heightfield = Arc::new(HeightField::new(64, 64, samples).unwrap());
    let mapping = TexelMapping::centered(&heightfield, 64.0);

    let task = spawn(Arc::clone(&heightfield), mapping, 64.0, 64.0, Vec3::ZERO, 3);

    // Poll the way a frame loop would.
    let deadline = Instant::now() + std::time::Duration::from_secs(5);
    let nodes = loop {
      if let Some(nodes) = task.try_take() {
        break nodes;
      }
      assert!(Instant::now() < deadline, "height build never completed");
      std::thread::yield_now();
    };

    assert_eq!(nodes.len(), (4usize.pow(4) - 1) / 3);
    // Heights were assigned, not left flat.
    assert!(nodes[0].half_extents.y > 0.0);
  }

  #[test]
  fn test_second_take_is_empty() {
    let heightfield = Arc::new(HeightField::new(8, 8, vec![7u8; 64]).unwrap());
    let mapping = TexelMapping::centered(&heightfield, 8.0);
    let task = spawn(Arc::clone(&heightfield), mapping, 8.0, 8.0, Vec3::ZERO, 1);

    while task.try_take().is_none() {
      std::thread::yield_now();
    }
    assert!(task.try_take().is_none());
  }
}
