//! Per-frame LOD selection.
//!
//! The world around the viewer is partitioned into concentric rings, one
//! per LOD level; a node is drawn at its own level unless the viewer is
//! inside the next finer ring, in which case it refines into its children.
//! A child that falls outside its own ring is absorbed by the parent so
//! every point of the tile footprint ends up covered exactly once.

use glam::Vec3;

use crate::quadtree::node::{Node, NodeId};
use crate::quadtree::tree::QuadTree;
use crate::view::{Aabb, FrameView};

/// One node chosen for drawing this frame.
///
/// A detached snapshot rather than a handle: selections from several tiles
/// are merged into one list, and the instance builder only needs the box.
#[derive(Clone, Copy, Debug)]
pub struct SelectedNode {
  /// World-space box center (Y is the normalized height mid-point).
  pub center: Vec3,
  /// Full box size (`half_extents * 2`).
  pub size: Vec3,
  /// LOD level this node is drawn at; 0 is finest.
  pub lod_level: u8,
}

/// Selection output for one frame, reused across frames.
///
/// Cleared and refilled by the caller each pass; both lists keep their
/// allocation between frames.
#[derive(Default)]
pub struct Selection {
  selected: Vec<SelectedNode>,
  culled: Vec<Aabb>,
}

impl Selection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Drop both lists' contents, keeping capacity.
  pub fn clear(&mut self) {
    self.selected.clear();
    self.culled.clear();
  }

  /// Nodes to draw, in selection order (tile by tile, coarse to fine).
  #[inline]
  pub fn selected(&self) -> &[SelectedNode] {
    &self.selected
  }

  /// World boxes rejected by the frustum, for debug wireframes.
  #[inline]
  pub fn culled(&self) -> &[Aabb] {
    &self.culled
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.selected.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.selected.is_empty()
  }

  fn push(&mut self, node: &Node, lod_level: usize) {
    self.selected.push(SelectedNode {
      center: node.center,
      size: node.size(),
      lod_level: lod_level as u8,
    });
  }
}

impl QuadTree {
  /// Run selection for one view, appending into `out`.
  ///
  /// `out` is not cleared here; the tiling layer clears once and then
  /// accumulates every tile into the same list. Callers selecting a single
  /// tree clear it themselves.
  ///
  /// Known simplification: adjacent nodes selected at different levels can
  /// disagree on edge heights. Nothing here stitches or morphs between
  /// levels.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
  pub fn select_into(&self, view: &FrameView, out: &mut Selection) {
    self.select_node(NodeId::ROOT, self.num_lods(), view, out);
  }

  /// Recursive per-node decision.
  ///
  /// Returns `false` only on range rejection, which tells the parent to
  /// draw this child's footprint itself. A frustum-rejected node returns
  /// `true`: it was handled (recorded as culled) and the parent must not
  /// re-select its area.
  fn select_node(&self, id: NodeId, lod_level: usize, view: &FrameView, out: &mut Selection) -> bool {
    let node = self.node(id);

    let range = self.lod_ranges()[lod_level];
    if !node.is_within_range(view.origin, range * range) {
      return false;
    }

    let world_aabb = self.node_world_aabb(node, view);
    if !view.frustum.intersects_aabb(&world_aabb) {
      out.culled.push(world_aabb);
      return true;
    }

    if lod_level == 0 {
      out.push(node, 0);
      return true;
    }

    let Some(children) = self.children(id) else {
      // Subdivision ran out before the range table did.
      out.push(node, lod_level);
      return true;
    };

    let finer = self.lod_ranges()[lod_level - 1];
    if !node.is_within_range(view.origin, finer * finer) {
      out.push(node, lod_level);
      return true;
    }

    for child in children {
      if !self.select_node(child, lod_level - 1, view, out) {
        // Child out of its own ring: cover its footprint at this level.
        out.push(self.node(child), lod_level);
      }
    }
    true
  }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;
