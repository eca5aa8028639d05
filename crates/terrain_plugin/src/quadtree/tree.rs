//! Quadtree construction, LOD range table, and height assignment.
//!
//! The hierarchy is built once at load time: a recursive 4-way split of
//! the tile footprint into a contiguous arena, followed by a top-down
//! height pass that samples the heightfield over every node footprint.
//! Heights can also be computed on a background task; see
//! [`QuadTree::spawn_height_build`].

use std::sync::Arc;

use glam::Vec3;

use crate::background::HeightBuildTask;
use crate::constants::MAX_LODS;
use crate::heightfield::{HeightField, TexelMapping};
use crate::quadtree::node::{Node, NodeId, NO_CHILDREN};
use crate::view::{Aabb, FrameView};

/// Subdivision depth for a tile of the given width in world units.
///
/// `min(MAX_LODS - 1, floor(log2(width)))` - capped so the selection entry
/// level always indexes into the range table.
pub fn num_lods_for_tile(width: f32) -> usize {
  let depth = width.log2().floor().max(0.0) as usize;
  depth.min(MAX_LODS - 1)
}

/// Geometric LOD range progression: `ranges[i] = base * 2^i`.
pub(crate) fn build_lod_ranges(min_lod_distance: f32) -> [f32; MAX_LODS] {
  let mut ranges = [0.0f32; MAX_LODS];
  for (i, range) in ranges.iter_mut().enumerate() {
    *range = min_lod_distance * (1u32 << i) as f32;
  }
  ranges
}

/// Build the node arena for one tile: root plus `num_lods` recursive
/// splits, children stored in four consecutive slots.
///
/// Y is left at zero; height assignment is a separate pass.
pub(crate) fn build_nodes(width: f32, height: f32, origin: Vec3, num_lods: usize) -> Vec<Node> {
  // (4^(d+1) - 1) / 3 nodes for depth d.
  let capacity = (4usize.pow(num_lods as u32 + 1) - 1) / 3;
  let mut nodes = Vec::with_capacity(capacity);
  nodes.push(Node::new(
    origin,
    Vec3::new(width * 0.5, 0.0, height * 0.5),
  ));
  split(&mut nodes, 0, num_lods);
  nodes
}

/// Child quadrant order: (-x,-z), (+x,-z), (-x,+z), (+x,+z).
const QUADRANTS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

fn split(nodes: &mut Vec<Node>, index: usize, remaining: usize) {
  if remaining == 0 {
    return;
  }

  let center = nodes[index].center;
  let half = nodes[index].half_extents;
  let child_half = Vec3::new(half.x * 0.5, 0.0, half.z * 0.5);

  let first = nodes.len() as u32;
  nodes[index].first_child = first;
  for (qx, qz) in QUADRANTS {
    let child_center = Vec3::new(
      center.x + qx * child_half.x,
      0.0,
      center.z + qz * child_half.z,
    );
    nodes.push(Node::new(child_center, child_half));
  }

  for i in 0..4 {
    split(nodes, first as usize + i, remaining - 1);
  }
}

/// Top-down height pass: each node samples min/max over its own footprint.
///
/// `center.y` becomes the mid-point and `half_extents.y` the half-range of
/// the normalized heights covered by the node.
pub(crate) fn assign_heights(nodes: &mut [Node], heightfield: &HeightField, mapping: &TexelMapping) {
  assign_node_height(nodes, 0, heightfield, mapping);
}

fn assign_node_height(
  nodes: &mut [Node],
  index: usize,
  heightfield: &HeightField,
  mapping: &TexelMapping,
) {
  let (x0, y0, x1, y1) = mapping.texel_rect(nodes[index].min_xz(), nodes[index].max_xz());
  let (lo, hi) = heightfield.min_max_normalized(x0, y0, x1, y1);
  nodes[index].center.y = (lo + hi) * 0.5;
  nodes[index].half_extents.y = (hi - lo) * 0.5;

  let first = nodes[index].first_child;
  if first != NO_CHILDREN {
    for i in 0..4 {
      assign_node_height(nodes, first as usize + i, heightfield, mapping);
    }
  }
}

/// Quadtree over one rectangular surface tile.
///
/// Owns the node arena and the LOD range table; shares the heightfield by
/// reference with every other tile. Read-only after construction except
/// for the one-shot height installation.
pub struct QuadTree {
  nodes: Vec<Node>,
  lod_ranges: [f32; MAX_LODS],
  num_lods: usize,
  heightfield: Arc<HeightField>,
  mapping: TexelMapping,
  origin: Vec3,
  height_data_ready: bool,
  pending_heights: Option<HeightBuildTask>,
  tile_width: f32,
  tile_height: f32,
}

impl QuadTree {
  /// Build a flat tree (all heights zero) for a tile footprint.
  ///
  /// Call [`compute_heights`](Self::compute_heights) or
  /// [`spawn_height_build`](Self::spawn_height_build) afterwards to attach
  /// height data.
  pub fn new(
    width: f32,
    height: f32,
    origin: Vec3,
    heightfield: Arc<HeightField>,
    mapping: TexelMapping,
    min_lod_distance: f32,
  ) -> Self {
    let num_lods = num_lods_for_tile(width);
    let nodes = build_nodes(width, height, origin, num_lods);
    Self {
      nodes,
      lod_ranges: build_lod_ranges(min_lod_distance),
      num_lods,
      heightfield,
      mapping,
      origin,
      height_data_ready: false,
      pending_heights: None,
      tile_width: width,
      tile_height: height,
    }
  }

  /// Assign heights synchronously on the calling thread.
  ///
  /// No-op for an empty heightfield: the tree stays flat and selection
  /// falls back to the conservative vertical bound.
  pub fn compute_heights(&mut self) {
    if self.heightfield.is_empty() {
      return;
    }
    assign_heights(&mut self.nodes, &self.heightfield, &self.mapping);
    self.height_data_ready = true;
  }

  /// Build a fully-heighted arena on the rayon pool.
  ///
  /// The background task builds a complete replacement arena and publishes
  /// it over a channel; nothing the render thread reads is ever mutated in
  /// place. Poll with [`poll_height_build`](Self::poll_height_build) once
  /// per frame until installation.
  pub fn spawn_height_build(&mut self) {
    if self.heightfield.is_empty() || self.height_data_ready {
      return;
    }
    self.pending_heights = Some(crate::background::spawn(
      Arc::clone(&self.heightfield),
      self.mapping,
      self.tile_width,
      self.tile_height,
      self.origin,
      self.num_lods,
    ));
  }

  /// Install a finished background build, if any. Returns the ready state.
  pub fn poll_height_build(&mut self) -> bool {
    if let Some(task) = &self.pending_heights {
      if let Some(nodes) = task.try_take() {
        self.nodes = nodes;
        self.height_data_ready = true;
        self.pending_heights = None;
      }
    }
    self.height_data_ready
  }

  /// True once per-node height ranges are installed.
  #[inline]
  pub fn height_data_ready(&self) -> bool {
    self.height_data_ready
  }

  /// Selection entry level; also the subdivision depth of the tree.
  #[inline]
  pub fn num_lods(&self) -> usize {
    self.num_lods
  }

  /// Selection distance thresholds, finest first.
  #[inline]
  pub fn lod_ranges(&self) -> &[f32; MAX_LODS] {
    &self.lod_ranges
  }

  /// World-space tile origin (footprint center).
  #[inline]
  pub fn origin(&self) -> Vec3 {
    self.origin
  }

  /// Resolve a node handle.
  #[inline]
  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  /// The whole arena, root first.
  #[inline]
  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  /// The four children of a node, or `None` for leaves.
  pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
    let first = self.nodes[id.index()].first_child;
    if first == NO_CHILDREN {
      None
    } else {
      Some([
        NodeId(first),
        NodeId(first + 1),
        NodeId(first + 2),
        NodeId(first + 3),
      ])
    }
  }

  /// World AABB used for frustum culling.
  ///
  /// With height data installed the vertical bound is the node's height
  /// range scaled by the view's height scale. Without it, the conservative
  /// stand-in `[0, origin.y]` keeps culling sound for any terrain below
  /// the camera.
  pub(crate) fn node_world_aabb(&self, node: &Node, view: &FrameView) -> Aabb {
    let min_xz = node.min_xz();
    let max_xz = node.max_xz();
    let (y0, y1) = if self.height_data_ready {
      (
        (node.center.y - node.half_extents.y) * view.height_scale,
        (node.center.y + node.half_extents.y) * view.height_scale,
      )
    } else {
      (0.0, view.origin.y)
    };
    Aabb::new(
      Vec3::new(min_xz.x, y0.min(y1), min_xz.y),
      Vec3::new(max_xz.x, y0.max(y1), max_xz.y),
    )
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
