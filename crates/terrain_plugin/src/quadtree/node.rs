//! Arena node: an axis-aligned box with four index-linked children.
//!
//! Nodes are stored contiguously in the owning tree's arena; a node's four
//! children occupy consecutive slots starting at `first_child`. Leaves
//! carry the sentinel instead.

use glam::{Vec2, Vec3};

/// Sentinel `first_child` value for leaf nodes.
pub(crate) const NO_CHILDREN: u32 = u32::MAX;

/// Opaque handle to a node within one tree's arena.
///
/// Handles are only meaningful against the tree that produced them and are
/// stable for the life of that tree's current arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  /// The root node of any tree.
  pub const ROOT: NodeId = NodeId(0);

  /// Raw arena index.
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// One box of the hierarchy: world-space center and half-extents.
///
/// `center.y` / `half_extents.y` hold the normalized height mid-point and
/// half-range once height data is assigned; both stay 0 for a flat tree.
#[derive(Clone, Copy, Debug)]
pub struct Node {
  pub center: Vec3,
  pub half_extents: Vec3,
  pub(crate) first_child: u32,
}

impl Node {
  pub(crate) fn new(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      center,
      half_extents,
      first_child: NO_CHILDREN,
    }
  }

  /// True for nodes at the maximum subdivision depth.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.first_child == NO_CHILDREN
  }

  /// Full box size (`half_extents * 2`).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.half_extents * 2.0
  }

  /// Minimum XZ corner of the footprint.
  #[inline]
  pub fn min_xz(&self) -> Vec2 {
    Vec2::new(
      self.center.x - self.half_extents.x,
      self.center.z - self.half_extents.z,
    )
  }

  /// Maximum XZ corner of the footprint.
  #[inline]
  pub fn max_xz(&self) -> Vec2 {
    Vec2::new(
      self.center.x + self.half_extents.x,
      self.center.z + self.half_extents.z,
    )
  }

  /// Squared-distance range test against the node footprint.
  ///
  /// Clamps the query point to the box in X and Z and compares the squared
  /// distance to the clamped point against `radius_sq`. Height is excluded:
  /// LOD rings are a strictly horizontal concept. A point inside the
  /// footprint is always within range.
  pub fn is_within_range(&self, query: Vec3, radius_sq: f32) -> bool {
    let min = self.min_xz();
    let max = self.max_xz();
    let dx = query.x - query.x.clamp(min.x, max.x);
    let dz = query.z - query.z.clamp(min.y, max.y);
    dx * dx + dz * dz <= radius_sq
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
