//! Packed GPU instance records for the selected nodes.
//!
//! One record per selected node, written into a fixed-capacity buffer that
//! is uploaded verbatim and consumed by a single instanced draw of the
//! unit patch mesh.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::constants::MAX_INSTANCES;
use crate::error::TerrainError;
use crate::quadtree::{SelectedNode, Selection};

/// One GPU instance record.
///
/// Layout is fixed and shared with the renderer's instance buffer; all
/// fields are plain data so the whole array can be uploaded as bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceData {
  /// Column-major model transform scaling the unit patch onto the node.
  pub transform: [f32; 16],
  /// Geometry group the instance belongs to.
  pub group_index: u32,
  /// First geometry within the group.
  pub geometry_index: u32,
  /// Number of geometries drawn for this instance.
  pub geometry_count: u32,
  pub _pad: u32,
}

impl InstanceData {
  /// Instance record for one selected node.
  ///
  /// The unit patch spans `[-0.5, 0.5]` per axis; scaling by the full node
  /// size and translating to the center maps it onto the node's box.
  pub fn for_node(node: &SelectedNode) -> Self {
    let transform = Mat4::from_scale_rotation_translation(node.size, Quat::IDENTITY, node.center);
    Self {
      transform: transform.to_cols_array(),
      group_index: 0,
      geometry_index: 0,
      geometry_count: 1,
      _pad: 0,
    }
  }

  /// World translation encoded in the transform.
  #[inline]
  pub fn translation(&self) -> Vec3 {
    Vec3::new(self.transform[12], self.transform[13], self.transform[14])
  }
}

/// Fixed-capacity builder for the per-frame instance array.
///
/// The backing allocation is made once and reused every frame; overflow is
/// a configuration error and fails deterministically instead of dropping
/// instances.
pub struct InstanceBuilder {
  instances: Vec<InstanceData>,
  capacity: usize,
}

impl Default for InstanceBuilder {
  fn default() -> Self {
    Self::new(MAX_INSTANCES)
  }
}

impl InstanceBuilder {
  pub fn new(capacity: usize) -> Self {
    Self {
      instances: Vec::with_capacity(capacity),
      capacity,
    }
  }

  /// Drop the previous frame's records, keeping the allocation.
  pub fn clear(&mut self) {
    self.instances.clear();
  }

  /// Append one record per selected node, in selection order.
  ///
  /// Checks capacity before writing anything, so a failed call leaves the
  /// buffer unchanged.
  pub fn append(&mut self, selection: &Selection) -> Result<(), TerrainError> {
    if self.instances.len() + selection.len() > self.capacity {
      return Err(TerrainError::InstanceCapacity {
        capacity: self.capacity,
      });
    }
    self
      .instances
      .extend(selection.selected().iter().map(InstanceData::for_node));
    Ok(())
  }

  /// Records written this frame.
  #[inline]
  pub fn instances(&self) -> &[InstanceData] {
    &self.instances
  }

  /// The instance array as bytes, ready for upload.
  #[inline]
  pub fn bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.instances)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.instances.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.instances.is_empty()
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.capacity
  }
}

#[cfg(test)]
#[path = "instancing_test.rs"]
mod instancing_test;
