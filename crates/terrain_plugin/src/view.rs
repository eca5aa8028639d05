//! Per-frame view input: camera origin, frustum, and height scale.

use glam::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  /// Minimum corner (inclusive).
  pub min: Vec3,
  /// Maximum corner (inclusive).
  pub max: Vec3,
}

impl Aabb {
  /// Create a new AABB from min and max corners.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create a new AABB from center and half-extents.
  pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }
}

/// View frustum as six inward-facing half-spaces.
///
/// Each plane is `(nx, ny, nz, d)`; a point `p` is inside the half-space
/// when `n·p + d >= 0`.
#[derive(Clone, Debug)]
pub struct Frustum {
  /// Planes: [left, right, bottom, top, near, far].
  pub planes: [Vec4; 6],
}

impl Frustum {
  /// Extract the six planes from a combined view-projection matrix.
  pub fn from_view_proj(vp_matrix: &Mat4) -> Self {
    let m = vp_matrix.transpose();

    let planes = [
      m.w_axis + m.x_axis, // left
      m.w_axis - m.x_axis, // right
      m.w_axis + m.y_axis, // bottom
      m.w_axis - m.y_axis, // top
      m.w_axis + m.z_axis, // near
      m.w_axis - m.z_axis, // far
    ]
    .map(normalize_plane);

    Self { planes }
  }

  /// Frustum that accepts every box.
  ///
  /// Used when height data is absent and for coverage checks that must see
  /// the selection without culling.
  pub fn accept_all() -> Self {
    Self {
      planes: [Vec4::new(0.0, 0.0, 0.0, 1.0); 6],
    }
  }

  /// Conservative AABB test: false only when the box is fully outside one
  /// of the planes (positive-vertex rejection).
  pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
    for plane in &self.planes {
      // Corner of the box farthest along the plane normal.
      let p = Vec3::new(
        if plane.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if plane.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if plane.z >= 0.0 { aabb.max.z } else { aabb.min.z },
      );
      if plane.x * p.x + plane.y * p.y + plane.z * p.z + plane.w < 0.0 {
        return false;
      }
    }
    true
  }
}

fn normalize_plane(plane: Vec4) -> Vec4 {
  let len = Vec3::new(plane.x, plane.y, plane.z).length();
  if len > 0.0 {
    plane / len
  } else {
    plane
  }
}

/// Per-frame view supplied by the renderer, one per logical view.
///
/// A shadow-casting view reuses the same trees with its own origin and
/// frustum.
#[derive(Clone, Debug)]
pub struct FrameView {
  /// Camera origin in world space.
  pub origin: Vec3,
  /// Culling frustum for this view.
  pub frustum: Frustum,
  /// Vertical scale applied to normalized heights at render time.
  pub height_scale: f32,
}

impl FrameView {
  /// View with an all-accepting frustum, for tests and tooling.
  pub fn unculled(origin: Vec3, height_scale: f32) -> Self {
    Self {
      origin,
      frustum: Frustum::accept_all(),
      height_scale,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identity_frustum_accepts_unit_box() {
    let frustum = Frustum::from_view_proj(&Mat4::IDENTITY);
    let aabb = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
    assert!(frustum.intersects_aabb(&aabb));
  }

  #[test]
  fn test_identity_frustum_rejects_distant_box() {
    // The identity clip volume spans [-1, 1]; a box at x = 10 is fully
    // outside the right plane.
    let frustum = Frustum::from_view_proj(&Mat4::IDENTITY);
    let aabb = Aabb::from_center_half_extents(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(0.5));
    assert!(!frustum.intersects_aabb(&aabb));
  }

  #[test]
  fn test_straddling_box_is_kept() {
    let frustum = Frustum::from_view_proj(&Mat4::IDENTITY);
    // Center outside, but one corner reaches into the volume.
    let aabb = Aabb::from_center_half_extents(Vec3::new(1.4, 0.0, 0.0), Vec3::splat(0.5));
    assert!(frustum.intersects_aabb(&aabb));
  }

  #[test]
  fn test_accept_all_accepts_everything() {
    let frustum = Frustum::accept_all();
    let far = Aabb::from_center_half_extents(Vec3::splat(1.0e9), Vec3::splat(1.0));
    assert!(frustum.intersects_aabb(&far));
  }

  #[test]
  fn test_perspective_frustum_behind_camera() {
    let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
    let frustum = Frustum::from_view_proj(&(proj * view));

    let ahead = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::splat(1.0));
    let behind = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(1.0));
    assert!(frustum.intersects_aabb(&ahead));
    assert!(!frustum.intersects_aabb(&behind));
  }
}
