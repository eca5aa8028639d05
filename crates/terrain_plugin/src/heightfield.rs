//! Owned 8-bit heightfield and world-to-texel mapping.
//!
//! The heightfield is ingested once at load time and read-only afterwards,
//! so a single copy can be shared by reference across every tile. An empty
//! sample buffer is a legal state and degrades to flat terrain.

use glam::Vec2;

use crate::error::TerrainError;

/// 2D grid of 8-bit height samples, row-major, single channel.
pub struct HeightField {
  width: u32,
  height: u32,
  samples: Vec<u8>,
}

impl HeightField {
  /// Create a heightfield from raw samples.
  ///
  /// `samples` must hold exactly `width * height` bytes, or be empty for
  /// the "no data" state.
  pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, TerrainError> {
    let expected = width as usize * height as usize;
    if !samples.is_empty() && samples.len() != expected {
      return Err(TerrainError::SampleSizeMismatch {
        width,
        height,
        expected,
        actual: samples.len(),
      });
    }
    Ok(Self {
      width,
      height,
      samples,
    })
  }

  /// Heightfield with no data. Selection treats it as flat terrain.
  pub fn empty() -> Self {
    Self {
      width: 0,
      height: 0,
      samples: Vec::new(),
    }
  }

  /// Decode a PNG heightmap into an 8-bit luma heightfield.
  pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, TerrainError> {
    let img = image::load_from_memory(bytes)?.into_luma8();
    let (width, height) = img.dimensions();
    Self::new(width, height, img.into_raw())
  }

  /// Width in texels.
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Height in texels.
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// True when no sample data is present.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  /// Raw sample at texel coordinates, clamped to the grid bounds.
  ///
  /// Returns 0 for an empty heightfield.
  pub fn sample(&self, x: u32, y: u32) -> u8 {
    if self.samples.is_empty() {
      return 0;
    }
    let x = x.min(self.width - 1) as usize;
    let y = y.min(self.height - 1) as usize;
    self.samples[y * self.width as usize + x]
  }

  /// Normalized min/max height over a texel rectangle.
  ///
  /// The rectangle is half-open (`x0..x1`, `y0..y1`) and clamped to the
  /// grid before scanning, so no out-of-bounds access is reachable. A
  /// degenerate rectangle that covers no texels collapses to `(0.0, 0.0)`
  /// so downstream never builds a negative-size box from floating-point
  /// noise.
  pub fn min_max_normalized(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> (f32, f32) {
    if self.samples.is_empty() {
      return (0.0, 0.0);
    }

    let x0 = x0.clamp(0, self.width as i64) as usize;
    let x1 = x1.clamp(0, self.width as i64) as usize;
    let y0 = y0.clamp(0, self.height as i64) as usize;
    let y1 = y1.clamp(0, self.height as i64) as usize;
    if x0 >= x1 || y0 >= y1 {
      return (0.0, 0.0);
    }

    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for y in y0..y1 {
      let row = &self.samples[y * self.width as usize..(y + 1) * self.width as usize];
      for &v in &row[x0..x1] {
        lo = lo.min(v);
        hi = hi.max(v);
      }
    }

    (lo as f32 / 255.0, hi as f32 / 255.0)
  }
}

/// World-XZ to texel-space mapping for one heightfield.
///
/// `texels_per_unit` scales world units to texels; `texel_origin` is the
/// texel coordinate of world `(0, 0)`, normally the grid center.
#[derive(Clone, Copy, Debug)]
pub struct TexelMapping {
  pub texels_per_unit: Vec2,
  pub texel_origin: Vec2,
}

impl TexelMapping {
  /// Mapping that stretches a heightfield over a `world_size` square
  /// centered at the world origin.
  pub fn centered(heightfield: &HeightField, world_size: f32) -> Self {
    let texels_per_unit = if world_size > 0.0 {
      Vec2::new(
        heightfield.width() as f32 / world_size,
        heightfield.height() as f32 / world_size,
      )
    } else {
      Vec2::ZERO
    };
    Self {
      texels_per_unit,
      texel_origin: Vec2::new(
        heightfield.width() as f32 * 0.5,
        heightfield.height() as f32 * 0.5,
      ),
    }
  }

  /// Convert a world-space XZ rectangle to a covering texel rectangle.
  ///
  /// The result is conservative (floor/ceil) and may extend past the grid;
  /// [`HeightField::min_max_normalized`] clamps before scanning.
  pub fn texel_rect(&self, min_xz: Vec2, max_xz: Vec2) -> (i64, i64, i64, i64) {
    let lo = min_xz * self.texels_per_unit + self.texel_origin;
    let hi = max_xz * self.texels_per_unit + self.texel_origin;
    (
      lo.x.floor() as i64,
      lo.y.floor() as i64,
      hi.x.ceil() as i64,
      hi.y.ceil() as i64,
    )
  }
}

#[cfg(test)]
#[path = "heightfield_test.rs"]
mod heightfield_test;
