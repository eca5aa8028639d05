use glam::Vec2;

use super::*;

fn gradient_field(width: u32, height: u32) -> HeightField {
  // Sample value grows left to right, one step per texel.
  let samples: Vec<u8> = (0..height)
    .flat_map(|_| (0..width).map(|x| (x * 255 / (width - 1).max(1)) as u8))
    .collect();
  HeightField::new(width, height, samples).unwrap()
}

#[test]
fn test_new_rejects_size_mismatch() {
  let result = HeightField::new(4, 4, vec![0u8; 15]);
  assert!(matches!(
    result,
    Err(crate::TerrainError::SampleSizeMismatch { expected: 16, actual: 15, .. })
  ));
}

#[test]
fn test_empty_buffer_is_legal() {
  let hf = HeightField::new(4, 4, Vec::new()).unwrap();
  assert!(hf.is_empty());
  assert_eq!(hf.sample(2, 2), 0);
  assert_eq!(hf.min_max_normalized(0, 0, 4, 4), (0.0, 0.0));
}

#[test]
fn test_sample_clamps_to_bounds() {
  let hf = gradient_field(8, 8);
  // Far out of range clamps to the last column/row instead of faulting.
  assert_eq!(hf.sample(1000, 1000), hf.sample(7, 7));
}

#[test]
fn test_min_max_over_full_grid() {
  let hf = gradient_field(16, 4);
  let (min, max) = hf.min_max_normalized(0, 0, 16, 4);
  assert_eq!(min, 0.0);
  assert_eq!(max, 1.0);
}

#[test]
fn test_min_max_over_sub_rect() {
  let hf = gradient_field(16, 4);
  // Columns 4..8 only.
  let (min, max) = hf.min_max_normalized(4, 0, 8, 4);
  assert!(min > 0.0, "sub-rect should not see the leftmost column");
  assert!(max < 1.0, "sub-rect should not see the rightmost column");
  assert!(min < max);
}

#[test]
fn test_min_max_rect_clamped_to_grid() {
  let hf = gradient_field(8, 8);
  // A rect far past the grid clamps instead of faulting; the overlap with
  // the grid is what gets scanned.
  let (min, max) = hf.min_max_normalized(-100, -100, 100, 100);
  assert_eq!((min, max), hf.min_max_normalized(0, 0, 8, 8));
}

#[test]
fn test_min_max_degenerate_rect() {
  let hf = gradient_field(8, 8);
  assert_eq!(hf.min_max_normalized(3, 3, 3, 3), (0.0, 0.0));
  assert_eq!(hf.min_max_normalized(5, 5, 3, 3), (0.0, 0.0));
}

#[test]
fn test_min_max_flat_footprint_has_zero_range() {
  let hf = HeightField::new(4, 4, vec![128u8; 16]).unwrap();
  let (min, max) = hf.min_max_normalized(0, 0, 4, 4);
  assert_eq!(min, max);
  assert!((max - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_png_roundtrip() {
  // Encode a tiny gradient as PNG, then ingest it back.
  let src = image::GrayImage::from_fn(8, 8, |x, _| image::Luma([(x * 32) as u8]));
  let mut bytes = Vec::new();
  src
    .write_to(
      &mut std::io::Cursor::new(&mut bytes),
      image::ImageFormat::Png,
    )
    .unwrap();

  let hf = HeightField::from_png_bytes(&bytes).unwrap();
  assert_eq!(hf.width(), 8);
  assert_eq!(hf.height(), 8);
  assert_eq!(hf.sample(0, 0), 0);
  assert_eq!(hf.sample(7, 0), 7 * 32);
}

#[test]
fn test_png_garbage_is_an_error() {
  let result = HeightField::from_png_bytes(&[0u8; 16]);
  assert!(matches!(
    result,
    Err(crate::TerrainError::HeightmapDecode(_))
  ));
}

#[test]
fn test_texel_mapping_centered() {
  let hf = gradient_field(64, 64);
  let mapping = TexelMapping::centered(&hf, 128.0);

  // World origin maps to the grid center.
  let (x0, y0, x1, y1) = mapping.texel_rect(Vec2::ZERO, Vec2::ZERO);
  assert_eq!((x0, y0), (32, 32));
  assert_eq!((x1, y1), (32, 32));

  // The whole world footprint covers the whole grid.
  let (x0, y0, x1, y1) = mapping.texel_rect(Vec2::splat(-64.0), Vec2::splat(64.0));
  assert_eq!((x0, y0, x1, y1), (0, 0, 64, 64));
}

#[test]
fn test_texel_mapping_conservative_rounding() {
  let hf = gradient_field(64, 64);
  let mapping = TexelMapping::centered(&hf, 128.0);

  // A footprint that only partially covers texels still includes them.
  let (x0, y0, x1, y1) = mapping.texel_rect(Vec2::new(-0.5, -0.5), Vec2::new(0.5, 0.5));
  assert!(x0 <= 31 && y0 <= 31);
  assert!(x1 >= 33 && y1 >= 33);
}
