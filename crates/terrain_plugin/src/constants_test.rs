use super::*;

#[test]
fn test_default_world_is_tileable() {
  let tiles = DEFAULT_WORLD_SIZE / DEFAULT_SURFACE_SIZE;
  assert_eq!(
    tiles.fract(),
    0.0,
    "default world size must be an integer multiple of the surface size"
  );
}

#[test]
fn test_max_lods_leaves_room_for_entry_level() {
  // Selection enters at `num_lods`, which is capped at MAX_LODS - 1 so the
  // range table is never indexed out of bounds.
  assert!(MAX_LODS >= 2);
}

#[test]
fn test_instance_capacity_positive() {
  assert!(MAX_INSTANCES > 0);
}
