use super::*;

#[test]
fn test_default_sizes_are_powers_of_two() {
  assert!((DEFAULT_MIN_REGION_SIZE as u32).is_power_of_two());
  assert!((DEFAULT_TOP_LEVEL_SIZE as u32).is_power_of_two());
  assert!((CELLS_PER_AXIS as u32).is_power_of_two());
  assert_eq!(DEFAULT_MIN_REGION_SIZE % CELLS_PER_AXIS, 0);
}

#[test]
fn test_corner_offsets_match_index_bits() {
  for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
    let expected = IVec3::new((i & 1) as i32, ((i >> 1) & 1) as i32, ((i >> 2) & 1) as i32);
    assert_eq!(*offset, expected, "corner {} offset mismatch", i);
  }
}

#[test]
fn test_transition_aliases_point_at_face_corners() {
  for (i, &fine) in TRANSITION_COARSE_ALIAS.iter().enumerate() {
    let (u, v) = transition_sample_uv(fine);
    assert!(u == 0 || u == 2, "alias {} not on a face corner", i);
    assert!(v == 0 || v == 2, "alias {} not on a face corner", i);
    assert_eq!(transition_fine_sample(TRANSITION_FINE_SAMPLES + i), fine);
  }
}

#[test]
fn test_case_bit_order_covers_every_fine_sample_once() {
  let mut seen = [false; TRANSITION_FINE_SAMPLES];
  for &sample in &TRANSITION_CASE_BIT_SAMPLE {
    assert!(!seen[sample], "sample {} appears twice", sample);
    seen[sample] = true;
  }
  assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_log2_pow2() {
  assert_eq!(log2_pow2(1), 0);
  assert_eq!(log2_pow2(16), 4);
  assert_eq!(log2_pow2(256), 8);
}
