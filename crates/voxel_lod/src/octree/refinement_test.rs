use std::collections::{BTreeMap, HashSet};

use super::*;

// =============================================================================
// Helpers
// =============================================================================

fn config_with_factor(factor: f64) -> LodConfig {
  LodConfig::new()
    .with_min_region_size(16)
    .with_top_level_size(256)
    .with_subdivision_factor(factor)
}

fn run(viewpoint: IVec3, radius: i32, config: &LodConfig) -> Vec<RegionKey> {
  refine(RefinementInput {
    viewpoint,
    radius,
    config,
  })
}

/// No duplicates, no region nested in another, and the volume adds up to
/// the covered top-level grid.
fn assert_partition(terminals: &[RegionKey], viewpoint: IVec3, radius: i32, config: &LodConfig) {
  let set: HashSet<RegionKey> = terminals.iter().copied().collect();
  assert_eq!(set.len(), terminals.len(), "duplicate terminal regions");

  for key in terminals {
    let mut size = key.size * 2;
    while size <= config.top_level_size {
      let parent = RegionKey::containing(key.position, size);
      assert!(
        !set.contains(&parent),
        "{:?} overlaps terminal ancestor {:?}",
        key,
        parent
      );
      size *= 2;
    }
  }

  let tops = IAabb3::around(viewpoint, radius).covering_regions(config.top_level_size);
  let expected: i64 = tops.len() as i64 * (config.top_level_size as i64).pow(3);
  let actual: i64 = terminals.iter().map(|k| (k.size as i64).pow(3)).sum();
  assert_eq!(actual, expected, "terminal regions must tile the top-level grid");
}

// =============================================================================
// Reference scenario: viewpoint (0,0,0), radius 512, min 16, top 256
// =============================================================================

/// Larger regions only appear farther away, for several K values.
#[test]
fn test_sizes_increase_with_distance() {
  for factor in [2.0, 2.5, 3.0] {
    let config = config_with_factor(factor);
    let terminals = run(IVec3::ZERO, 512, &config);
    assert_partition(&terminals, IVec3::ZERO, 512, &config);

    let mut nearest_by_size: BTreeMap<i32, f64> = BTreeMap::new();
    for key in &terminals {
      assert!(key.is_aligned(), "{:?} not aligned", key);
      assert!(key.size >= config.min_region_size);
      assert!(key.size <= config.top_level_size);

      let distance = key.distance_to(IVec3::ZERO);
      if key.size > config.min_region_size {
        assert!(
          distance >= config.get_threshold(key.size),
          "K={}: {:?} at distance {} should have been split",
          factor,
          key,
          distance
        );
      }
      let nearest = nearest_by_size.entry(key.size).or_insert(f64::MAX);
      *nearest = nearest.min(distance);
    }

    let classes: Vec<(i32, f64)> = nearest_by_size.into_iter().collect();
    assert!(classes.len() >= 3, "K={}: expected several LOD classes", factor);
    for pair in classes.windows(2) {
      assert!(
        pair[0].1 <= pair[1].1,
        "K={}: size {} nearest at {} but size {} nearest at {}",
        factor,
        pair[0].0,
        pair[0].1,
        pair[1].0,
        pair[1].1
      );
    }
  }
}

/// Finest regions stay inside the cube their parents' threshold implies.
#[test]
fn test_finest_regions_stay_near_viewpoint() {
  for factor in [2.0, 3.0] {
    let config = config_with_factor(factor);
    let terminals = run(IVec3::ZERO, 512, &config);
    let limit = config.get_threshold(2 * config.min_region_size) + config.min_region_size as f64 / 2.0;

    let finest: Vec<_> = terminals
      .iter()
      .filter(|k| k.size == config.min_region_size)
      .collect();
    assert!(!finest.is_empty());
    for key in finest {
      let offset = key.center().abs().max_element();
      assert!(
        offset < limit,
        "K={}: finest region {:?} at offset {} beyond {}",
        factor,
        key,
        offset,
        limit
      );
    }
  }
}

// =============================================================================
// Threshold policy
// =============================================================================

/// Equal distance does not subdivide; one unit closer does.
#[test]
fn test_threshold_is_strict() {
  let config = config_with_factor(2.0);
  let key = RegionKey::new(IVec3::ZERO, 32);

  // Center (16,16,16); distance exactly 64 = 32 * 2
  assert!(!should_subdivide(&key, IVec3::new(16, 16, 80), &config));
  assert!(should_subdivide(&key, IVec3::new(16, 16, 79), &config));
}

#[test]
fn test_min_size_never_subdivides() {
  let config = config_with_factor(2.0);
  let key = RegionKey::new(IVec3::ZERO, 16);
  assert!(!should_subdivide(&key, IVec3::splat(8), &config));

  let mut out = Vec::new();
  collect_terminal_regions(key, IVec3::splat(8), &config, &mut out);
  assert_eq!(out, vec![key]);
}

/// Viewpoints far into negative space still yield an aligned partition.
#[test]
fn test_negative_viewpoint_partition() {
  let config = config_with_factor(2.0);
  let viewpoint = IVec3::new(-1000, -5, 300);
  let terminals = run(viewpoint, 300, &config);

  assert_partition(&terminals, viewpoint, 300, &config);
  assert!(terminals.iter().all(|k| k.is_aligned()));
  assert!(terminals
    .iter()
    .any(|k| k.size == 16 && k.contains(viewpoint)));
}

/// Same input, same output order.
#[test]
fn test_refine_is_deterministic() {
  let config = config_with_factor(2.0);
  let a = run(IVec3::new(7, 99, -42), 400, &config);
  let b = run(IVec3::new(7, 99, -42), 400, &config);
  assert_eq!(a, b);
}
