use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::*;

// =========================================================================
// RegionKey identity
// =========================================================================

/// Keys compare by (position, size) only.
#[test]
fn test_key_equality() {
  let a = RegionKey::new(IVec3::new(32, 0, -64), 32);
  let b = RegionKey::new(IVec3::new(32, 0, -64), 32);
  let c = RegionKey::new(IVec3::new(32, 0, -64), 64);

  assert_eq!(a, b);
  assert_ne!(a, c);
}

/// Equal keys must produce equal hashes (HashMap invariant).
#[test]
fn test_key_hash_consistency() {
  let hash = |key: &RegionKey| {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
  };
  let a = RegionKey::new(IVec3::new(16, 16, 16), 16);
  let b = RegionKey::new(IVec3::new(16, 16, 16), 16);

  assert_eq!(hash(&a), hash(&b), "Equal keys must have equal hashes");
}

// =========================================================================
// Alignment
// =========================================================================

/// Floor alignment keeps negative coordinates in the correct cell.
#[test]
fn test_containing_floors_negative_coordinates() {
  let key = RegionKey::containing(IVec3::new(-1, -256, 255), 256);
  assert_eq!(key.position, IVec3::new(-256, -256, 0));
  assert!(key.is_aligned());
  assert!(key.contains(IVec3::new(-1, -256, 255)));
}

#[test]
fn test_unaligned_key_detected() {
  assert!(!RegionKey::new(IVec3::new(8, 0, 0), 16).is_aligned());
  assert!(RegionKey::new(IVec3::new(-32, 16, 0), 16).is_aligned());
}

// =========================================================================
// Hierarchy
// =========================================================================

/// All 8 octants produce aligned half-size children inside the parent.
#[test]
fn test_children_tile_parent() {
  let parent = RegionKey::new(IVec3::new(-256, 0, 256), 256);
  let children = parent.children().expect("256 can be halved");

  for (octant, child) in children.iter().enumerate() {
    assert_eq!(child.size, 128);
    assert!(child.is_aligned(), "octant {} not aligned", octant);
    assert!(parent.contains(child.position));
    assert_eq!(Some(*child), parent.get_child(octant as u8));
    assert_eq!(RegionKey::containing(child.position, 256), parent);
  }

  let unique: std::collections::HashSet<_> = children.iter().collect();
  assert_eq!(unique.len(), 8);
}

#[test]
fn test_unit_region_has_no_children() {
  let unit = RegionKey::new(IVec3::ZERO, 1);
  assert!(unit.get_child(0).is_none());
  assert!(unit.children().is_none());
}

#[test]
fn test_center_and_distance() {
  let key = RegionKey::new(IVec3::new(0, 0, 0), 16);
  assert_eq!(key.center(), DVec3::splat(8.0));
  assert!((key.distance_to(IVec3::new(8, 8, 20)) - 12.0).abs() < 1e-12);
}
