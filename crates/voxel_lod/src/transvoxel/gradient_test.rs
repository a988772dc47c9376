use super::*;
use crate::density::{PlaneField, SphereField};

const EPSILON: f32 = 1e-5;

fn approx(a: Vec3, b: Vec3) -> bool {
  (a - b).abs().max_element() < EPSILON
}

// =============================================================================
// Gradients
// =============================================================================

#[test]
fn test_plane_gradient_points_up() {
  let field = PlaneField::new(0.5);
  let g = central_difference(&field, IVec3::new(3, 0, -7));
  assert!(g.y > 0.0);
  assert_eq!(g.x, 0.0);
  assert_eq!(g.z, 0.0);
  assert!(approx(normalize_or_fallback(g), Vec3::Y));
}

/// Sphere normals point away from the center.
#[test]
fn test_sphere_gradient_points_outward() {
  let field = SphereField::new(6.0);
  for p in [IVec3::new(6, 0, 0), IVec3::new(0, -6, 0), IVec3::new(4, 4, 0)] {
    let n = normalize_or_fallback(central_difference(&field, p));
    assert!(n.dot(p.as_vec3().normalize()) > 0.9, "{p:?} -> {n:?}");
  }
}

#[test]
fn test_flat_field_falls_back() {
  let field = |_: i32, _: i32, _: i32| 5i8;
  let g = central_difference(&field, IVec3::ZERO);
  assert_eq!(g, Vec3::ZERO);
  assert_eq!(normalize_or_fallback(g), FALLBACK_NORMAL);
  assert_eq!(normalize_or_fallback(Vec3::NAN), FALLBACK_NORMAL);
}

#[test]
fn test_blend_normals() {
  assert!(approx(blend_normals(Vec3::X, Vec3::Y, 1.0), Vec3::X));
  assert!(approx(blend_normals(Vec3::X, Vec3::Y, 0.0), Vec3::Y));
  let half = blend_normals(Vec3::X, Vec3::Y, 0.5);
  assert!(approx(half, Vec3::new(1.0, 1.0, 0.0).normalize()));
  // Opposite gradients cancel out.
  assert_eq!(blend_normals(Vec3::X, Vec3::NEG_X, 0.5), FALLBACK_NORMAL);
}

// =============================================================================
// Boundary displacement
// =============================================================================

#[test]
fn test_delta_zero_without_transition_faces() {
  let delta = boundary_delta(Vec3::new(0.0, 0.5, 31.5), 2, 16, TransitionFaces::NONE);
  assert_eq!(delta, Vec3::ZERO);
}

#[test]
fn test_delta_fades_across_boundary_cell() {
  let faces = TransitionFaces::NONE.with(Face::NegX);
  // Stride 4: quarter cell is 1.0.
  assert_eq!(boundary_delta(Vec3::new(0.0, 9.0, 9.0), 4, 16, faces).x, 1.0);
  assert_eq!(boundary_delta(Vec3::new(2.0, 9.0, 9.0), 4, 16, faces).x, 0.5);
  assert_eq!(boundary_delta(Vec3::new(4.0, 9.0, 9.0), 4, 16, faces).x, 0.0);
  assert_eq!(boundary_delta(Vec3::new(30.0, 9.0, 9.0), 4, 16, faces).x, 0.0);
}

#[test]
fn test_delta_positive_face_points_inward() {
  let faces = TransitionFaces::NONE.with(Face::PosY);
  // Region spans 0..64 with stride 4; last cell starts at 60.
  let delta = boundary_delta(Vec3::new(8.0, 64.0, 8.0), 4, 16, faces);
  assert_eq!(delta, Vec3::new(0.0, -1.0, 0.0));
  let delta = boundary_delta(Vec3::new(8.0, 62.0, 8.0), 4, 16, faces);
  assert_eq!(delta, Vec3::new(0.0, -0.5, 0.0));
}

/// Only the tangential part of the shift survives.
#[test]
fn test_displacement_is_tangential() {
  let faces = TransitionFaces::NONE.with(Face::NegX);
  let position = Vec3::new(0.0, 5.0, 5.0);

  // Normal along the shift: nothing moves.
  let moved = displaced_position(position, Vec3::X, 4, 16, faces);
  assert!(approx(moved, position));

  // Normal across the shift: full shift.
  let moved = displaced_position(position, Vec3::Y, 4, 16, faces);
  assert!(approx(moved, Vec3::new(1.0, 5.0, 5.0)));

  // Interior vertices never move.
  let interior = Vec3::new(20.0, 20.0, 20.0);
  assert_eq!(displaced_position(interior, Vec3::Y, 4, 16, faces), interior);
}
