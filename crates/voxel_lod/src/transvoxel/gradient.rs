//! Normals from the density gradient, and the tangential displacement that
//! makes room for transition strips.

use glam::{IVec3, Vec3};

use crate::density::DensityField;
use crate::octree::{Face, TransitionFaces};

/// Fallback normal for flat or degenerate gradients.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// Central-difference gradient at a lattice point, sampled one lattice step
/// away on each side regardless of the cell stride. Points toward positive
/// density.
#[inline]
pub fn central_difference<D: DensityField + ?Sized>(density: &D, p: IVec3) -> Vec3 {
  let sample = |offset: IVec3| density.density_at(p + offset) as f32;
  Vec3::new(
    sample(IVec3::X) - sample(IVec3::NEG_X),
    sample(IVec3::Y) - sample(IVec3::NEG_Y),
    sample(IVec3::Z) - sample(IVec3::NEG_Z),
  ) * 0.5
}

/// Unit vector, or [`FALLBACK_NORMAL`] when `v` has no usable length.
#[inline]
pub fn normalize_or_fallback(v: Vec3) -> Vec3 {
  let len_sq = v.length_squared();
  if len_sq < 1e-12 || !len_sq.is_finite() {
    return FALLBACK_NORMAL;
  }
  v * len_sq.sqrt().recip()
}

/// Blend endpoint gradients with the crossing's weight of the first
/// endpoint, then normalize.
#[inline]
pub fn blend_normals(g0: Vec3, g1: Vec3, weight_of_first: f32) -> Vec3 {
  normalize_or_fallback(g0 * weight_of_first + g1 * (1.0 - weight_of_first))
}

/// Inward shift for a vertex in a region's boundary cells.
///
/// Per axis, a vertex within one cell of a face that carries a transition
/// strip moves inward by up to a quarter cell, fading linearly to zero one
/// cell in. Faces without a strip contribute nothing.
pub fn boundary_delta(local: Vec3, stride: i32, cells: i32, faces: TransitionFaces) -> Vec3 {
  let width = stride as f32;
  let quarter = width * 0.25;
  let far = width * (cells - 1) as f32;
  let mut delta = Vec3::ZERO;
  for axis in 0..3 {
    let p = local[axis];
    let (neg, pos) = (Face::ALL[2 * axis], Face::ALL[2 * axis + 1]);
    if p < width && faces.contains(neg) {
      delta[axis] = (1.0 - p / width) * quarter;
    } else if p > far && faces.contains(pos) {
      delta[axis] = ((cells - 1) as f32 - p / width) * quarter;
    }
  }
  delta
}

/// Secondary position: `position + (I - n nᵀ) Δ`.
///
/// Only the tangential part of the shift is applied, so the vertex slides
/// along the surface instead of off it.
#[inline]
pub fn displaced_position(
  position: Vec3,
  normal: Vec3,
  stride: i32,
  cells: i32,
  faces: TransitionFaces,
) -> Vec3 {
  if faces.is_empty() {
    return position;
  }
  let delta = boundary_delta(position, stride, cells, faces);
  if delta == Vec3::ZERO {
    return position;
  }
  position + delta - normal * normal.dot(delta)
}

#[cfg(test)]
#[path = "gradient_test.rs"]
mod gradient_test;
