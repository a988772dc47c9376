//! Edge crossing placement in 8-bit fixed point.
//!
//! Endpoints are always passed lower coordinate first. Every cell that
//! touches an edge, in any region, then evaluates the same samples in the
//! same order and lands on bit-identical positions.

use glam::{I64Vec3, IVec3, Vec3};

use crate::constants::FIXED_ONE;
use crate::density::DensityField;
use crate::types::DensitySample;

/// Fixed-point weight of the first endpoint: `t = (d1 << 8) / (d1 - d0)`.
///
/// `0` places the crossing on the second endpoint, `256` on the first.
/// Equal samples cannot cross; they snap to the second endpoint.
#[inline(always)]
pub fn crossing_fraction(d0: DensitySample, d1: DensitySample) -> i32 {
  let (d0, d1) = (d0 as i32, d1 as i32);
  if d0 == d1 {
    return 0;
  }
  (d1 << 8) / (d1 - d0)
}

/// A located crossing: the refined sub-edge and the fraction along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeCrossing {
  pub q0: IVec3,
  pub q1: IVec3,
  /// Weight of `q0` in 256ths.
  pub t: i32,
}

impl EdgeCrossing {
  /// Position relative to `origin`. Exact as long as the offset stays
  /// below 2^16 lattice units.
  #[inline]
  pub fn local_position(&self, origin: IVec3) -> Vec3 {
    let q0 = (self.q0 - origin).as_i64vec3();
    let q1 = (self.q1 - origin).as_i64vec3();
    let fixed: I64Vec3 = q0 * self.t as i64 + q1 * (FIXED_ONE - self.t) as i64;
    fixed.as_vec3() / FIXED_ONE as f32
  }

  /// Weight of `p0` along the original edge `p0 -> p1`.
  #[inline]
  pub fn weight_of_first(&self, p0: IVec3, p1: IVec3) -> f32 {
    let span = p1 - p0;
    let length = (span.x + span.y + span.z) as f32;
    if length == 0.0 {
      return 0.0;
    }
    let axis = span.signum().abs();
    let along_q0 = ((self.q0 - p0) * axis).element_sum() as f32;
    let along_q1 = ((self.q1 - p0) * axis).element_sum() as f32;
    let t = self.t as f32 / FIXED_ONE as f32;
    let along = along_q0 * t + along_q1 * (1.0 - t);
    1.0 - along / length
  }
}

/// Locate the zero crossing on the axis-aligned edge `p0 -> p1`.
///
/// When the edge spans more than one lattice step, `refine_steps` rounds of
/// midpoint bisection narrow it first; each keeps the half whose endpoints
/// still differ in sign. The final fraction is taken on the refined
/// interval, so large coarse cells still place vertices where the fine
/// lattice crosses.
pub fn locate_crossing<D: DensityField + ?Sized>(
  density: &D,
  p0: IVec3,
  d0: DensitySample,
  p1: IVec3,
  d1: DensitySample,
  refine_steps: u32,
) -> EdgeCrossing {
  let t = crossing_fraction(d0, d1);
  if t == 0 {
    return EdgeCrossing { q0: p1, q1: p1, t: 0 };
  }
  if t == FIXED_ONE {
    return EdgeCrossing { q0: p0, q1: p0, t: FIXED_ONE };
  }

  let (mut q0, mut q1) = (p0, p1);
  let (mut s0, mut s1) = (d0, d1);
  for _ in 0..refine_steps {
    if (q1 - q0).abs().max_element() < 2 {
      break;
    }
    let mid = (q0 + q1) / 2;
    let sm = density.density_at(mid);
    if (s0 < 0) != (sm < 0) {
      q1 = mid;
      s1 = sm;
    } else {
      q0 = mid;
      s0 = sm;
    }
  }

  EdgeCrossing {
    q0,
    q1,
    t: crossing_fraction(s0, s1),
  }
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
