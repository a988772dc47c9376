//! Grid and fixed-point constants shared by the octree and the polygonizer.
//!
//! # Cell Layout
//!
//! A region of size `S` is split into `CELLS_PER_AXIS³` cells sampled at a
//! stride of `S / CELLS_PER_AXIS` lattice units. Corner `i` of a cell sits at
//! offset `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`:
//!
//! ```text
//!        6 -------- 7
//!       /|         /|
//!      4 -------- 5 |        y
//!      | 2 -------|-3        | z
//!      |/         |/         |/
//!      0 -------- 1          +--- x
//! ```

use glam::IVec3;

/// Cells along each axis of a region's local grid.
pub const CELLS_PER_AXIS: i32 = 16;

/// Smallest region edge length, in lattice units.
pub const DEFAULT_MIN_REGION_SIZE: i32 = 16;

/// Edge length of the top-level grid that seeds subdivision.
pub const DEFAULT_TOP_LEVEL_SIZE: i32 = 256;

/// Subdivision distance multiplier `K`: a region splits while its center is
/// closer than `size * K` to the viewpoint.
pub const DEFAULT_SUBDIVISION_FACTOR: f64 = 2.0;

/// Smallest accepted `K`. Below this, face neighbors can differ by more than
/// one LOD and transition strips no longer cover the seam.
pub const MIN_SUBDIVISION_FACTOR: f64 = 2.0;

/// Fixed-point unit for edge crossing fractions (8 fractional bits).
pub const FIXED_ONE: i32 = 256;

/// Corner offsets of a unit cell, indexed by corner number.
pub const CORNER_OFFSETS: [IVec3; 8] = [
  IVec3::new(0, 0, 0), // 0b000
  IVec3::new(1, 0, 0), // 0b001
  IVec3::new(0, 1, 0), // 0b010
  IVec3::new(1, 1, 0), // 0b011
  IVec3::new(0, 0, 1), // 0b100
  IVec3::new(1, 0, 1), // 0b101
  IVec3::new(0, 1, 1), // 0b110
  IVec3::new(1, 1, 1), // 0b111
];

/// Number of fine samples on a transition cell face (3×3).
pub const TRANSITION_FINE_SAMPLES: usize = 9;

/// Total samples in a transition cell stencil (9 fine + 4 coarse).
pub const TRANSITION_SAMPLES: usize = 13;

/// Fine sample aliased by each coarse sample 9..=12.
pub const TRANSITION_COARSE_ALIAS: [usize; 4] = [0, 2, 6, 8];

/// Fine sample feeding each bit of a transition case code.
///
/// Walks the 3×3 face ring counter-clockwise from sample 0, center last.
pub const TRANSITION_CASE_BIT_SAMPLE: [usize; 9] = [0, 1, 2, 5, 8, 7, 6, 3, 4];

/// Fine sample `k` sits at half-step offset `(k % 3, k / 3)` on the face.
#[inline(always)]
pub const fn transition_sample_uv(k: usize) -> (i32, i32) {
  ((k % 3) as i32, (k / 3) as i32)
}

/// Maps any of the 13 transition samples to the fine sample at the same
/// lattice point.
#[inline(always)]
pub const fn transition_fine_sample(k: usize) -> usize {
  if k < TRANSITION_FINE_SAMPLES {
    k
  } else {
    TRANSITION_COARSE_ALIAS[k - TRANSITION_FINE_SAMPLES]
  }
}

/// Integer log2 for positive powers of two.
#[inline(always)]
pub const fn log2_pow2(value: i32) -> u32 {
  value.trailing_zeros()
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
