//! Region polygonizer: regular cells plus transition strips.
//!
//! # Overview
//!
//! Each region is meshed on its own grid of `cells_per_axis³` cells at a
//! stride of `size / cells_per_axis`. Every cell with mixed corner signs
//! gets a small triangulated patch whose vertices sit on the sign-changing
//! edges. Patches of neighboring cells meet edge to edge, so the surface is
//! closed inside the region.
//!
//! Where a region borders a finer one, the two grids disagree along the
//! shared face. The coarser region adds a transition strip on that face:
//! cells that sample the fine lattice on one side and the coarse lattice
//! on the other, stitching both meshes without cracks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  INPUT                                                       │
//! │   density: DensityField   - pure lattice → i8               │
//! │   key: RegionKey          - origin and size                  │
//! │   config: MeshConfig      - cells per axis, transition faces │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  REGULAR SWEEP (z, y, x)                                     │
//! │   8 corner samples → 8-bit case → class triangulation        │
//! │   per edge: reuse cached vertex or locate crossing           │
//! │   (bisect coarse edges, fixed-point lerp, blended normal)    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TRANSITION STRIPS (one per flagged face, j, i)              │
//! │   9 fine samples → 9-bit case → class (+ inverted flag)      │
//! │   fine-side vertices match the finer neighbor exactly        │
//! │   coarse-side vertices match this region's boundary cells    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  OUTPUT: MeshOutput                                          │
//! │   vertices (region-local), indices, displaced positions      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Crack-free seams
//!
//! Vertices on a face shared by two regions are computed from the same
//! lattice samples in the same order by both sides, and positions are
//! formed in 8-bit fixed point relative to the region origin. Both regions
//! therefore place them at bit-identical world positions.

pub mod cache;
pub mod case_code;
pub mod gradient;
pub mod interpolate;
mod regular;
pub mod tables;
mod transition;

pub use transition::FaceBasis;

use glam::{IVec3, Vec3};
use tracing::{debug, trace};

use crate::constants::log2_pow2;
use crate::density::DensityField;
use crate::error::ConfigError;
use crate::octree::{RegionKey, TransitionFaces};
use crate::types::{MeshConfig, MeshOutput};

/// Sampling grid of one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionGrid {
  pub origin: IVec3,
  /// Lattice units per cell.
  pub stride: i32,
  pub cells: i32,
  pub faces: TransitionFaces,
}

impl RegionGrid {
  /// Fails when `config` does not validate for a region of `key.size`.
  pub fn try_new(key: RegionKey, config: &MeshConfig) -> Result<Self, ConfigError> {
    config.validate_for(key.size)?;
    let cells = config.cells_per_axis;
    Ok(Self {
      origin: key.position,
      stride: key.size / cells,
      cells,
      faces: config.transition_faces,
    })
  }

  /// # Panics
  /// If `config` does not validate for a region of `key.size`.
  pub fn new(key: RegionKey, config: &MeshConfig) -> Self {
    match Self::try_new(key, config) {
      Ok(grid) => grid,
      Err(err) => panic!("invalid mesh config: {err}"),
    }
  }

  /// Bisection rounds that bring one cell edge down to a unit step.
  #[inline]
  pub fn refine_steps(&self) -> u32 {
    log2_pow2(self.stride)
  }

  /// Secondary position of a regular or coarse-side vertex.
  #[inline]
  pub fn displaced(&self, position: Vec3, normal: Vec3) -> Vec3 {
    gradient::displaced_position(position, normal, self.stride, self.cells, self.faces)
  }
}

/// Polygonize one region, including a transition strip on every face in
/// `config.transition_faces`.
///
/// Positions are relative to `key.position`. Triangles wind
/// counter-clockwise seen from the outside (positive density).
///
/// # Panics
/// If `config` does not validate for `key.size`; see
/// [`try_polygonize_region`].
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "transvoxel::polygonize_region"))]
pub fn polygonize_region<D: DensityField + ?Sized>(density: &D, key: RegionKey, config: &MeshConfig) -> MeshOutput {
  let mut out = MeshOutput::new();
  polygonize_region_into(density, key, config, &mut out);
  out
}

/// Like [`polygonize_region`], rejecting an invalid `config` instead of
/// panicking.
pub fn try_polygonize_region<D: DensityField + ?Sized>(
  density: &D,
  key: RegionKey,
  config: &MeshConfig,
) -> Result<MeshOutput, ConfigError> {
  config.validate_for(key.size)?;
  Ok(polygonize_region(density, key, config))
}

/// Like [`polygonize_region`], reusing `out`'s allocations.
pub fn polygonize_region_into<D: DensityField + ?Sized>(
  density: &D,
  key: RegionKey,
  config: &MeshConfig,
  out: &mut MeshOutput,
) {
  out.clear();
  let grid = RegionGrid::new(key, config);
  regular::polygonize_cells(density, &grid, out);
  let regular_triangles = out.triangle_count();

  for face in grid.faces.iter() {
    if grid.stride < 2 {
      debug!(?key, ?face, "region at unit stride cannot carry a transition strip");
      continue;
    }
    transition::polygonize_face(density, &grid, face, out);
  }

  trace!(
    ?key,
    vertices = out.vertices.len(),
    regular_triangles,
    transition_triangles = out.triangle_count() - regular_triangles,
    "region polygonized"
  );
}
