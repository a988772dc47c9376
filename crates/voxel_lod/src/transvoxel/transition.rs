//! Transition strips on region faces that border a finer region.
//!
//! A strip is one layer of transition cells lying in the face plane, one
//! per boundary cell of the coarse region. Each transition cell samples
//! its face at half the coarse stride (3×3 fine samples) and reuses the
//! four coarse corners as its back face:
//!
//! ```text
//!   fine face (w = 0)          coarse face (w = 1)
//!
//!   6 --- 7 --- 8              11 --------- 12
//!   |     |     |               |           |
//!   3 --- 4 --- 5    v          |           |
//!   |     |     |    |          |           |
//!   0 --- 1 --- 2    +-- u      9 --------- 10
//! ```
//!
//! The strip has zero width: coarse samples sit on the same lattice points
//! as fine samples 0, 2, 6 and 8, and coarse-side vertices are projected
//! onto the face plane. Renderers that want the strip to have depth use
//! [`MeshOutput::displaced_positions`], which pulls the coarse-side vertices
//! and the region's own boundary cells inward.

use glam::{IVec3, Vec3};
use smallvec::SmallVec;

use super::cache::TransitionCache;
use super::case_code;
use super::gradient::{blend_normals, central_difference, normalize_or_fallback};
use super::interpolate::{crossing_fraction, locate_crossing};
use super::tables::{
  edge_corners, reuse_direction, reuse_slot, transition_tables, REUSE_OWNED, TRANSITION_CORNER_DATA,
};
use super::RegionGrid;
use crate::constants::{
  log2_pow2, transition_fine_sample, transition_sample_uv, FIXED_ONE, TRANSITION_FINE_SAMPLES,
  TRANSITION_SAMPLES,
};
use crate::density::DensityField;
use crate::octree::Face;
use crate::types::{MeshOutput, Vertex};

/// Maps a face's local `(u, v, w)` frame onto world axes.
///
/// `u` and `v` follow the face axis cyclically (x → (y, z), y → (z, x),
/// z → (x, y)), so `u × v` is the face axis. `w` points into the region.
/// On a positive face that frame is left-handed and triangles are flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBasis {
  pub face: Face,
  pub axis: usize,
  pub u: usize,
  pub v: usize,
  pub mirrored: bool,
}

impl FaceBasis {
  pub fn new(face: Face) -> Self {
    let axis = face.axis();
    Self {
      face,
      axis,
      u: (axis + 1) % 3,
      v: (axis + 2) % 3,
      mirrored: face.is_positive(),
    }
  }

  /// Unit step `w` from the face plane into the region.
  #[inline]
  pub fn inward(&self) -> IVec3 {
    -self.face.normal()
  }

  /// Lattice point of transition sample `k` in strip cell `(i, j)`.
  #[inline]
  pub fn sample_point(&self, plane_origin: IVec3, i: i32, j: i32, k: usize, half: i32) -> IVec3 {
    let (su, sv) = transition_sample_uv(transition_fine_sample(k));
    let mut p = plane_origin;
    p[self.u] += (2 * i + su) * half;
    p[self.v] += (2 * j + sv) * half;
    p
  }
}

/// Samples of one strip cell. Entries 9..=12 alias the fine corners.
struct StripCell {
  i: i32,
  j: i32,
  /// Bit 0: previous column exists; bit 1: previous row exists.
  available: u8,
  points: [IVec3; TRANSITION_SAMPLES],
  samples: [i8; TRANSITION_SAMPLES],
  gradients: [Vec3; TRANSITION_FINE_SAMPLES],
}

impl StripCell {
  #[inline]
  fn neighbor(&self, direction: u8) -> (i32, i32) {
    (self.i - (direction & 1) as i32, self.j - ((direction >> 1) & 1) as i32)
  }

  #[inline]
  fn can_reuse(&self, direction: u8) -> bool {
    (direction == 1 || direction == 2) && direction & self.available == direction
  }
}

struct Strip<'a, D: ?Sized> {
  density: &'a D,
  grid: &'a RegionGrid,
  basis: FaceBasis,
  plane_origin: IVec3,
  /// Face-plane coordinate relative to the region origin.
  plane_local: f32,
  half: i32,
  cache: TransitionCache,
}

/// Polygonize the transition strip on `face` of `grid` into `out`.
///
/// `grid.stride` must be at least 2; the fine face is sampled at half of it.
pub(crate) fn polygonize_face<D: DensityField + ?Sized>(
  density: &D,
  grid: &RegionGrid,
  face: Face,
  out: &mut MeshOutput,
) {
  let basis = FaceBasis::new(face);
  let mut plane_origin = grid.origin;
  if face.is_positive() {
    plane_origin[basis.axis] += grid.cells * grid.stride;
  }
  let mut strip = Strip {
    density,
    grid,
    basis,
    plane_origin,
    plane_local: (plane_origin[basis.axis] - grid.origin[basis.axis]) as f32,
    half: grid.stride / 2,
    cache: TransitionCache::new(grid.cells),
  };

  for j in 0..grid.cells {
    strip.cache.begin_row(j);
    for i in 0..grid.cells {
      strip.polygonize_cell(i, j, out);
    }
  }
}

impl<D: DensityField + ?Sized> Strip<'_, D> {
  fn polygonize_cell(&mut self, i: i32, j: i32, out: &mut MeshOutput) {
    let points: [IVec3; TRANSITION_SAMPLES] =
      std::array::from_fn(|k| self.basis.sample_point(self.plane_origin, i, j, k, self.half));
    let fine: [i8; TRANSITION_FINE_SAMPLES] = std::array::from_fn(|k| self.density.density_at(points[k]));

    let case = case_code::transition(&fine);
    if case == 0 || case == 0x1FF {
      return;
    }

    let cell = StripCell {
      i,
      j,
      available: (i > 0) as u8 | ((j > 0) as u8) << 1,
      points,
      samples: std::array::from_fn(|k| fine[transition_fine_sample(k)]),
      gradients: std::array::from_fn(|k| central_difference(self.density, points[k])),
    };

    let (data, codes, inverted) = transition_tables().lookup(case);
    let mut local: SmallVec<[u32; 16]> = SmallVec::new();
    for &code in codes {
      local.push(self.edge_vertex(&cell, code, out));
    }

    let flip = inverted != self.basis.mirrored;
    for tri in data.indices.chunks_exact(3) {
      out.push_triangle(
        local[tri[0] as usize],
        local[tri[1] as usize],
        local[tri[2] as usize],
        flip,
      );
    }
  }

  fn edge_vertex(&mut self, cell: &StripCell, code: u16, out: &mut MeshOutput) -> u32 {
    let (a, b) = edge_corners(code);
    let t = crossing_fraction(cell.samples[a], cell.samples[b]);
    if t == 0 {
      return self.corner_vertex(cell, b, out);
    }
    if t == FIXED_ONE {
      return self.corner_vertex(cell, a, out);
    }

    let direction = reuse_direction(code);
    let slot = reuse_slot(code);
    let reused = if cell.can_reuse(direction) {
      let (pi, pj) = cell.neighbor(direction);
      self.cache.edge(pi, pj, slot)
    } else {
      None
    };

    let index = match reused {
      Some(index) => index,
      None => self.create_edge_vertex(cell, a, b, out),
    };
    if direction == REUSE_OWNED {
      self.cache.set_edge(cell.i, cell.j, slot, index);
    }
    index
  }

  fn create_edge_vertex(&self, cell: &StripCell, a: usize, b: usize, out: &mut MeshOutput) -> u32 {
    let coarse = a >= TRANSITION_FINE_SAMPLES;
    let steps = if coarse {
      log2_pow2(self.grid.stride)
    } else {
      log2_pow2(self.half)
    };
    let (p0, p1) = (cell.points[a], cell.points[b]);
    let crossing = locate_crossing(self.density, p0, cell.samples[a], p1, cell.samples[b], steps);
    let normal = blend_normals(
      cell.gradients[transition_fine_sample(a)],
      cell.gradients[transition_fine_sample(b)],
      crossing.weight_of_first(p0, p1),
    );
    let position = crossing.local_position(self.grid.origin);
    self.emit(position, normal, coarse, out)
  }

  /// Vertex at an exact sample crossing, shared with any neighbor cell that
  /// already produced the same corner on the same side.
  fn corner_vertex(&mut self, cell: &StripCell, sample: usize, out: &mut MeshOutput) -> u32 {
    if let Some(index) = self.cache.corner(cell.i, cell.j, sample) {
      return index;
    }

    let mut found = None;
    for &option in &TRANSITION_CORNER_DATA[sample] {
      if option == 0 {
        break;
      }
      let direction = option >> 4;
      if !cell.can_reuse(direction) {
        continue;
      }
      let (pi, pj) = cell.neighbor(direction);
      found = self.cache.corner(pi, pj, (option & 0xF) as usize);
      if found.is_some() {
        break;
      }
    }

    let index = match found {
      Some(index) => index,
      None => {
        let position = (cell.points[sample] - self.grid.origin).as_vec3();
        let normal = normalize_or_fallback(cell.gradients[transition_fine_sample(sample)]);
        self.emit(position, normal, sample >= TRANSITION_FINE_SAMPLES, out)
      }
    };
    self.cache.set_corner(cell.i, cell.j, sample, index);
    index
  }

  /// Coarse-side vertices are projected onto the face plane and displaced
  /// like the region's regular boundary vertices. Fine-side vertices must
  /// match the finer neighbor exactly and are never displaced.
  fn emit(&self, mut position: Vec3, normal: Vec3, coarse: bool, out: &mut MeshOutput) -> u32 {
    let displaced = if coarse {
      position[self.basis.axis] = self.plane_local;
      self.grid.displaced(position, normal)
    } else {
      position
    };
    out.push_vertex(
      Vertex {
        position: position.to_array(),
        normal: normal.to_array(),
      },
      displaced.to_array(),
    )
  }
}

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;
