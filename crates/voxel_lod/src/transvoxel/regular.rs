//! Regular cell sweep over a region's interior grid.

use glam::{IVec3, Vec3};
use smallvec::SmallVec;

use super::cache::RegularCache;
use super::case_code;
use super::gradient::{blend_normals, central_difference};
use super::interpolate::locate_crossing;
use super::tables::{edge_corners, regular_tables, reuse_direction, reuse_slot, REUSE_OWNED};
use super::RegionGrid;
use crate::constants::CORNER_OFFSETS;
use crate::density::DensityField;
use crate::types::{MeshOutput, Vertex};

/// Polygonize every cell of `grid` into `out`.
///
/// Cells are visited z, then y, then x. A vertex on an edge shared with an
/// already-visited cell is taken from the cache instead of being created
/// again, so every lattice edge crossing inside the region yields exactly
/// one vertex.
pub(crate) fn polygonize_cells<D: DensityField + ?Sized>(density: &D, grid: &RegionGrid, out: &mut MeshOutput) {
  let tables = regular_tables();
  let mut cache = RegularCache::new(grid.cells);
  let steps = grid.refine_steps();

  for z in 0..grid.cells {
    cache.begin_deck(z);
    for y in 0..grid.cells {
      for x in 0..grid.cells {
        let cell = IVec3::new(x, y, z);
        let base = grid.origin + cell * grid.stride;
        let corners: [IVec3; 8] = std::array::from_fn(|i| base + CORNER_OFFSETS[i] * grid.stride);
        let samples: [i8; 8] = std::array::from_fn(|i| density.density_at(corners[i]));

        let case = case_code::regular(&samples);
        if case == 0 || case == 0xFF {
          continue;
        }
        let (data, codes) = tables.lookup(case);

        // Bit set per axis where a preceding cell exists.
        let available = (x > 0) as u8 | ((y > 0) as u8) << 1 | ((z > 0) as u8) << 2;
        let mut gradients: [Option<Vec3>; 8] = [None; 8];
        let mut local: SmallVec<[u32; 12]> = SmallVec::new();

        for &code in codes {
          let (a, b) = edge_corners(code);
          let direction = reuse_direction(code);
          let slot = reuse_slot(code);

          let reused = if direction != REUSE_OWNED && direction & available == direction {
            let back = cell - step_back(direction);
            cache.get(back.x, back.y, back.z, slot)
          } else {
            None
          };

          let index = match reused {
            Some(index) => index,
            None => {
              let crossing = locate_crossing(density, corners[a], samples[a], corners[b], samples[b], steps);
              let g0 = *gradients[a].get_or_insert_with(|| central_difference(density, corners[a]));
              let g1 = *gradients[b].get_or_insert_with(|| central_difference(density, corners[b]));
              let normal = blend_normals(g0, g1, crossing.weight_of_first(corners[a], corners[b]));
              let position = crossing.local_position(grid.origin);
              out.push_vertex(
                Vertex {
                  position: position.to_array(),
                  normal: normal.to_array(),
                },
                grid.displaced(position, normal).to_array(),
              )
            }
          };

          if direction == REUSE_OWNED {
            cache.set(x, y, z, slot, index);
          }
          local.push(index);
        }

        for tri in data.indices.chunks_exact(3) {
          out.push_triangle(
            local[tri[0] as usize],
            local[tri[1] as usize],
            local[tri[2] as usize],
            false,
          );
        }
      }
    }
  }
}

#[inline(always)]
fn step_back(direction: u8) -> IVec3 {
  IVec3::new(
    (direction & 1) as i32,
    ((direction >> 1) & 1) as i32,
    ((direction >> 2) & 1) as i32,
  )
}

#[cfg(test)]
#[path = "regular_test.rs"]
mod regular_test;
