//! Core types for region meshing.

use crate::constants::CELLS_PER_AXIS;
use crate::error::ConfigError;
use crate::octree::TransitionFaces;

/// Quantized density sample. Negative is inside (solid), non-negative is
/// outside.
pub type DensitySample = i8;

/// Float ↔ i8 density conversion.
///
/// Fields usually evaluate a signed distance in world units; the meshing core
/// only ever sees the clamped, rounded `i8`.
pub mod density_conversion {
  /// Distance in world units that maps to ±127.
  pub const RANGE: f32 = 10.0;

  /// Scale factor: 127 / RANGE.
  pub const SCALE: f32 = 127.0 / RANGE;

  /// Convert a signed distance to a quantized sample.
  #[inline(always)]
  pub fn to_storage(distance: f32) -> i8 {
    (distance * SCALE).clamp(-127.0, 127.0).round() as i8
  }
}

/// Output vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Position relative to the region origin, in lattice units.
  pub position: [f32; 3],

  /// Surface normal (unit vector), pointing toward positive density.
  pub normal: [f32; 3],
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
    }
  }
}

/// Bounds of a mesh in region-local coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Inverted box that any point grows into.
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Grow to include `point`.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// False until the first point is added.
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Polygonization result for one region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  /// Vertices with region-local positions and normals.
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle, counter-clockwise seen from
  /// the outside).
  pub indices: Vec<u32>,

  /// Secondary positions (parallel to vertices). Equal to the primary
  /// position except near faces that carry a transition strip, where
  /// vertices are pulled inward to make room for the strip.
  pub displaced_positions: Vec<[f32; 3]>,

  /// Bounds of the primary positions.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Empty every buffer, keeping allocations.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.displaced_positions.clear();
    self.bounds = MinMaxAABB::empty();
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Append a vertex and return its index.
  #[inline]
  pub fn push_vertex(&mut self, vertex: Vertex, displaced: [f32; 3]) -> u32 {
    let index = self.vertices.len() as u32;
    self.bounds.encapsulate(vertex.position);
    self.vertices.push(vertex);
    self.displaced_positions.push(displaced);
    index
  }

  /// Append a triangle, optionally reversing its winding.
  #[inline]
  pub fn push_triangle(&mut self, a: u32, b: u32, c: u32, flip: bool) {
    if flip {
      self.indices.extend_from_slice(&[a, c, b]);
    } else {
      self.indices.extend_from_slice(&[a, b, c]);
    }
  }
}

/// Configuration for polygonizing one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshConfig {
  /// Cells along each axis of the region's local grid.
  pub cells_per_axis: i32,

  /// Faces bordering a region one LOD finer. Each gets a transition strip.
  pub transition_faces: TransitionFaces,
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self {
      cells_per_axis: CELLS_PER_AXIS,
      transition_faces: TransitionFaces::NONE,
    }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_cells_per_axis(mut self, cells: i32) -> Self {
    self.cells_per_axis = cells;
    self
  }

  pub fn with_transition_faces(mut self, faces: TransitionFaces) -> Self {
    self.transition_faces = faces;
    self
  }

  /// `cells_per_axis` must be a positive power of two.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let cells = self.cells_per_axis;
    if cells <= 0 || (cells & (cells - 1)) != 0 {
      return Err(ConfigError::NotPowerOfTwo {
        name: "cells_per_axis",
        value: cells,
      });
    }
    Ok(())
  }

  /// Like [`validate`](Self::validate), and the grid must fit a region of
  /// `size` exactly.
  pub fn validate_for(&self, size: i32) -> Result<(), ConfigError> {
    self.validate()?;
    if size % self.cells_per_axis != 0 {
      return Err(ConfigError::RegionNotDivisible {
        size,
        cells: self.cells_per_axis,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
