//! LodConfig - sizes and thresholds for region subdivision.

use crate::constants::{
  CELLS_PER_AXIS, DEFAULT_MIN_REGION_SIZE, DEFAULT_SUBDIVISION_FACTOR, DEFAULT_TOP_LEVEL_SIZE,
  MIN_SUBDIVISION_FACTOR,
};
use super::TransitionFaces;
use crate::error::ConfigError;
use crate::types::MeshConfig;

/// Configuration for subdivision and region meshing.
#[derive(Clone, Debug, PartialEq)]
pub struct LodConfig {
  /// Smallest terminal region edge length. Power of two.
  pub min_region_size: i32,

  /// Edge length of the top-level grid. Power of two, `>= min_region_size`.
  pub top_level_size: i32,

  /// Distance multiplier `K`: a region splits while
  /// `distance(center, viewpoint) < size * K`.
  pub subdivision_factor: f64,

  /// Cells along each axis of a region's mesh grid.
  pub cells_per_axis: i32,

  /// Frames a cached mesh survives without being requested. 0 disables the
  /// mesh cache.
  pub eviction_grace: u32,
}

impl Default for LodConfig {
  fn default() -> Self {
    Self {
      min_region_size: DEFAULT_MIN_REGION_SIZE,
      top_level_size: DEFAULT_TOP_LEVEL_SIZE,
      subdivision_factor: DEFAULT_SUBDIVISION_FACTOR,
      cells_per_axis: CELLS_PER_AXIS,
      eviction_grace: 0,
    }
  }
}

impl LodConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_min_region_size(mut self, size: i32) -> Self {
    self.min_region_size = size;
    self
  }

  pub fn with_top_level_size(mut self, size: i32) -> Self {
    self.top_level_size = size;
    self
  }

  pub fn with_subdivision_factor(mut self, factor: f64) -> Self {
    self.subdivision_factor = factor;
    self
  }

  pub fn with_cells_per_axis(mut self, cells: i32) -> Self {
    self.cells_per_axis = cells;
    self
  }

  pub fn with_eviction_grace(mut self, frames: u32) -> Self {
    self.eviction_grace = frames;
    self
  }

  /// Reject configurations that would misbehave at runtime.
  pub fn validate(&self) -> Result<(), ConfigError> {
    check_power_of_two("min_region_size", self.min_region_size)?;
    check_power_of_two("top_level_size", self.top_level_size)?;
    self.mesh_config(TransitionFaces::NONE).validate()?;

    if self.min_region_size > self.top_level_size {
      return Err(ConfigError::MinExceedsTopLevel {
        min: self.min_region_size,
        top: self.top_level_size,
      });
    }
    if self.cells_per_axis > self.min_region_size {
      return Err(ConfigError::CellsDoNotDivide {
        cells: self.cells_per_axis,
        min: self.min_region_size,
      });
    }
    if !self.subdivision_factor.is_finite() || self.subdivision_factor < MIN_SUBDIVISION_FACTOR {
      return Err(ConfigError::SubdivisionFactor {
        value: self.subdivision_factor,
        min: MIN_SUBDIVISION_FACTOR,
      });
    }
    Ok(())
  }

  /// Distance below which a region of `size` subdivides.
  #[inline]
  pub fn get_threshold(&self, size: i32) -> f64 {
    size as f64 * self.subdivision_factor
  }

  /// Mesh settings for one region with the given transition faces.
  pub fn mesh_config(&self, faces: TransitionFaces) -> MeshConfig {
    MeshConfig::new()
      .with_cells_per_axis(self.cells_per_axis)
      .with_transition_faces(faces)
  }

  /// LOD index of a region size: `log2(size / min) + 1`.
  #[inline]
  pub fn lod_of(&self, size: i32) -> u32 {
    (size / self.min_region_size).trailing_zeros() + 1
  }
}

fn check_power_of_two(name: &'static str, value: i32) -> Result<(), ConfigError> {
  if value <= 0 || (value & (value - 1)) != 0 {
    return Err(ConfigError::NotPowerOfTwo { name, value });
  }
  Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
