//! Configuration errors, reported at construction time.

/// Rejected [`LodConfig`](crate::octree::LodConfig) and
/// [`MeshConfig`](crate::types::MeshConfig) values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
  #[error("{name} must be a positive power of two, got {value}")]
  NotPowerOfTwo { name: &'static str, value: i32 },

  #[error("minimum region size {min} exceeds top-level region size {top}")]
  MinExceedsTopLevel { min: i32, top: i32 },

  #[error("cells per axis {cells} does not divide the minimum region size {min}")]
  CellsDoNotDivide { cells: i32, min: i32 },

  #[error("subdivision factor must be finite and at least {min}, got {value}")]
  SubdivisionFactor { value: f64, min: f64 },

  #[error("region size {size} is not a multiple of {cells} cells")]
  RegionNotDivisible { size: i32, cells: i32 },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_messages_name_the_offending_value() {
    let err = ConfigError::NotPowerOfTwo {
      name: "top_level_size",
      value: 300,
    };
    assert_eq!(err.to_string(), "top_level_size must be a positive power of two, got 300");

    let err = ConfigError::MinExceedsTopLevel { min: 512, top: 256 };
    assert!(err.to_string().contains("512"));
  }
}
