use super::*;

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_default_config_is_valid() {
  let config = LodConfig::default();
  assert_eq!(config.validate(), Ok(()));
  assert_eq!(config.min_region_size, 16);
  assert_eq!(config.top_level_size, 256);
  assert_eq!(config.subdivision_factor, 2.0);
}

#[test]
fn test_non_power_of_two_sizes_rejected() {
  let err = LodConfig::new().with_top_level_size(300).validate();
  assert_eq!(
    err,
    Err(ConfigError::NotPowerOfTwo {
      name: "top_level_size",
      value: 300
    })
  );

  let err = LodConfig::new().with_min_region_size(24).validate();
  assert!(matches!(err, Err(ConfigError::NotPowerOfTwo { name: "min_region_size", .. })));

  let err = LodConfig::new().with_min_region_size(0).validate();
  assert!(matches!(err, Err(ConfigError::NotPowerOfTwo { value: 0, .. })));

  let err = LodConfig::new().with_min_region_size(-16).validate();
  assert!(matches!(err, Err(ConfigError::NotPowerOfTwo { value: -16, .. })));
}

#[test]
fn test_min_above_top_rejected() {
  let err = LodConfig::new()
    .with_min_region_size(512)
    .with_top_level_size(256)
    .validate();
  assert_eq!(err, Err(ConfigError::MinExceedsTopLevel { min: 512, top: 256 }));
}

#[test]
fn test_cells_must_fit_min_region() {
  let err = LodConfig::new()
    .with_min_region_size(8)
    .with_cells_per_axis(16)
    .validate();
  assert_eq!(err, Err(ConfigError::CellsDoNotDivide { cells: 16, min: 8 }));
}

#[test]
fn test_subdivision_factor_bounds() {
  assert!(LodConfig::new().with_subdivision_factor(1.5).validate().is_err());
  assert!(LodConfig::new().with_subdivision_factor(f64::NAN).validate().is_err());
  assert!(LodConfig::new().with_subdivision_factor(3.0).validate().is_ok());
}

// =========================================================================
// Derived values
// =========================================================================

#[test]
fn test_threshold_scales_with_size() {
  let config = LodConfig::new().with_subdivision_factor(3.0);
  assert_eq!(config.get_threshold(16), 48.0);
  assert_eq!(config.get_threshold(256), 768.0);
}

#[test]
fn test_lod_index() {
  let config = LodConfig::default();
  assert_eq!(config.lod_of(16), 1);
  assert_eq!(config.lod_of(128), 4);
  assert_eq!(config.lod_of(config.top_level_size), 5);
}
