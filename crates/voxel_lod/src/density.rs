//! Density field contract and a few deterministic reference fields.
//!
//! The meshing core treats the field as an opaque, pure function over the
//! integer lattice. Only the sign of a sample and the position of its zero
//! crossing along an edge matter.

use glam::{DVec3, IVec3};

use crate::types::{density_conversion, DensitySample};

/// Scalar field sampled by the polygonizer.
///
/// Must be pure: the same lattice point always returns the same sample.
/// Neighboring regions rely on this to produce identical seam vertices.
pub trait DensityField {
  fn density(&self, x: i32, y: i32, z: i32) -> DensitySample;

  #[inline(always)]
  fn density_at(&self, p: IVec3) -> DensitySample {
    self.density(p.x, p.y, p.z)
  }
}

impl<F> DensityField for F
where
  F: Fn(i32, i32, i32) -> DensitySample,
{
  #[inline(always)]
  fn density(&self, x: i32, y: i32, z: i32) -> DensitySample {
    self(x, y, z)
  }
}

#[inline(always)]
fn lattice(x: i32, y: i32, z: i32) -> DVec3 {
  DVec3::new(x as f64, y as f64, z as f64)
}

/// Horizontal ground at a given height. Solid below.
#[derive(Clone, Debug, Default)]
pub struct PlaneField {
  pub height: f64,
}

impl PlaneField {
  pub fn new(height: f64) -> Self {
    Self { height }
  }
}

impl DensityField for PlaneField {
  fn density(&self, _x: i32, y: i32, _z: i32) -> DensitySample {
    density_conversion::to_storage((y as f64 - self.height) as f32)
  }
}

/// Plane tilted around the Z axis.
///
/// Distance: `(y - height) * cos(angle) - x * sin(angle)`. Crosses region
/// boundaries at a predictable angle, which makes seams easy to inspect.
#[derive(Clone, Debug)]
pub struct TiltedPlaneField {
  /// Height offset of the plane (default: 0.0)
  pub height: f64,
  /// Tilt angle in radians (default: π/4)
  pub angle: f64,
}

impl Default for TiltedPlaneField {
  fn default() -> Self {
    Self {
      height: 0.0,
      angle: std::f64::consts::FRAC_PI_4,
    }
  }
}

impl TiltedPlaneField {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_height(mut self, height: f64) -> Self {
    self.height = height;
    self
  }

  pub fn with_angle_degrees(mut self, degrees: f64) -> Self {
    self.angle = degrees.to_radians();
    self
  }
}

impl DensityField for TiltedPlaneField {
  fn density(&self, x: i32, y: i32, _z: i32) -> DensitySample {
    let distance = (y as f64 - self.height) * self.angle.cos() - x as f64 * self.angle.sin();
    density_conversion::to_storage(distance as f32)
  }
}

/// Solid ball.
#[derive(Clone, Debug)]
pub struct SphereField {
  pub center: DVec3,
  pub radius: f64,
}

impl Default for SphereField {
  fn default() -> Self {
    Self {
      center: DVec3::ZERO,
      radius: 20.0,
    }
  }
}

impl SphereField {
  pub fn new(radius: f64) -> Self {
    Self {
      center: DVec3::ZERO,
      radius,
    }
  }

  pub fn with_center(mut self, center: [f64; 3]) -> Self {
    self.center = DVec3::from_array(center);
    self
  }

  /// Signed distance in world units.
  pub fn distance(&self, x: i32, y: i32, z: i32) -> f64 {
    (lattice(x, y, z) - self.center).length() - self.radius
  }
}

impl DensityField for SphereField {
  fn density(&self, x: i32, y: i32, z: i32) -> DensitySample {
    density_conversion::to_storage(self.distance(x, y, z) as f32)
  }
}
