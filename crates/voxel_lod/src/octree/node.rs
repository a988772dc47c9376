//! RegionKey - immutable value type identifying a cubic region.
//!
//! Regions are addressed by their minimum corner in lattice units and their
//! edge length. The position is always a multiple of the size, so a key is
//! its own octree address: no explicit tree is stored.

use glam::{DVec3, IVec3};

/// Cubic region address: `(position, size)`.
///
/// Two keys with the same position and size are the same region regardless
/// of how subdivision reached them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RegionKey {
  /// Minimum corner, aligned to `size`.
  pub position: IVec3,
  /// Edge length in lattice units (power of two).
  pub size: i32,
}

impl RegionKey {
  pub fn new(position: IVec3, size: i32) -> Self {
    Self { position, size }
  }

  /// The region of `size` containing `point` (floor alignment, correct for
  /// negative coordinates).
  pub fn containing(point: IVec3, size: i32) -> Self {
    Self {
      position: align_down(point, size),
      size,
    }
  }

  /// Position is a multiple of size on every axis.
  #[inline]
  pub fn is_aligned(&self) -> bool {
    self.position.x.rem_euclid(self.size) == 0
      && self.position.y.rem_euclid(self.size) == 0
      && self.position.z.rem_euclid(self.size) == 0
  }

  /// Exclusive maximum corner.
  #[inline]
  pub fn max(&self) -> IVec3 {
    self.position + IVec3::splat(self.size)
  }

  /// Geometric center.
  #[inline]
  pub fn center(&self) -> DVec3 {
    self.position.as_dvec3() + DVec3::splat(self.size as f64 * 0.5)
  }

  /// Euclidean distance from the center to a lattice point.
  #[inline]
  pub fn distance_to(&self, point: IVec3) -> f64 {
    (self.center() - point.as_dvec3()).length()
  }

  /// Half-open containment test.
  #[inline]
  pub fn contains(&self, point: IVec3) -> bool {
    let max = self.max();
    point.cmpge(self.position).all() && point.cmplt(max).all()
  }

  /// Get child region (half size).
  ///
  /// Octant: 0-7 where bits represent +X, +Y, +Z offsets:
  /// - bit 0: X offset (0 or 1)
  /// - bit 1: Y offset (0 or 1)
  /// - bit 2: Z offset (0 or 1)
  ///
  /// Returns None if the size cannot be halved.
  pub fn get_child(&self, octant: u8) -> Option<Self> {
    if self.size < 2 {
      return None;
    }
    let half = self.size / 2;
    let offset = IVec3::new(
      (octant & 1) as i32,
      ((octant >> 1) & 1) as i32,
      ((octant >> 2) & 1) as i32,
    );
    Some(Self {
      position: self.position + offset * half,
      size: half,
    })
  }

  /// All eight children, in octant order.
  pub fn children(&self) -> Option<[Self; 8]> {
    let mut children = [*self; 8];
    for (octant, child) in children.iter_mut().enumerate() {
      *child = self.get_child(octant as u8)?;
    }
    Some(children)
  }
}

/// Round every component down to a multiple of `size`.
#[inline]
pub fn align_down(point: IVec3, size: i32) -> IVec3 {
  IVec3::new(
    point.x.div_euclid(size) * size,
    point.y.div_euclid(size) * size,
    point.z.div_euclid(size) * size,
  )
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
