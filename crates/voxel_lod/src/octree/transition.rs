//! Face adjacency between terminal regions.
//!
//! A region whose face touches a region one LOD finer carries a transition
//! strip on that face. The coarser side owns the strip, so the finer region
//! is meshed with regular cells only.

use glam::IVec3;

use super::RegionKey;

/// One of the six faces of a cubic region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Face {
  NegX,
  PosX,
  NegY,
  PosY,
  NegZ,
  PosZ,
}

impl Face {
  pub const ALL: [Face; 6] = [
    Face::NegX,
    Face::PosX,
    Face::NegY,
    Face::PosY,
    Face::NegZ,
    Face::PosZ,
  ];

  /// Bit index in a [`TransitionFaces`] mask.
  #[inline]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Axis perpendicular to the face (0 = x, 1 = y, 2 = z).
  #[inline]
  pub const fn axis(self) -> usize {
    self as usize / 2
  }

  /// True for the face on the maximum side of its axis.
  #[inline]
  pub const fn is_positive(self) -> bool {
    self as usize % 2 == 1
  }

  /// Outward unit normal.
  pub fn normal(self) -> IVec3 {
    let mut n = IVec3::ZERO;
    n[self.axis()] = if self.is_positive() { 1 } else { -1 };
    n
  }

  /// A lattice point just outside the center of this face of `key`.
  ///
  /// Probing the terminal region containing this point identifies the face
  /// neighbor, because adjacent terminal regions never differ by more than
  /// one LOD and so the neighbor covers the whole face or one quarter of it
  /// around the center.
  pub fn probe_point(self, key: &RegionKey) -> IVec3 {
    let half = key.size / 2;
    let mut p = key.position + IVec3::splat(half);
    let axis = self.axis();
    p[axis] = if self.is_positive() {
      key.position[axis] + key.size
    } else {
      key.position[axis] - 1
    };
    p
  }
}

/// Bit mask of faces that carry transition strips.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TransitionFaces(u8);

impl TransitionFaces {
  pub const NONE: Self = Self(0);
  pub const ALL: Self = Self(0b11_1111);

  #[inline]
  pub const fn contains(self, face: Face) -> bool {
    self.0 & (1 << face.index()) != 0
  }

  #[inline]
  pub fn insert(&mut self, face: Face) {
    self.0 |= 1 << face.index();
  }

  pub fn with(mut self, face: Face) -> Self {
    self.insert(face);
    self
  }

  #[inline]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub fn len(self) -> usize {
    self.0.count_ones() as usize
  }

  /// Faces in the mask, in [`Face::ALL`] order.
  pub fn iter(self) -> impl Iterator<Item = Face> {
    Face::ALL.into_iter().filter(move |f| self.contains(*f))
  }
}

/// Relation of a face neighbor to a region.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NeighborLod {
  /// No terminal region across the face (edge of the queried volume).
  Missing,
  Finer,
  Same,
  Coarser,
}

impl NeighborLod {
  pub fn classify(region: &RegionKey, neighbor: Option<&RegionKey>) -> Self {
    match neighbor {
      None => NeighborLod::Missing,
      Some(n) if n.size < region.size => NeighborLod::Finer,
      Some(n) if n.size > region.size => NeighborLod::Coarser,
      Some(_) => NeighborLod::Same,
    }
  }
}

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;
