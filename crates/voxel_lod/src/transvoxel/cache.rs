//! Vertex reuse caches.
//!
//! Cells are swept with x innermost, so a cell only ever looks back one
//! step along each axis. Two decks (regular) or two rows (transition) of
//! per-cell slots are enough; the current one is cleared before it is
//! written again.

/// Empty slot marker.
pub const NO_VERTEX: u32 = u32::MAX;

/// Owned-edge vertices of the current and previous z deck of a regular
/// sweep. Slot `a` holds the vertex on the cell's axis-`a` edge through
/// corner 7.
pub struct RegularCache {
  cells: usize,
  decks: Vec<[u32; 3]>,
}

impl RegularCache {
  pub fn new(cells: i32) -> Self {
    let cells = cells.max(0) as usize;
    Self {
      cells,
      decks: vec![[NO_VERTEX; 3]; 2 * cells * cells],
    }
  }

  #[inline(always)]
  fn index(&self, x: i32, y: i32, z: i32) -> usize {
    let deck = (z & 1) as usize;
    (deck * self.cells + y as usize) * self.cells + x as usize
  }

  /// Clear the deck about to be written for layer `z`.
  pub fn begin_deck(&mut self, z: i32) {
    let len = self.cells * self.cells;
    let start = (z & 1) as usize * len;
    self.decks[start..start + len].fill([NO_VERTEX; 3]);
  }

  #[inline]
  pub fn get(&self, x: i32, y: i32, z: i32, slot: usize) -> Option<u32> {
    let index = self.decks[self.index(x, y, z)][slot];
    (index != NO_VERTEX).then_some(index)
  }

  #[inline]
  pub fn set(&mut self, x: i32, y: i32, z: i32, slot: usize, vertex: u32) {
    let i = self.index(x, y, z);
    self.decks[i][slot] = vertex;
  }
}

/// Shared-edge and shared-corner vertices of the current and previous row
/// of a transition strip.
///
/// Edge slots 0..=2 are the top-row edges, 3..=5 the right-column edges.
/// Corner slots are indexed by transition sample (fine 0..=8, coarse
/// 9..=12), so fine and coarse vertices at one lattice point stay apart.
pub struct TransitionCache {
  cells: usize,
  edges: Vec<[u32; 6]>,
  corners: Vec<[u32; 13]>,
}

impl TransitionCache {
  pub fn new(cells: i32) -> Self {
    let cells = cells.max(0) as usize;
    Self {
      cells,
      edges: vec![[NO_VERTEX; 6]; 2 * cells],
      corners: vec![[NO_VERTEX; 13]; 2 * cells],
    }
  }

  #[inline(always)]
  fn index(&self, i: i32, j: i32) -> usize {
    (j & 1) as usize * self.cells + i as usize
  }

  /// Clear the row about to be written for strip row `j`.
  pub fn begin_row(&mut self, j: i32) {
    let start = (j & 1) as usize * self.cells;
    self.edges[start..start + self.cells].fill([NO_VERTEX; 6]);
    self.corners[start..start + self.cells].fill([NO_VERTEX; 13]);
  }

  #[inline]
  pub fn edge(&self, i: i32, j: i32, slot: usize) -> Option<u32> {
    let index = self.edges[self.index(i, j)][slot];
    (index != NO_VERTEX).then_some(index)
  }

  #[inline]
  pub fn set_edge(&mut self, i: i32, j: i32, slot: usize, vertex: u32) {
    let index = self.index(i, j);
    self.edges[index][slot] = vertex;
  }

  #[inline]
  pub fn corner(&self, i: i32, j: i32, sample: usize) -> Option<u32> {
    let index = self.corners[self.index(i, j)][sample];
    (index != NO_VERTEX).then_some(index)
  }

  #[inline]
  pub fn set_corner(&mut self, i: i32, j: i32, sample: usize, vertex: u32) {
    let index = self.index(i, j);
    self.corners[index][sample] = vertex;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_regular_decks_alternate() {
    let mut cache = RegularCache::new(4);
    cache.begin_deck(0);
    cache.set(1, 2, 0, 1, 42);
    assert_eq!(cache.get(1, 2, 0, 1), Some(42));
    assert_eq!(cache.get(1, 2, 0, 0), None);

    // Layer 1 writes the other deck; layer 0 stays readable.
    cache.begin_deck(1);
    cache.set(1, 2, 1, 1, 7);
    assert_eq!(cache.get(1, 2, 0, 1), Some(42));

    // Layer 2 reuses deck 0 and clears it first.
    cache.begin_deck(2);
    assert_eq!(cache.get(1, 2, 2, 1), None);
    assert_eq!(cache.get(1, 2, 1, 1), Some(7));
  }

  #[test]
  fn test_transition_rows_alternate() {
    let mut cache = TransitionCache::new(3);
    cache.begin_row(0);
    cache.set_edge(2, 0, 5, 9);
    cache.set_corner(2, 0, 12, 10);
    cache.begin_row(1);
    assert_eq!(cache.edge(2, 0, 5), Some(9));
    assert_eq!(cache.corner(2, 0, 12), Some(10));
    assert_eq!(cache.corner(2, 1, 12), None);

    cache.begin_row(2);
    assert_eq!(cache.edge(2, 2, 5), None);
    assert_eq!(cache.corner(2, 2, 12), None);
  }
}
