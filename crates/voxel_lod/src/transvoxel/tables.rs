//! Topology tables for regular and transition cells.
//!
//! Both tables are derived once, on first use, by contouring the cell's
//! boundary polyhedron for every sign configuration:
//!
//! 1. Every polyhedron face is listed as a corner cycle, counter-clockwise
//!    seen from outside the cell.
//! 2. Walking a face, each edge whose corners differ in sign is a crossing.
//!    A crossing followed by a solid arc starts a segment that ends at the
//!    next crossing along the cycle. On a face with four crossings this
//!    keeps the two solid corners apart; both cells sharing the face decide
//!    the same way, so neighbors always agree.
//! 3. Each crossing edge is left by exactly one segment and entered by
//!    exactly one, so the segments link into closed loops.
//! 4. Loops are fan-triangulated. The winding comes out counter-clockwise
//!    seen from the outside (positive density).
//!
//! Cases that triangulate identically share one [`CellData`] entry (their
//! equivalence class). Transition cases whose loops are exactly the reverse
//! of their complement's reuse the complement's class with
//! [`INVERTED_CLASS`] set.
//!
//! # Vertex codes
//!
//! ```text
//! bits 15..12  reuse direction (regular: 1 = -x, 2 = -y, 4 = -z;
//!              transition: 1 = previous column, 2 = previous row;
//!              8 = vertex is owned by this cell and gets cached)
//! bits 11..8   reuse slot
//! bits  7..4   first corner  (lower coordinate)
//! bits  3..0   second corner (higher coordinate)
//! ```

use std::sync::LazyLock;

use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{
  transition_fine_sample, transition_sample_uv, TRANSITION_CASE_BIT_SAMPLE,
  TRANSITION_FINE_SAMPLES, TRANSITION_SAMPLES,
};

/// Reuse direction meaning "this cell owns the vertex; cache it".
pub const REUSE_OWNED: u8 = 0x8;

/// Set in a transition class index when the triangulation must be emitted
/// with reversed winding.
pub const INVERTED_CLASS: u16 = 0x8000;

pub const REGULAR_CASES: usize = 256;
pub const TRANSITION_CASES: usize = 512;

/// Regular cube faces, counter-clockwise seen from outside.
pub const REGULAR_FACES: [&[u8]; 6] = [
  &[0, 4, 6, 2], // x = 0
  &[1, 3, 7, 5], // x = 1
  &[0, 1, 5, 4], // y = 0
  &[2, 6, 7, 3], // y = 1
  &[0, 2, 3, 1], // z = 0
  &[4, 5, 7, 6], // z = 1
];

/// Transition cell faces in local `(u, v, w)`, counter-clockwise seen from
/// outside. The fine face (samples 0..=8) is at `w = 0`, the coarse face
/// (samples 9..=12) at `w = 1`.
pub const TRANSITION_FACES: [&[u8]; 9] = [
  &[0, 3, 4, 1], // fine quads
  &[1, 4, 5, 2],
  &[3, 6, 7, 4],
  &[4, 7, 8, 5],
  &[9, 10, 12, 11],  // coarse face
  &[0, 1, 2, 10, 9], // v = 0
  &[2, 5, 8, 12, 10], // u = 2
  &[6, 11, 12, 8, 7], // v = 2
  &[0, 9, 11, 6, 3], // u = 0
];

/// Where an exact corner crossing of a transition cell may already exist.
///
/// Each entry lists up to two `(direction << 4) | source_sample` options,
/// tried in order; `0` ends the list. Direction 1 is the previous column,
/// 2 the previous row.
pub const TRANSITION_CORNER_DATA: [[u8; 2]; TRANSITION_SAMPLES] = [
  [0x26, 0x12], // 0
  [0x27, 0x00], // 1
  [0x28, 0x00], // 2
  [0x15, 0x00], // 3
  [0x00, 0x00], // 4
  [0x00, 0x00], // 5
  [0x18, 0x00], // 6
  [0x00, 0x00], // 7
  [0x00, 0x00], // 8
  [0x2B, 0x1A], // 9
  [0x2C, 0x00], // 10
  [0x1C, 0x00], // 11
  [0x00, 0x00], // 12
];

/// Triangulation shared by every case of one equivalence class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellData {
  pub vertex_count: u8,
  /// Local vertex indices, three per triangle.
  pub indices: SmallVec<[u8; 30]>,
}

impl CellData {
  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

pub type VertexCodes = SmallVec<[u16; 12]>;

/// Regular-cell tables, indexed by the 8-bit case code.
pub struct RegularTables {
  pub cell_class: [u8; REGULAR_CASES],
  pub cell_data: Vec<CellData>,
  pub vertex_data: Vec<VertexCodes>,
}

impl RegularTables {
  /// Triangulation and vertex codes for a case.
  ///
  /// # Panics
  /// When the case maps to a class that does not exist (corrupt tables).
  #[inline]
  pub fn lookup(&self, case: u8) -> (&CellData, &[u16]) {
    let class = self.cell_class[case as usize] as usize;
    assert!(
      class < self.cell_data.len(),
      "regular case {case} maps to missing class {class}"
    );
    (&self.cell_data[class], &self.vertex_data[case as usize])
  }
}

/// Transition-cell tables, indexed by the 9-bit case code.
pub struct TransitionTables {
  pub cell_class: [u16; TRANSITION_CASES],
  pub cell_data: Vec<CellData>,
  pub vertex_data: Vec<VertexCodes>,
}

impl TransitionTables {
  /// Triangulation, vertex codes, and whether winding must be reversed.
  ///
  /// # Panics
  /// When the case is out of range or maps to a missing class.
  #[inline]
  pub fn lookup(&self, case: u16) -> (&CellData, &[u16], bool) {
    assert!((case as usize) < TRANSITION_CASES, "transition case {case} out of range");
    let class = self.cell_class[case as usize];
    let index = (class & !INVERTED_CLASS) as usize;
    assert!(
      index < self.cell_data.len(),
      "transition case {case} maps to missing class {index}"
    );
    (
      &self.cell_data[index],
      &self.vertex_data[case as usize],
      class & INVERTED_CLASS != 0,
    )
  }
}

static REGULAR: LazyLock<RegularTables> = LazyLock::new(build_regular);
static TRANSITION: LazyLock<TransitionTables> = LazyLock::new(build_transition);

/// Process-wide regular tables, built on first access.
pub fn regular_tables() -> &'static RegularTables {
  &REGULAR
}

/// Process-wide transition tables, built on first access.
pub fn transition_tables() -> &'static TransitionTables {
  &TRANSITION
}

// =============================================================================
// Vertex code accessors
// =============================================================================

#[inline(always)]
pub const fn vertex_code(a: u8, b: u8, reuse: u8) -> u16 {
  ((reuse as u16) << 8) | ((a as u16) << 4) | b as u16
}

/// The two corners of a vertex code's edge, lower coordinate first.
#[inline(always)]
pub const fn edge_corners(code: u16) -> (usize, usize) {
  (((code >> 4) & 0xF) as usize, (code & 0xF) as usize)
}

#[inline(always)]
pub const fn reuse_direction(code: u16) -> u8 {
  (code >> 12) as u8
}

#[inline(always)]
pub const fn reuse_slot(code: u16) -> usize {
  ((code >> 8) & 0xF) as usize
}

/// Reuse byte for a regular-cell edge `a < b`.
///
/// The cell owns the three edges meeting at corner 7. Any other edge is
/// owned by the preceding cell found by stepping back along every axis on
/// which the edge's upper corner sits at 0. The slot is the edge's axis.
pub const fn regular_reuse(a: u8, b: u8) -> u8 {
  let axis = a ^ b;
  let slot = axis.trailing_zeros() as u8;
  let direction = !b & 0x7;
  if direction == 0 {
    (REUSE_OWNED << 4) | slot
  } else {
    (direction << 4) | slot
  }
}

/// Reuse byte for a transition-cell edge `a < b`.
///
/// Slots 0..=2 hold the top row (`v = 2`) edges, read back by the next row
/// through its bottom edges. Slots 3..=5 hold the right column (`u = 2`)
/// edges, read back by the next column through its left edges.
pub const fn transition_reuse(a: u8, b: u8) -> u8 {
  if a as usize >= TRANSITION_FINE_SAMPLES {
    return match (a, b) {
      (9, 10) => 0x22,
      (11, 12) => (REUSE_OWNED << 4) | 2,
      (9, 11) => 0x15,
      (10, 12) => (REUSE_OWNED << 4) | 5,
      _ => 0,
    };
  }
  if b as usize >= TRANSITION_FINE_SAMPLES {
    return 0;
  }
  let (ua, va) = transition_sample_uv(a as usize);
  let (_, vb) = transition_sample_uv(b as usize);
  if va == vb {
    let slot = ua as u8;
    match va {
      0 => 0x20 | slot,
      2 => (REUSE_OWNED << 4) | slot,
      _ => 0,
    }
  } else {
    let slot = 3 + va as u8;
    match ua {
      0 => 0x10 | slot,
      2 => (REUSE_OWNED << 4) | slot,
      _ => 0,
    }
  }
}

// =============================================================================
// Generation
// =============================================================================

type Edge = (u8, u8);
type Loops = Vec<Vec<Edge>>;

#[inline]
fn edge(a: u8, b: u8) -> Edge {
  if a < b {
    (a, b)
  } else {
    (b, a)
  }
}

#[inline]
fn edge_slot(e: Edge) -> usize {
  e.0 as usize * 16 + e.1 as usize
}

fn polyhedron_edges(faces: &[&[u8]]) -> Vec<Edge> {
  let mut edges: Vec<Edge> = faces
    .iter()
    .flat_map(|face| (0..face.len()).map(move |k| edge(face[k], face[(k + 1) % face.len()])))
    .collect();
  edges.sort_unstable();
  edges.dedup();
  edges
}

/// Oriented boundary loops of the solid region on the polyhedron surface.
fn contour_loops(faces: &[&[u8]], edges: &[Edge], solid: &[bool]) -> Loops {
  let mut next: [Option<Edge>; 256] = [None; 256];

  for face in faces {
    let n = face.len();
    let mut crossings: SmallVec<[(Edge, bool); 8]> = SmallVec::new();
    for k in 0..n {
      let (a, b) = (face[k], face[(k + 1) % n]);
      if solid[a as usize] != solid[b as usize] {
        crossings.push((edge(a, b), solid[b as usize]));
      }
    }
    for (i, &(from, enters_solid)) in crossings.iter().enumerate() {
      if enters_solid {
        next[edge_slot(from)] = Some(crossings[(i + 1) % crossings.len()].0);
      }
    }
  }

  let mut visited = [false; 256];
  let mut loops = Vec::new();
  for &start in edges {
    if visited[edge_slot(start)] || next[edge_slot(start)].is_none() {
      continue;
    }
    let mut contour = Vec::new();
    let mut current = start;
    while !visited[edge_slot(current)] {
      visited[edge_slot(current)] = true;
      contour.push(current);
      let Some(following) = next[edge_slot(current)] else {
        panic!("open contour at edge {current:?}");
      };
      current = following;
    }
    assert_eq!(current, start, "contour does not close");
    assert!(contour.len() >= 3, "degenerate contour {contour:?}");
    loops.push(contour);
  }
  loops
}

/// Fan-triangulate loops. Returns the vertex edges in local index order.
fn triangulate(loops: &Loops) -> (SmallVec<[Edge; 12]>, CellData) {
  let mut vertices: SmallVec<[Edge; 12]> = SmallVec::new();
  let mut indices = SmallVec::new();
  for contour in loops {
    let base = vertices.len() as u8;
    vertices.extend(contour.iter().copied());
    for i in 1..contour.len() as u8 - 1 {
      indices.extend_from_slice(&[base, base + i, base + i + 1]);
    }
  }
  let data = CellData {
    vertex_count: vertices.len() as u8,
    indices,
  };
  (vertices, data)
}

/// Index of `data` in `classes`, appending it if new.
fn intern(classes: &mut Vec<CellData>, data: CellData) -> usize {
  match classes.iter().position(|c| *c == data) {
    Some(index) => index,
    None => {
      classes.push(data);
      classes.len() - 1
    }
  }
}

/// Loops rotated to start at their smallest edge, then sorted.
fn canonical(loops: impl Iterator<Item = Vec<Edge>>) -> Loops {
  let mut out: Loops = loops
    .map(|mut contour| {
      let start = contour
        .iter()
        .enumerate()
        .min_by_key(|(_, e)| **e)
        .map_or(0, |(i, _)| i);
      contour.rotate_left(start);
      contour
    })
    .collect();
  out.sort();
  out
}

fn is_reverse_of(loops: &Loops, other: &Loops) -> bool {
  canonical(loops.iter().cloned())
    == canonical(other.iter().map(|c| c.iter().rev().copied().collect()))
}

/// Solid flags for all 13 transition samples of a case code.
pub(crate) fn transition_solid(case: usize) -> [bool; TRANSITION_SAMPLES] {
  let mut solid = [false; TRANSITION_SAMPLES];
  for (bit, &sample) in TRANSITION_CASE_BIT_SAMPLE.iter().enumerate() {
    solid[sample] = case & (1 << bit) != 0;
  }
  for (k, flag) in solid.iter_mut().enumerate().skip(TRANSITION_FINE_SAMPLES) {
    *flag = case & (1 << sample_case_bit(transition_fine_sample(k))) != 0;
  }
  solid
}

const fn sample_case_bit(sample: usize) -> usize {
  let mut bit = 0;
  while bit < TRANSITION_CASE_BIT_SAMPLE.len() {
    if TRANSITION_CASE_BIT_SAMPLE[bit] == sample {
      return bit;
    }
    bit += 1;
  }
  bit
}

fn build_regular() -> RegularTables {
  let edges = polyhedron_edges(&REGULAR_FACES);
  let mut cell_class = [0u8; REGULAR_CASES];
  let mut cell_data = Vec::new();
  let mut vertex_data = Vec::with_capacity(REGULAR_CASES);

  for (case, class) in cell_class.iter_mut().enumerate() {
    let solid: [bool; 8] = std::array::from_fn(|i| case & (1 << i) != 0);
    let loops = contour_loops(&REGULAR_FACES, &edges, &solid);
    let (vertices, data) = triangulate(&loops);
    *class = intern(&mut cell_data, data) as u8;
    vertex_data.push(
      vertices
        .iter()
        .map(|&(a, b)| vertex_code(a, b, regular_reuse(a, b)))
        .collect(),
    );
  }

  debug!(classes = cell_data.len(), "regular cell tables built");
  RegularTables {
    cell_class,
    cell_data,
    vertex_data,
  }
}

fn build_transition() -> TransitionTables {
  let edges = polyhedron_edges(&TRANSITION_FACES);
  let mut cell_class = [0u16; TRANSITION_CASES];
  let mut cell_data = Vec::new();
  let mut vertex_data: Vec<VertexCodes> = Vec::with_capacity(TRANSITION_CASES);
  let mut loops_by_case: Vec<Loops> = Vec::with_capacity(TRANSITION_CASES);
  let mut inverted = 0usize;

  for case in 0..TRANSITION_CASES {
    let solid = transition_solid(case);
    let loops = contour_loops(&TRANSITION_FACES, &edges, &solid);
    let complement = case ^ (TRANSITION_CASES - 1);

    if complement < case && is_reverse_of(&loops, &loops_by_case[complement]) {
      cell_class[case] = cell_class[complement] | INVERTED_CLASS;
      let codes = vertex_data[complement].clone();
      vertex_data.push(codes);
      inverted += 1;
    } else {
      let (vertices, data) = triangulate(&loops);
      cell_class[case] = intern(&mut cell_data, data) as u16;
      vertex_data.push(
        vertices
          .iter()
          .map(|&(a, b)| vertex_code(a, b, transition_reuse(a, b)))
          .collect(),
      );
    }
    loops_by_case.push(loops);
  }

  debug!(classes = cell_data.len(), inverted, "transition cell tables built");
  TransitionTables {
    cell_class,
    cell_data,
    vertex_data,
  }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;
