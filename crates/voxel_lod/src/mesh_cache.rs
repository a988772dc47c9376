//! Polygonized meshes kept around for a few frames after their region
//! stops being used.
//!
//! A camera moving back and forth keeps recreating the same regions.
//! Entries are keyed by region and transition mask, since the same region
//! with a different mask has a different mesh. Each frame every entry ages
//! by one; entries touched during the frame start over. An entry older
//! than the grace period is dropped.

use std::collections::HashMap;

use tracing::trace;

use crate::octree::{RegionKey, TransitionFaces};
use crate::types::MeshOutput;

type CacheKey = (RegionKey, TransitionFaces);

struct Entry {
  mesh: MeshOutput,
  frames_unused: u32,
}

/// Recently polygonized meshes with frame-based expiry.
pub struct MeshCache {
  grace: u32,
  entries: HashMap<CacheKey, Entry>,
}

impl MeshCache {
  /// A grace of 0 disables the cache: nothing is ever stored.
  pub fn new(grace: u32) -> Self {
    Self {
      grace,
      entries: HashMap::new(),
    }
  }

  pub fn is_enabled(&self) -> bool {
    self.grace > 0
  }

  pub fn grace(&self) -> u32 {
    self.grace
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains(&self, key: RegionKey, faces: TransitionFaces) -> bool {
    self.entries.contains_key(&(key, faces))
  }

  /// Cached mesh for `key` with `faces`, marking it used this frame.
  pub fn get(&mut self, key: RegionKey, faces: TransitionFaces) -> Option<&MeshOutput> {
    let entry = self.entries.get_mut(&(key, faces))?;
    entry.frames_unused = 0;
    Some(&entry.mesh)
  }

  /// Mark an entry used this frame without reading it.
  pub fn touch(&mut self, key: RegionKey, faces: TransitionFaces) {
    if let Some(entry) = self.entries.get_mut(&(key, faces)) {
      entry.frames_unused = 0;
    }
  }

  /// Store a freshly polygonized mesh. Ignored when the cache is disabled.
  pub fn insert(&mut self, key: RegionKey, faces: TransitionFaces, mesh: MeshOutput) {
    if !self.is_enabled() {
      return;
    }
    self.entries.insert(
      (key, faces),
      Entry {
        mesh,
        frames_unused: 0,
      },
    );
  }

  /// Age every entry by one frame and drop those past the grace period.
  /// Returns the number dropped.
  pub fn end_frame(&mut self) -> usize {
    let before = self.entries.len();
    let grace = self.grace;
    self.entries.retain(|_, entry| {
      entry.frames_unused += 1;
      entry.frames_unused <= grace
    });
    let dropped = before - self.entries.len();
    if dropped > 0 {
      trace!(dropped, remaining = self.entries.len(), "mesh cache expired entries");
    }
    dropped
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }
}
