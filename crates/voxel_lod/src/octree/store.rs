//! RegionStore - persistent map of terminal regions across frames.
//!
//! Regions are plain values keyed by [`RegionKey`]. Each frame runs, in
//! order:
//!
//! ```text
//! reset_in_use_flags -> update_for_viewpoint -> clear_unused_chunks
//!                    -> refresh_transition_faces -> initialize_subchunks
//! ```
//!
//! Running them out of order can evict regions that were just created or
//! initialize regions about to be evicted. [`Terrain`](crate::terrain::Terrain)
//! drives the sequence for callers that do not need the individual steps.

use std::collections::HashMap;

use glam::IVec3;
use tracing::debug;
use web_time::Instant;

use super::budget::{InitBudget, InitStats, UpdateStats};
use super::refinement::{refine, RefinementInput};
use super::transition::{Face, NeighborLod, TransitionFaces};
use super::{LodConfig, RegionKey};
use crate::error::ConfigError;

/// One terminal region and its bookkeeping.
#[derive(Debug)]
pub struct Region<P> {
  pub key: RegionKey,
  /// `log2(size / min_region_size) + 1`.
  pub lod: u32,
  /// Re-asserted every update that still produces this region.
  pub in_use: bool,
  /// Set once the initialization callback has run.
  pub initialized: bool,
  /// Faces bordering a finer region, as of the last refresh.
  pub transition_faces: TransitionFaces,
  /// Externally owned object attached by the initialization callback.
  pub payload: Option<P>,
}

impl<P> Region<P> {
  fn new(key: RegionKey, lod: u32) -> Self {
    Self {
      key,
      lod,
      in_use: true,
      initialized: false,
      transition_faces: TransitionFaces::NONE,
      payload: None,
    }
  }
}

/// Terminal regions keyed by `(position, size)`.
pub struct RegionStore<P> {
  config: LodConfig,
  regions: HashMap<RegionKey, Region<P>>,
  /// Viewpoint used by the last subdivision.
  anchor: Option<IVec3>,
}

impl<P> RegionStore<P> {
  /// Create an empty store. Fails on an invalid configuration.
  pub fn new(config: LodConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self {
      config,
      regions: HashMap::new(),
      anchor: None,
    })
  }

  pub fn config(&self) -> &LodConfig {
    &self.config
  }

  /// Viewpoint the current region set was derived from.
  pub fn anchor(&self) -> Option<IVec3> {
    self.anchor
  }

  pub fn len(&self) -> usize {
    self.regions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.regions.is_empty()
  }

  pub fn contains(&self, key: &RegionKey) -> bool {
    self.regions.contains_key(key)
  }

  pub fn get(&self, key: &RegionKey) -> Option<&Region<P>> {
    self.regions.get(key)
  }

  pub fn get_mut(&mut self, key: &RegionKey) -> Option<&mut Region<P>> {
    self.regions.get_mut(key)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Region<P>> {
    self.regions.values()
  }

  pub fn keys(&self) -> impl Iterator<Item = &RegionKey> {
    self.regions.keys()
  }

  /// Mark every region as not in use. First step of a frame.
  pub fn reset_in_use_flags(&mut self) {
    for region in self.regions.values_mut() {
      region.in_use = false;
    }
  }

  /// Subdivide around `viewpoint` and mark every produced region in use,
  /// inserting the ones not seen before.
  ///
  /// A viewpoint closer than `min_region_size` (per axis) to the previous
  /// anchor reuses the anchor, so small camera jitter never reshapes the
  /// region set. The queried cube is padded by `min_region_size - 1` so
  /// that it still contains `[viewpoint - radius, viewpoint + radius]`
  /// whichever point the anchor ended up at.
  pub fn update_for_viewpoint(&mut self, viewpoint: IVec3, radius: i32) -> UpdateStats {
    let viewpoint = self.anchor_viewpoint(viewpoint);
    let terminals = refine(RefinementInput {
      viewpoint,
      radius: radius.max(0) + self.config.min_region_size - 1,
      config: &self.config,
    });

    let mut stats = UpdateStats {
      viewpoint,
      ..Default::default()
    };
    for key in terminals {
      match self.regions.get_mut(&key) {
        Some(region) => {
          region.in_use = true;
          stats.reused += 1;
        }
        None => {
          let lod = self.config.lod_of(key.size);
          self.regions.insert(key, Region::new(key, lod));
          stats.created.push(key);
        }
      }
    }

    debug!(
      created = stats.created.len(),
      reused = stats.reused,
      total = self.regions.len(),
      "region store updated"
    );
    stats
  }

  fn anchor_viewpoint(&mut self, viewpoint: IVec3) -> IVec3 {
    match self.anchor {
      Some(anchor) if (viewpoint - anchor).abs().max_element() < self.config.min_region_size => anchor,
      _ => {
        self.anchor = Some(viewpoint);
        viewpoint
      }
    }
  }

  /// Remove every region not marked in use, handing its payload to
  /// `release` before the entry is erased. Returns the evicted keys.
  pub fn clear_unused_chunks(&mut self, mut release: impl FnMut(RegionKey, P)) -> Vec<RegionKey> {
    let stale: Vec<RegionKey> = self
      .regions
      .values()
      .filter(|r| !r.in_use)
      .map(|r| r.key)
      .collect();

    for key in &stale {
      if let Some(mut region) = self.regions.remove(key) {
        if let Some(payload) = region.payload.take() {
          release(*key, payload);
        }
      }
    }

    if !stale.is_empty() {
      debug!(evicted = stale.len(), remaining = self.regions.len(), "regions evicted");
    }
    stale
  }

  /// Terminal region in use that contains `point`, if any.
  pub fn region_containing(&self, point: IVec3) -> Option<&Region<P>> {
    let mut size = self.config.min_region_size;
    while size <= self.config.top_level_size {
      if let Some(region) = self.regions.get(&RegionKey::containing(point, size)) {
        if region.in_use {
          return Some(region);
        }
      }
      size *= 2;
    }
    None
  }

  /// Terminal region across `face` of `key`.
  pub fn neighbor_across(&self, key: &RegionKey, face: Face) -> Option<&Region<P>> {
    self.region_containing(face.probe_point(key))
  }

  /// Faces of `key` that border a finer region.
  pub fn transition_faces_for(&self, key: &RegionKey) -> TransitionFaces {
    let mut faces = TransitionFaces::NONE;
    for face in Face::ALL {
      let neighbor = self.neighbor_across(key, face).map(|r| &r.key);
      if NeighborLod::classify(key, neighbor) == NeighborLod::Finer {
        faces.insert(face);
      }
    }
    faces
  }

  /// Recompute every region's transition faces.
  ///
  /// An initialized region whose mask changed has its payload released and
  /// goes back to uninitialized so the next initialization pass re-meshes it
  /// with the right strips. Returns the invalidated keys.
  pub fn refresh_transition_faces(&mut self, mut release: impl FnMut(RegionKey, P)) -> Vec<RegionKey> {
    let changes: Vec<(RegionKey, TransitionFaces)> = self
      .regions
      .values()
      .filter(|r| r.in_use)
      .filter_map(|r| {
        let faces = self.transition_faces_for(&r.key);
        (faces != r.transition_faces).then_some((r.key, faces))
      })
      .collect();

    let mut invalidated = Vec::new();
    for (key, faces) in changes {
      let Some(region) = self.regions.get_mut(&key) else {
        continue;
      };
      region.transition_faces = faces;
      if region.initialized {
        region.initialized = false;
        if let Some(payload) = region.payload.take() {
          release(key, payload);
        }
        invalidated.push(key);
      }
    }

    if !invalidated.is_empty() {
      debug!(invalidated = invalidated.len(), "transition faces changed");
    }
    invalidated
  }

  /// Run `callback` on every uninitialized region, then mark it initialized.
  pub fn initialize_subchunks(&mut self, callback: impl FnMut(&mut Region<P>)) -> usize {
    self
      .initialize_with_budget(&InitBudget::UNLIMITED, callback)
      .initialized
  }

  /// Like [`initialize_subchunks`](Self::initialize_subchunks), nearest
  /// regions first, stopping when the budget runs out.
  pub fn initialize_with_budget(
    &mut self,
    budget: &InitBudget,
    mut callback: impl FnMut(&mut Region<P>),
  ) -> InitStats {
    let origin = self.anchor.unwrap_or(IVec3::ZERO);
    let mut pending: Vec<(f64, RegionKey)> = self
      .regions
      .values()
      .filter(|r| !r.initialized)
      .map(|r| (r.key.distance_to(origin), r.key))
      .collect();
    pending.sort_by(|a, b| {
      a.0
        .total_cmp(&b.0)
        .then_with(|| a.1.size.cmp(&b.1.size))
        .then_with(|| a.1.position.to_array().cmp(&b.1.position.to_array()))
    });

    let start = Instant::now();
    let mut stats = InitStats::default();
    for (i, (_, key)) in pending.iter().enumerate() {
      let out_of_time = budget
        .max_time
        .is_some_and(|max| stats.initialized > 0 && start.elapsed() >= max);
      if !budget.can_initialize(stats.initialized) || out_of_time {
        stats.deferred = pending.len() - i;
        break;
      }
      if let Some(region) = self.regions.get_mut(key) {
        callback(region);
        region.initialized = true;
        stats.initialized += 1;
      }
    }
    stats
  }

  /// Remove every region, releasing all payloads.
  pub fn drain(&mut self, mut release: impl FnMut(RegionKey, P)) {
    for (key, mut region) in self.regions.drain() {
      if let Some(payload) = region.payload.take() {
        release(key, payload);
      }
    }
    self.anchor = None;
  }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
