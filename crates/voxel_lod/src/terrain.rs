//! Terrain - one LOD terrain: region store, density field, and the
//! renderer-side mesh factory.
//!
//! [`Terrain::update`] runs a whole frame in the only safe order:
//!
//! ```text
//! reset in-use flags
//!   → subdivide around the viewpoint (create / re-mark regions)
//!   → evict unused regions          (destroy their meshes)
//!   → refresh transition faces      (destroy meshes whose seams changed)
//!   → initialize pending regions    (polygonize or reuse, create meshes)
//! ```
//!
//! Mesh handles live in the store's payload slot and are handed back to
//! [`MeshFactory::destroy_mesh`] by value, so each handle is released
//! exactly once.

use glam::IVec3;
use tracing::debug;

use crate::density::DensityField;
use crate::error::ConfigError;
use crate::mesh_cache::MeshCache;
use crate::octree::{InitBudget, LodConfig, RegionKey, RegionStore};
use crate::transvoxel::polygonize_region_into;
use crate::types::MeshOutput;

// =============================================================================
// MeshFactory - renderer bridge
// =============================================================================

/// Creates and destroys renderer-side meshes.
///
/// Called by [`Terrain`] only, never by the polygonizer.
pub trait MeshFactory {
  /// Renderer-owned object kept alive while its region is displayed.
  type Handle;

  /// Upload a region's mesh. Positions are relative to `key.position`.
  /// Never called with an empty mesh.
  fn create_mesh(&mut self, key: RegionKey, mesh: &MeshOutput) -> Self::Handle;

  fn destroy_mesh(&mut self, handle: Self::Handle);
}

// =============================================================================
// FrameReport
// =============================================================================

/// What one [`Terrain::update`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
  /// Viewpoint the subdivision used, after anchoring.
  pub viewpoint: IVec3,
  /// Regions inserted by subdivision.
  pub created: usize,
  /// Regions evicted as no longer in use.
  pub evicted: usize,
  /// Regions whose transition faces changed and were queued for re-meshing.
  pub invalidated: usize,
  /// Regions initialized this frame.
  pub initialized: usize,
  /// Initialized regions served from the mesh cache.
  pub cache_hits: usize,
  /// Regions left for a later frame by the initialization budget.
  pub deferred: usize,
  /// Vertices in the meshes initialized this frame.
  pub vertices: usize,
  /// Triangles in the meshes initialized this frame.
  pub triangles: usize,
}

// =============================================================================
// Terrain
// =============================================================================

/// LOD terrain over a density field.
///
/// Dropping a terrain does not release its handles; call
/// [`clear`](Self::clear) first when the factory needs them back.
pub struct Terrain<D: DensityField, F: MeshFactory> {
  store: RegionStore<F::Handle>,
  density: D,
  factory: F,
  cache: MeshCache,
  budget: InitBudget,
  scratch: MeshOutput,
}

impl<D: DensityField, F: MeshFactory> Terrain<D, F> {
  /// Fails when `config` does not validate.
  pub fn new(config: LodConfig, density: D, factory: F) -> Result<Self, ConfigError> {
    let cache = MeshCache::new(config.eviction_grace);
    let store = RegionStore::new(config)?;
    Ok(Self {
      store,
      density,
      factory,
      cache,
      budget: InitBudget::UNLIMITED,
      scratch: MeshOutput::new(),
    })
  }

  /// Cap the initialization pass. Unlimited by default.
  pub fn with_budget(mut self, budget: InitBudget) -> Self {
    self.budget = budget;
    self
  }

  pub fn store(&self) -> &RegionStore<F::Handle> {
    &self.store
  }

  pub fn density(&self) -> &D {
    &self.density
  }

  pub fn factory(&self) -> &F {
    &self.factory
  }

  pub fn factory_mut(&mut self) -> &mut F {
    &mut self.factory
  }

  pub fn cache(&self) -> &MeshCache {
    &self.cache
  }

  /// Live mesh handles by region.
  pub fn meshes(&self) -> impl Iterator<Item = (RegionKey, &F::Handle)> {
    self
      .store
      .iter()
      .filter_map(|region| region.payload.as_ref().map(|handle| (region.key, handle)))
  }

  /// Run one frame for `viewpoint`, covering a cube of half-extent `radius`.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "terrain::update"))]
  pub fn update(&mut self, viewpoint: IVec3, radius: i32) -> FrameReport {
    let Self {
      store,
      density,
      factory,
      cache,
      budget,
      scratch,
    } = self;

    store.reset_in_use_flags();
    let stats = store.update_for_viewpoint(viewpoint, radius);
    let evicted = store.clear_unused_chunks(|_, handle| factory.destroy_mesh(handle));
    let invalidated = store.refresh_transition_faces(|_, handle| factory.destroy_mesh(handle));

    let mut report = FrameReport {
      viewpoint: stats.viewpoint,
      created: stats.created.len(),
      evicted: evicted.len(),
      invalidated: invalidated.len(),
      ..Default::default()
    };

    let lod_config = store.config().clone();
    let init = store.initialize_with_budget(budget, |region| {
      let key = region.key;
      let faces = region.transition_faces;

      let hit = cache.contains(key, faces);
      if hit {
        report.cache_hits += 1;
      } else {
        polygonize_region_into(&*density, key, &lod_config.mesh_config(faces), scratch);
        if cache.is_enabled() {
          cache.insert(key, faces, scratch.clone());
        }
      }
      let cached = if hit { cache.get(key, faces) } else { None };
      let mesh = cached.unwrap_or(&*scratch);

      report.vertices += mesh.vertices.len();
      report.triangles += mesh.triangle_count();
      if !mesh.is_empty() {
        region.payload = Some(factory.create_mesh(key, mesh));
      }
    });
    report.initialized = init.initialized;
    report.deferred = init.deferred;

    for region in store.iter().filter(|r| r.initialized) {
      cache.touch(region.key, region.transition_faces);
    }
    cache.end_frame();

    debug!(
      created = report.created,
      evicted = report.evicted,
      invalidated = report.invalidated,
      initialized = report.initialized,
      cache_hits = report.cache_hits,
      deferred = report.deferred,
      "terrain frame"
    );
    report
  }

  /// Remove every region, releasing all mesh handles, and empty the cache.
  pub fn clear(&mut self) {
    let factory = &mut self.factory;
    self.store.drain(|_, handle| factory.destroy_mesh(handle));
    self.cache.clear();
  }
}

#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;
