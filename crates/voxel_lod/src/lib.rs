//! voxel_lod - LOD octree region store and Transvoxel-style polygonizer
//!
//! This crate decides which cubic regions of a voxel world to mesh, and at
//! what detail, for a moving viewpoint, then turns each region's density
//! samples into a crack-free triangle mesh. It is engine independent:
//! meshes go to the caller through the [`MeshFactory`] trait.
//!
//! # Features
//!
//! - **Region Octree**: Distance-driven subdivision with no stored tree;
//!   terminal regions persist across frames with in-use flags and eviction
//! - **Regular Cells**: Table-driven isosurface extraction with per-deck
//!   vertex reuse and blended gradient normals
//! - **Transition Strips**: Half-resolution strips on faces bordering a
//!   finer region, so neighboring LODs share every seam vertex
//! - **Initialization Budget**: Caps meshing work per frame
//! - **Mesh Cache**: Keeps recently evicted meshes for a few frames
//!
//! # Example
//!
//! ```ignore
//! use voxel_lod::{LodConfig, MeshFactory, MeshOutput, RegionKey, SphereField, Terrain};
//!
//! struct Uploads(Vec<usize>);
//!
//! impl MeshFactory for Uploads {
//!     type Handle = usize;
//!     fn create_mesh(&mut self, _key: RegionKey, mesh: &MeshOutput) -> usize {
//!         self.0.push(mesh.triangle_count());
//!         self.0.len() - 1
//!     }
//!     fn destroy_mesh(&mut self, _handle: usize) {}
//! }
//!
//! let mut terrain = Terrain::new(LodConfig::default(), SphereField::new(100.0), Uploads(Vec::new()))?;
//! let report = terrain.update(glam::IVec3::new(0, 110, 0), 256);
//!
//! println!("{} regions meshed, {} triangles", report.initialized, report.triangles);
//! ```

pub mod constants;
pub mod density;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{CELLS_PER_AXIS, CORNER_OFFSETS, FIXED_ONE};
pub use density::{DensityField, PlaneField, SphereField, TiltedPlaneField};
pub use error::ConfigError;
pub use types::{density_conversion, DensitySample, MeshConfig, MeshOutput, MinMaxAABB, Vertex};

// Octree module for LOD-based spatial subdivision
pub mod octree;
pub use octree::{
  Face, InitBudget, InitStats, LodConfig, Region, RegionKey, RegionStore, TransitionFaces,
  UpdateStats,
};

// Region polygonizer
pub mod transvoxel;
pub use transvoxel::{
  polygonize_region, polygonize_region_into, try_polygonize_region, FaceBasis, RegionGrid,
};

// Frame-based mesh reuse
pub mod mesh_cache;
pub use mesh_cache::MeshCache;

// Per-frame driver tying the store to a renderer
pub mod terrain;
pub use terrain::{FrameReport, MeshFactory, Terrain};
