//! Octree module for LOD-based spatial subdivision.
//!
//! No explicit tree is kept. Regions are addressed by `(position, size)` and
//! parent/child relationships are computed on demand via coordinate math.
//! Only terminal regions persist between frames, in [`RegionStore`].
//!
//! # LOD Convention
//!
//! LOD 1 = finest detail (`min_region_size`), higher LOD = coarser.
//!
//! ```text
//! size = min_region_size * 2^(LOD - 1)
//! ```
//!
//! # Module Structure
//!
//! - [`node`]: `RegionKey` - value type for region addresses
//! - [`config`]: `LodConfig` - sizes, thresholds, validation
//! - [`bounds`]: `IAabb3` - queried volume and top-level grid
//! - [`refinement`]: recursive terminal-region subdivision
//! - [`transition`]: faces, neighbor LOD relation, transition masks
//! - [`budget`]: initialization budget and pass statistics
//! - [`store`]: `RegionStore` - persistent terminal regions

pub mod bounds;
pub mod budget;
pub mod config;
pub mod node;
pub mod refinement;
pub mod store;
pub mod transition;

// Re-exports
pub use bounds::IAabb3;
pub use budget::{InitBudget, InitStats, UpdateStats};
pub use config::LodConfig;
pub use node::RegionKey;
pub use refinement::{refine, RefinementInput};
pub use store::{Region, RegionStore};
pub use transition::{Face, NeighborLod, TransitionFaces};
