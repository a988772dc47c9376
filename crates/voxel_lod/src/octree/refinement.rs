//! Terminal region subdivision.
//!
//! Starting from the top-level grid around the viewpoint, each region is
//! split into its 8 octants while it is close enough to the viewer:
//!
//! ```text
//! size <= min_region_size             -> terminal
//! distance(center, viewpoint) >= size * K  -> terminal
//! otherwise                           -> recurse into 8 children
//! ```
//!
//! The comparison is strict, so a region exactly at the threshold does not
//! split. Intermediate nodes are recursion state only; the output is the flat
//! list of terminal regions.

use glam::IVec3;

use super::bounds::IAabb3;
use super::{LodConfig, RegionKey};

/// Input for one subdivision pass.
#[derive(Clone, Copy, Debug)]
pub struct RefinementInput<'a> {
  /// Viewer position in lattice units.
  pub viewpoint: IVec3,
  /// Half-extent of the queried cube.
  pub radius: i32,
  /// Sizes and thresholds.
  pub config: &'a LodConfig,
}

/// Whether a region of this key should split for the given viewpoint.
#[inline]
pub fn should_subdivide(key: &RegionKey, viewpoint: IVec3, config: &LodConfig) -> bool {
  key.size > config.min_region_size && key.distance_to(viewpoint) < config.get_threshold(key.size)
}

/// Collect the terminal regions below `root` into `out`.
///
/// Depth is bounded by `log2(root.size / min_region_size)` because every
/// level halves the size and `size <= min_region_size` always terminates.
pub fn collect_terminal_regions(
  root: RegionKey,
  viewpoint: IVec3,
  config: &LodConfig,
  out: &mut Vec<RegionKey>,
) {
  if !should_subdivide(&root, viewpoint, config) {
    out.push(root);
    return;
  }
  match root.children() {
    Some(children) => {
      for child in children {
        collect_terminal_regions(child, viewpoint, config, out);
      }
    }
    None => out.push(root),
  }
}

/// Produce every terminal region covering the cube around the viewpoint.
#[cfg_attr(
  feature = "profiling",
  tracing::instrument(skip_all, name = "octree::refine")
)]
pub fn refine(input: RefinementInput<'_>) -> Vec<RegionKey> {
  let bounds = IAabb3::around(input.viewpoint, input.radius);
  let mut terminals = Vec::new();
  for top in bounds.covering_regions(input.config.top_level_size) {
    collect_terminal_regions(top, input.viewpoint, input.config, &mut terminals);
  }
  terminals
}

#[cfg(test)]
#[path = "refinement_test.rs"]
mod refinement_test;
