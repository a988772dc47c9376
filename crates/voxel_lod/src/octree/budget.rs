//! Rate limiting for the initialization (meshing) pass.
//!
//! Subdivision itself is cheap; polygonizing freshly created regions is not.
//! The budget caps how many regions get initialized per frame so a large
//! viewpoint jump spreads its meshing cost over several frames.

use std::time::Duration;

use glam::IVec3;

use super::RegionKey;

/// Per-frame initialization budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitBudget {
	/// Maximum regions initialized per frame (0 = unlimited).
	pub max_regions: usize,
	/// Wall-clock cap for one pass. Checked between regions, so one slow
	/// region can overshoot it.
	pub max_time: Option<Duration>,
}

impl InitBudget {
	/// Default budget with reasonable limits.
	pub const DEFAULT: Self = Self {
		max_regions: 64,
		max_time: None,
	};

	/// Unlimited budget for testing or special cases.
	pub const UNLIMITED: Self = Self {
		max_regions: 0,
		max_time: None,
	};

	pub fn with_max_regions(mut self, regions: usize) -> Self {
		self.max_regions = regions;
		self
	}

	pub fn with_max_time(mut self, time: Duration) -> Self {
		self.max_time = Some(time);
		self
	}

	/// Check if more regions can be initialized.
	#[inline]
	pub fn can_initialize(&self, performed: usize) -> bool {
		self.max_regions == 0 || performed < self.max_regions
	}
}

impl Default for InitBudget {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Statistics from one `update_for_viewpoint` pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
	/// Viewpoint the subdivision actually used (after anchoring).
	pub viewpoint: IVec3,
	/// Regions inserted this pass.
	pub created: Vec<RegionKey>,
	/// Regions that already existed and were marked in use again.
	pub reused: usize,
}

/// Statistics from one initialization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitStats {
	/// Regions handed to the callback.
	pub initialized: usize,
	/// Regions left uninitialized because the budget ran out.
	pub deferred: usize,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_budget() {
		let budget = InitBudget::default();
		assert_eq!(budget.max_regions, 64);
		assert!(budget.can_initialize(63));
		assert!(!budget.can_initialize(64));
	}

	#[test]
	fn test_unlimited_budget() {
		let budget = InitBudget::UNLIMITED;
		assert!(budget.can_initialize(usize::MAX - 1));
		assert_eq!(budget.max_time, None);
	}

	#[test]
	fn test_builder() {
		let budget = InitBudget::UNLIMITED
			.with_max_regions(3)
			.with_max_time(Duration::from_millis(4));
		assert_eq!(budget.max_regions, 3);
		assert_eq!(budget.max_time, Some(Duration::from_millis(4)));
	}
}
