//! Integer axis-aligned bounds for the queried volume.

use glam::IVec3;

use super::node::{align_down, RegionKey};

/// Integer axis-aligned bounding box (both corners inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IAabb3 {
	/// Minimum corner (inclusive).
	pub min: IVec3,
	/// Maximum corner (inclusive).
	pub max: IVec3,
}

impl IAabb3 {
	/// Cube of half-extent `radius` around `center`.
	pub fn around(center: IVec3, radius: i32) -> Self {
		let radius = radius.max(0);
		Self {
			min: center - IVec3::splat(radius),
			max: center + IVec3::splat(radius),
		}
	}

	/// Round outward to the grid of `size`-aligned regions and list them.
	///
	/// Uses floor division so negative coordinates align to the region that
	/// actually contains them.
	pub fn covering_regions(&self, size: i32) -> Vec<RegionKey> {
		let lo = align_down(self.min, size);
		let hi = align_down(self.max, size);
		let steps = (hi - lo) / size + IVec3::ONE;
		let mut regions = Vec::with_capacity((steps.x * steps.y * steps.z) as usize);

		let mut x = lo.x;
		while x <= hi.x {
			let mut y = lo.y;
			while y <= hi.y {
				let mut z = lo.z;
				while z <= hi.z {
					regions.push(RegionKey::new(IVec3::new(x, y, z), size));
					z += size;
				}
				y += size;
			}
			x += size;
		}
		regions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_covering_regions_symmetric_around_origin() {
		let bounds = IAabb3::around(IVec3::ZERO, 10);
		let regions = bounds.covering_regions(256);
		// -10 floors into [-256, 0), +10 into [0, 256) on every axis
		assert_eq!(regions.len(), 8);
		assert!(regions.contains(&RegionKey::new(IVec3::splat(-256), 256)));
		assert!(regions.contains(&RegionKey::new(IVec3::ZERO, 256)));
	}

	#[test]
	fn test_covering_regions_inside_one_cell() {
		let bounds = IAabb3::around(IVec3::splat(100), 20);
		assert_eq!(bounds.covering_regions(256), vec![RegionKey::new(IVec3::ZERO, 256)]);
	}

	#[test]
	fn test_covering_regions_cover_every_corner() {
		let bounds = IAabb3::around(IVec3::new(-300, 17, 511), 512);
		let regions = bounds.covering_regions(256);
		for corner in [bounds.min, bounds.max, IVec3::new(bounds.min.x, bounds.max.y, bounds.min.z)] {
			assert!(
				regions.iter().any(|r| r.contains(corner)),
				"corner {:?} not covered",
				corner
			);
		}
		assert!(regions.iter().all(|r| r.is_aligned()));
	}

	#[test]
	fn test_negative_radius_clamped() {
		let bounds = IAabb3::around(IVec3::splat(5), -3);
		assert_eq!(bounds.min, bounds.max);
		assert_eq!(bounds.covering_regions(16), vec![RegionKey::new(IVec3::ZERO, 16)]);
	}
}
