use std::ops::Range;

use crate::error::GridError;
use crate::voxel_grid::grid::VoxelGrid;

/// Intersection of a destination grid with a source grid shifted by an integer displacement.
///
/// Destination cell `d` pairs with source cell `d - displacement`. Every range is already
/// clipped to both grids, so iterating it never leaves either one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
	pub x: Range<usize>,
	pub y: Range<usize>,
	pub z: Range<usize>,
	pub displacement: [isize; 3],
}

/// `[max(0, displ), min(dim, src_dim + displ))`, empty when the two do not overlap.
pub fn axis_window(dim: usize, src_dim: usize, displ: isize) -> Range<usize> {
	let start = displ.max(0);
	let end = (src_dim as isize).saturating_add(displ).min(dim as isize);
	if end <= start {
		0..0
	} else {
		start as usize..end as usize
	}
}

impl Window {
	pub fn new(dst: (usize, usize, usize), src: (usize, usize, usize), displacement: [isize; 3]) -> Self {
		Self {
			x: axis_window(dst.0, src.0, displacement[0]),
			y: axis_window(dst.1, src.1, displacement[1]),
			z: axis_window(dst.2, src.2, displacement[2]),
			displacement,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
	}

	/// Number of destination cells covered
	pub fn len(&self) -> usize {
		self.x.len() * self.y.len() * self.z.len()
	}

	/// Source coordinate paired with destination coordinate `d` on `axis`
	#[inline]
	pub fn source(&self, axis: usize, d: usize) -> usize {
		(d as isize - self.displacement[axis]) as usize
	}
}

pub(crate) fn check_grain(dst: &VoxelGrid, src: &VoxelGrid) -> Result<(), GridError> {
	if dst.grain() != src.grain() {
		return Err(GridError::GrainMismatch {
			expected: dst.grain(),
			found: src.grain(),
		});
	}
	Ok(())
}

fn check_aligned(dst: &VoxelGrid, src: &VoxelGrid) -> Result<(), GridError> {
	if dst.dims() != src.dims() {
		return Err(GridError::ShapeMismatch {
			expected: dst.dims(),
			found: src.dims(),
		});
	}
	if dst.frame() != src.frame() {
		return Err(GridError::FrameMismatch);
	}
	Ok(())
}

impl VoxelGrid {
	/// Set every cell covered by `other` (shifted by the displacement) to `self OR other`.
	///
	/// Cells of `other` that land outside `self` are dropped; a fully disjoint
	/// displacement is a no-op.
	pub fn overlay_or(&mut self, other: &VoxelGrid, dx: isize, dy: isize, dz: isize) -> Result<(), GridError> {
		check_grain(self, other)?;
		let window = Window::new(self.dims(), other.dims(), [dx, dy, dz]);
		self.apply_window(other, &window, true);
		Ok(())
	}

	/// Set every cell covered by `other` (shifted by the displacement) to `self AND NOT other`.
	pub fn overlay_and_not(&mut self, other: &VoxelGrid, dx: isize, dy: isize, dz: isize) -> Result<(), GridError> {
		check_grain(self, other)?;
		let window = Window::new(self.dims(), other.dims(), [dx, dy, dz]);
		self.apply_window(other, &window, false);
		Ok(())
	}

	/// Cell-wise AND with a grid of identical shape and placement.
	/// Misaligned grids are rejected and `self` is left untouched.
	pub fn intersect_exact(&mut self, other: &VoxelGrid) -> Result<(), GridError> {
		check_aligned(self, other)?;
		for (mut bit, keep) in self.data.iter_mut().zip(other.data.iter().by_vals()) {
			*bit = *bit && keep;
		}
		Ok(())
	}

	/// Cell-wise OR with a grid of identical shape and placement.
	pub fn union_exact(&mut self, other: &VoxelGrid) -> Result<(), GridError> {
		check_aligned(self, other)?;
		for (mut bit, add) in self.data.iter_mut().zip(other.data.iter().by_vals()) {
			*bit = *bit || add;
		}
		Ok(())
	}

	// Source cells that are set either fill (OR) or clear (AND NOT) their destination.
	fn apply_window(&mut self, other: &VoxelGrid, window: &Window, value: bool) {
		if window.is_empty() {
			return;
		}
		for z in window.z.clone() {
			let sz = window.source(2, z);
			for y in window.y.clone() {
				let sy = window.source(1, y);
				let dst_row = self.dim_x * (y + z * self.dim_y);
				let src_row = other.dim_x * (sy + sz * other.dim_y);
				for x in window.x.clone() {
					let sx = window.source(0, x);
					if other.data[src_row + sx] {
						self.data.set(dst_row + x, value);
					}
				}
			}
		}
	}
}
