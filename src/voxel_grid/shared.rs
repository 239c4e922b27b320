use std::sync::atomic::{AtomicU8, Ordering};

use bitvec::vec::BitVec;

use crate::error::GridError;
use crate::voxel_grid::grid::{Frame, VoxelGrid};
use crate::voxel_grid::overlay::Window;

/// Thread-friendly twin of [`VoxelGrid`]: one atomic byte per cell, written through `&self`.
///
/// Writers only ever store `1`, so concurrent stamps from many threads commute and a
/// relaxed store is enough. Convert back with [`SharedGrid::into_grid`] once every writer
/// has joined.
pub struct SharedGrid {
	dim_x: usize,
	dim_y: usize,
	dim_z: usize,
	frame: Frame,
	cells: Vec<AtomicU8>,
}

impl SharedGrid {
	pub fn new(dim_x: usize, dim_y: usize, dim_z: usize, frame: Frame) -> Self {
		Self {
			dim_x,
			dim_y,
			dim_z,
			frame,
			cells: (0..dim_x * dim_y * dim_z).map(|_| AtomicU8::new(0)).collect(),
		}
	}

	pub fn from_grid(grid: &VoxelGrid) -> Self {
		Self {
			dim_x: grid.dim_x,
			dim_y: grid.dim_y,
			dim_z: grid.dim_z,
			frame: grid.frame,
			cells: grid.data.iter().by_vals().map(|v| AtomicU8::new(v as u8)).collect(),
		}
	}

	#[inline]
	pub fn dims(&self) -> (usize, usize, usize) {
		(self.dim_x, self.dim_y, self.dim_z)
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	/// Convert a linear index back to (x, y, z)
	#[inline]
	pub fn index_to_xyz(&self, index: usize) -> (usize, usize, usize) {
		let layer = self.dim_x * self.dim_y;
		(index % self.dim_x, (index % layer) / self.dim_x, index / layer)
	}

	/// Mark the cell at a linear index as filled
	#[inline]
	pub fn fill_index(&self, index: usize) {
		self.cells[index].store(1, Ordering::Relaxed);
	}

	/// Concurrent counterpart of [`VoxelGrid::overlay_or`], same windowing.
	pub fn overlay_or(&self, other: &VoxelGrid, dx: isize, dy: isize, dz: isize) -> Result<(), GridError> {
		if self.frame.grain() != other.grain() {
			return Err(GridError::GrainMismatch {
				expected: self.frame.grain(),
				found: other.grain(),
			});
		}
		let window = Window::new(self.dims(), other.dims(), [dx, dy, dz]);
		if window.is_empty() {
			return Ok(());
		}
		for z in window.z.clone() {
			let sz = window.source(2, z);
			for y in window.y.clone() {
				let sy = window.source(1, y);
				let dst_row = self.dim_x * (y + z * self.dim_y);
				let src_row = other.dim_x * (sy + sz * other.dim_y);
				for x in window.x.clone() {
					if other.data[src_row + window.source(0, x)] {
						self.cells[dst_row + x].store(1, Ordering::Relaxed);
					}
				}
			}
		}
		Ok(())
	}

	/// Consolidate into a bit-packed grid.
	pub fn into_grid(self) -> VoxelGrid {
		let mut bits = BitVec::with_capacity(self.cells.len());
		for cell in self.cells.iter() {
			bits.push(cell.load(Ordering::Relaxed) != 0);
		}
		let mut grid = VoxelGrid::new(self.dim_x, self.dim_y, self.dim_z, self.frame);
		grid.data = bits;
		grid
	}
}
