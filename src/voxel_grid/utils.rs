use std::mem::size_of;

use bitvec::prelude::BitVec;
use tracing::debug;

use crate::voxel_grid::grid::VoxelGrid;

/// Format large numbers with KB, MB, GB suffixes
fn format_bytes(bytes: usize) -> String {
	const KB: usize = 1024;
	const MB: usize = KB * 1024;
	const GB: usize = MB * 1024;

	if bytes >= GB {
		format!("{:.2} GB", bytes as f64 / GB as f64)
	} else if bytes >= MB {
		format!("{:.2} MB", bytes as f64 / MB as f64)
	} else if bytes >= KB {
		format!("{:.2} KB", bytes as f64 / KB as f64)
	} else {
		format!("{} bytes", bytes)
	}
}

impl VoxelGrid {
	/// Log dimensions, framing and memory footprint at debug level
	pub fn report_memory(&self, label: &str) {
		let struct_overhead = size_of::<Self>() - size_of::<BitVec>();
		let bitvec_bytes = self.data.capacity() / 8;

		let origin = self.frame.global_displacement();
		debug!(
			"{label}: {} x {} x {} ({:e} voxels), grain {}, origin ({:.2}, {:.2}, {:.2}), padding {} cells, {}",
			self.dim_x,
			self.dim_y,
			self.dim_z,
			self.total_voxels as f64,
			self.frame.grain(),
			origin.x,
			origin.y,
			origin.z,
			self.frame.internal_displacement(),
			format_bytes(struct_overhead + bitvec_bytes)
		);
	}

	/// Convert (x, y, z) to a linear index
	#[inline]
	pub fn xyz_to_index(&self, x: usize, y: usize, z: usize) -> usize {
		debug_assert!(
			x < self.dim_x && y < self.dim_y && z < self.dim_z,
			"cell ({x}, {y}, {z}) outside {:?}",
			self.dims()
		);
		x + self.dim_x * (y + z * self.dim_y)
	}

	/// Convert a linear index back to (x, y, z)
	#[inline]
	pub fn index_to_xyz(&self, index: usize) -> (usize, usize, usize) {
		let layer = self.dim_x * self.dim_y;
		let z = index / layer;
		let y = (index % layer) / self.dim_x;
		let x = index % self.dim_x;
		(x, y, z)
	}

	#[inline]
	pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
		x < self.dim_x && y < self.dim_y && z < self.dim_z
	}

	/// Voxel value at (x, y, z). Panics if the cell is outside the grid.
	#[inline]
	pub fn at(&self, x: usize, y: usize, z: usize) -> bool {
		assert!(self.contains(x, y, z), "cell ({x}, {y}, {z}) outside {:?}", self.dims());
		self.data[self.xyz_to_index(x, y, z)]
	}

	/// Voxel value at (x, y, z), or `None` outside the grid
	#[inline]
	pub fn get(&self, x: usize, y: usize, z: usize) -> Option<bool> {
		if self.contains(x, y, z) {
			Some(self.data[self.xyz_to_index(x, y, z)])
		} else {
			None
		}
	}

	/// Set a voxel value. Panics if the cell is outside the grid.
	#[inline]
	pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
		assert!(self.contains(x, y, z), "cell ({x}, {y}, {z}) outside {:?}", self.dims());
		let index = self.xyz_to_index(x, y, z);
		self.data.set(index, value);
	}

	/// Set a voxel to `true`
	#[inline]
	pub fn fill(&mut self, x: usize, y: usize, z: usize) {
		self.set(x, y, z, true);
	}

	/// Zero out the entire grid
	pub fn clear(&mut self) {
		self.data.fill(false);
	}

	/// Count the number of filled voxels
	pub fn count_filled(&self) -> usize {
		self.data.count_ones()
	}

	pub fn is_empty(&self) -> bool {
		self.data.not_any()
	}

	/// Coordinates of every filled voxel, x fastest
	pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
		self.data.iter_ones().map(|index| self.index_to_xyz(index))
	}
}
