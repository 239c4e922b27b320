use crate::voxel_grid::grid::{Point, VoxelGrid};

impl VoxelGrid {
	/// Continuous lattice coordinates of a molecular position in this grid
	#[inline]
	pub fn lattice_coords(&self, p: &Point) -> Point {
		self.frame.lattice_coords(p)
	}

	/// Molecular position of cell (x, y, z)
	#[inline]
	pub fn cell_to_point(&self, x: usize, y: usize, z: usize) -> Point {
		let g = self.grain() as f64;
		let pad = self.frame.internal_displacement() as f64;
		let origin = self.frame.global_displacement();
		Point::new(
			(x as f64 - pad) / g + origin.x,
			(y as f64 - pad) / g + origin.y,
			(z as f64 - pad) / g + origin.z,
		)
	}

	/// Nearest cell to a molecular position, `None` if it falls outside the grid
	pub fn point_to_cell(&self, p: &Point) -> Option<(usize, usize, usize)> {
		let c = self.lattice_coords(p).map(f64::round);
		if c.iter().any(|&v| v < 0.0) {
			return None;
		}
		let (x, y, z) = (c.x as usize, c.y as usize, c.z as usize);
		self.contains(x, y, z).then_some((x, y, z))
	}

	/// Occupancy of the cell nearest to `p`; positions outside the grid read as empty
	pub fn at_point(&self, p: &Point) -> bool {
		self.point_to_cell(p).is_some_and(|(x, y, z)| self.at(x, y, z))
	}

	/// One molecular-space point per filled voxel, x fastest.
	pub fn synthesize(&self) -> Vec<Point> {
		self.filled_cells()
			.map(|(x, y, z)| self.cell_to_point(x, y, z))
			.collect()
	}
}
