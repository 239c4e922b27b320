//! Run-wide configuration shared by discretization and the interaction engines.

use crate::voxel_grid::grid::DEFAULT_GRAIN;

/// Radius used for every atom when rasterizing a molecule, in length units
pub const ATOM_RADIUS: f64 = 1.1;
/// Smallest padding (length units) that keeps a boundary atom's sphere inside the grid
pub const MIN_PADDING: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
	/// Lattice cells per unit length, shared by every grid of a run
	pub grain: u32,
	/// Border added around the molecule's bounding box, in length units
	pub padding: usize,
	/// Radius of each rasterized atom
	pub atom_radius: f64,
	/// Worker threads; zero means use the available parallelism
	pub threads: usize,
	/// Remove the molecule's own volume from every interaction region
	pub subtract_molecule: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			grain: DEFAULT_GRAIN,
			padding: MIN_PADDING,
			atom_radius: ATOM_RADIUS,
			threads: 0,
			subtract_molecule: true,
		}
	}
}

impl Settings {
	/// Padding actually applied: requests below [`MIN_PADDING`] are raised to it.
	pub fn effective_padding(&self) -> usize {
		self.padding.max(MIN_PADDING)
	}
}
