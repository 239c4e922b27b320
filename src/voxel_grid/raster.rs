use tracing::debug;

use crate::error::GridError;
use crate::molecule::model::Molecule;
use crate::parallel::{for_each_chunk, worker_count};
use crate::settings::Settings;
use crate::voxel_grid::geometry::GridParams;
use crate::voxel_grid::grid::{Point, VoxelGrid};
use crate::voxel_grid::shared::SharedGrid;

impl VoxelGrid {
	/// Rasterize a molecule: every atom becomes a filled sphere of `settings.atom_radius`.
	///
	/// This establishes the grid's placement in molecular space; every grid later combined
	/// with it copies that placement. Padding below the minimum is silently raised so that
	/// atoms on the bounding box still rasterize completely.
	pub fn discretize<M: Molecule + ?Sized>(molecule: &M, settings: &Settings) -> Result<Self, GridError> {
		let positions = molecule.atom_positions();
		let params = GridParams::from_positions(&positions, settings.effective_padding(), settings.grain)?;
		let grid = params.build_grid();

		let filled = SharedGrid::from_grid(&grid);
		let threads = worker_count(settings.threads);
		for_each_chunk(&positions, threads, |atoms| {
			for atom in atoms {
				grid.rasterize_sphere(&filled, atom, settings.atom_radius);
			}
		});

		let grid = filled.into_grid();
		debug!(
			"Discretized {} atoms into {} filled voxels",
			positions.len(),
			grid.count_filled()
		);
		Ok(grid)
	}

	/// Fill every cell whose squared distance to `center` is within `radius` (both scaled
	/// to cells). Only the sphere's bounding cube, clipped to the grid, is visited.
	fn rasterize_sphere(&self, out: &SharedGrid, center: &Point, radius: f64) {
		let g = self.grain() as f64;
		let scaled_radius = radius * g;
		if scaled_radius <= 0.0 {
			return;
		}
		let cutoff = scaled_radius * scaled_radius;
		let reach = scaled_radius.ceil() as isize;
		let c = self.lattice_coords(center);

		let range = |v: f64, dim: usize| {
			let lo = (v.floor() as isize - reach).clamp(0, dim as isize - 1);
			let hi = (v.ceil() as isize + reach).clamp(0, dim as isize - 1);
			lo as usize..=hi as usize
		};

		for z in range(c.z, self.dim_z) {
			let dz = z as f64 - c.z;
			let dz2 = dz * dz;
			for y in range(c.y, self.dim_y) {
				let dy = y as f64 - c.y;
				let dy2 = dy * dy;
				for x in range(c.x, self.dim_x) {
					let dx = x as f64 - c.x;
					if dx * dx + dy2 + dz2 <= cutoff {
						out.fill_index(self.xyz_to_index(x, y, z));
					}
				}
			}
		}
	}
}
