#![allow(dead_code)]

use voxel_interactions::error::InputError;
use voxel_interactions::molecule::matcher::{Match, PatternMatcher};
use voxel_interactions::settings::Settings;
use voxel_interactions::voxel_grid::grid::{Point, VoxelGrid};

/// Returns the same matches for every pattern.
pub struct StubMatcher {
	pub matches: Vec<Match>,
}

impl StubMatcher {
	pub fn new(matches: Vec<Match>) -> Self {
		Self { matches }
	}

	pub fn none() -> Self {
		Self::new(Vec::new())
	}
}

impl PatternMatcher for StubMatcher {
	type Molecule = Vec<Point>;

	fn find_matches(&self, _pattern: &str, _molecule: &Vec<Point>) -> Result<Vec<Match>, InputError> {
		Ok(self.matches.clone())
	}
}

/// Rejects every pattern.
pub struct FailingMatcher;

impl PatternMatcher for FailingMatcher {
	type Molecule = Vec<Point>;

	fn find_matches(&self, pattern: &str, _molecule: &Vec<Point>) -> Result<Vec<Match>, InputError> {
		Err(InputError::BadPattern {
			pattern: pattern.to_string(),
			reason: "stub".to_string(),
		})
	}
}

pub fn settings(grain: u32) -> Settings {
	Settings {
		grain,
		threads: 2,
		..Settings::default()
	}
}

pub fn molecule_grid(positions: &Vec<Point>, grain: u32) -> VoxelGrid {
	VoxelGrid::discretize(positions, &settings(grain)).unwrap()
}

/// Positions of every filled cell, paired with the cell
pub fn filled_points(grid: &VoxelGrid) -> Vec<((usize, usize, usize), Point)> {
	grid.filled_cells()
		.map(|(x, y, z)| ((x, y, z), grid.cell_to_point(x, y, z)))
		.collect()
}

/// Regular hexagon of radius 1.4 in the z = 0 plane, centred on the origin
pub fn benzene() -> Vec<Point> {
	(0..6)
		.map(|i| {
			let a = i as f64 * std::f64::consts::FRAC_PI_3;
			Point::new(1.4 * a.cos(), 1.4 * a.sin(), 0.0)
		})
		.collect()
}
