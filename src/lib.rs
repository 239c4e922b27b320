pub mod error;
pub mod parallel;
pub mod settings;

pub mod voxel_grid {
	pub mod info;
	pub mod grid;
	pub mod utils;
	pub mod overlay;
	pub mod shared;
	pub mod geometry;
	pub mod raster;
	pub mod synth;
}

pub mod molecule {
	pub mod model;
	pub mod pdb;
	pub mod matcher;
	pub mod pdb_output;
}

pub mod interaction {
	pub mod config;
	pub mod pattern;
	pub mod engine;
	pub mod registry;
}

pub use error::{GridError, InputError};
pub use interaction::config::{Interaction, InteractionKind, Pivot};
pub use interaction::registry::InteractionRegistry;
pub use settings::Settings;
pub use voxel_grid::grid::{Frame, Point, VoxelGrid};
