use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridError {
	#[error("Grain must be at least one cell per unit length")]
	ZeroGrain,

	#[error("Grids use different grains: expected {expected}, found {found}")]
	GrainMismatch { expected: u32, found: u32 },

	#[error("Grids are not aligned: expected {expected:?}, found {found:?}")]
	ShapeMismatch {
		expected: (usize, usize, usize),
		found: (usize, usize, usize),
	},

	#[error("Grids share dimensions but are placed differently in molecular space")]
	FrameMismatch,

	#[error("Cannot discretize a molecule without atoms")]
	NoAtoms,

	#[error("Padding of {padding} units at grain {grain} does not fit on the lattice")]
	PaddingOverflow { padding: usize, grain: u32 },
}

#[derive(Debug, Error)]
pub enum InputError {
	#[error("Failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("I/O error while parsing structure: {0}")]
	Parse(#[from] io::Error),

	#[error("No atoms left in {} after filtering", path.display())]
	NoAtoms { path: PathBuf },

	#[error("Invalid pattern '{pattern}': {reason}")]
	BadPattern { pattern: String, reason: String },
}
