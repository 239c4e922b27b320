use crate::error::GridError;
use crate::voxel_grid::grid::{Frame, Point, VoxelGrid};

/// Axis-aligned bounding box of a set of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
	pub min: Point,
	pub max: Point,
}

impl Bounds {
	pub fn from_positions(positions: &[Point]) -> Option<Self> {
		let first = positions.first()?;
		let mut min = *first;
		let mut max = *first;
		for pos in &positions[1..] {
			min = min.inf(pos);
			max = max.sup(pos);
		}
		Some(Self { min, max })
	}
}

/// Grid parameters derived from a molecule's bounds, padding and grain.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
	/// Cell of `floor(min)` on each axis, before padding
	pub min_cell: [i64; 3],
	/// Cell of `ceil(max)` on each axis, before padding
	pub max_cell: [i64; 3],
	pub dim_x: usize,
	pub dim_y: usize,
	pub dim_z: usize,
	pub frame: Frame,
}

impl GridParams {
	/// Snap the bounds outwards to whole length units, then add `padding` units per side.
	pub fn from_positions(positions: &[Point], padding: usize, grain: u32) -> Result<Self, GridError> {
		let bounds = Bounds::from_positions(positions).ok_or(GridError::NoAtoms)?;
		let origin = bounds.min.map(f64::floor);
		let overflow = GridError::PaddingOverflow { padding, grain };
		let pad_cells = padding
			.checked_mul(grain as usize)
			.and_then(|cells| isize::try_from(cells).ok())
			.ok_or(overflow.clone())?;
		let frame = Frame::new(grain, origin, pad_cells)?;

		let g = grain as f64;
		let min_cell = [
			(origin.x * g) as i64,
			(origin.y * g) as i64,
			(origin.z * g) as i64,
		];
		let max_cell = [
			(bounds.max.x.ceil() * g) as i64,
			(bounds.max.y.ceil() * g) as i64,
			(bounds.max.z.ceil() * g) as i64,
		];
		let border = (pad_cells as i64).checked_mul(2).ok_or(overflow.clone())?;
		let dim = |axis: usize| {
			(max_cell[axis] - min_cell[axis])
				.checked_add(border)
				.and_then(|cells| usize::try_from(cells).ok())
				.ok_or(overflow.clone())
		};

		Ok(Self {
			min_cell,
			max_cell,
			dim_x: dim(0)?,
			dim_y: dim(1)?,
			dim_z: dim(2)?,
			frame,
		})
	}

	/// Instantiate an empty `VoxelGrid` using these parameters.
	pub fn build_grid(&self) -> VoxelGrid {
		VoxelGrid::new(self.dim_x, self.dim_y, self.dim_z, self.frame)
	}
}
