use bitvec::vec::BitVec;
use nalgebra as na;

use crate::error::GridError;

/// A position in continuous molecular space (length units, usually angstroms).
pub type Point = na::Vector3<f64>;

/// Lattice cells per unit length used when nothing else is configured.
pub const DEFAULT_GRAIN: u32 = 2;

/// Affine placement of a lattice in molecular space.
///
/// Cell `(gx, gy, gz)` sits at `(g - internal_displacement) / grain + global_displacement`
/// on each axis. Two grids can only be overlaid when their `grain` agrees; displacements
/// and dimensions are reconciled by the overlay itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
	grain: u32,
	global_displacement: Point,
	internal_displacement: isize,
}

impl Frame {
	pub fn new(grain: u32, global_displacement: Point, internal_displacement: isize) -> Result<Self, GridError> {
		if grain == 0 {
			return Err(GridError::ZeroGrain);
		}
		Ok(Self {
			grain,
			global_displacement,
			internal_displacement,
		})
	}

	/// Frame with no placement in molecular space, used for pattern footprints.
	pub fn unplaced(&self) -> Self {
		Self {
			grain: self.grain,
			global_displacement: Point::zeros(),
			internal_displacement: 0,
		}
	}

	#[inline]
	pub fn grain(&self) -> u32 {
		self.grain
	}

	#[inline]
	pub fn global_displacement(&self) -> &Point {
		&self.global_displacement
	}

	#[inline]
	pub fn internal_displacement(&self) -> isize {
		self.internal_displacement
	}

	/// Continuous lattice coordinates of a molecular position:
	/// `(p - global_displacement) * grain + internal_displacement` per axis.
	#[inline]
	pub fn lattice_coords(&self, p: &Point) -> Point {
		(p - self.global_displacement) * self.grain as f64 + Point::repeat(self.internal_displacement as f64)
	}
}

/// 3D occupancy lattice with bit-packed storage.
///
/// Dimensions and framing are fixed at construction; only the cell values change.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
	pub(crate) dim_x: usize,
	pub(crate) dim_y: usize,
	pub(crate) dim_z: usize,
	pub(crate) total_voxels: usize,
	pub(crate) frame: Frame,
	pub(crate) data: BitVec, // 1-bit per voxel, x fastest
}

impl VoxelGrid {
	/// Create a new grid, fully allocated with all voxels set to `false`
	pub fn new(dim_x: usize, dim_y: usize, dim_z: usize, frame: Frame) -> Self {
		let total_voxels = dim_x * dim_y * dim_z;

		Self {
			dim_x,
			dim_y,
			dim_z,
			total_voxels,
			frame,
			data: BitVec::repeat(false, total_voxels),
		}
	}

	/// Cubic grid of `side` cells per axis.
	pub fn cubic(side: usize, frame: Frame) -> Self {
		Self::new(side, side, side, frame)
	}

	/// Empty grid with the same dimensions and framing as `other`.
	pub fn with_frame_of(other: &VoxelGrid) -> Self {
		Self::new(other.dim_x, other.dim_y, other.dim_z, other.frame)
	}

	#[inline]
	pub fn dims(&self) -> (usize, usize, usize) {
		(self.dim_x, self.dim_y, self.dim_z)
	}

	#[inline]
	pub fn total_voxels(&self) -> usize {
		self.total_voxels
	}

	#[inline]
	pub fn frame(&self) -> &Frame {
		&self.frame
	}

	#[inline]
	pub fn grain(&self) -> u32 {
		self.frame.grain
	}

	/// True when both grids index the same cells at the same molecular positions.
	pub fn is_aligned_with(&self, other: &VoxelGrid) -> bool {
		self.dims() == other.dims() && self.frame == other.frame
	}
}
