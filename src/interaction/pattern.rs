//! Canonical footprints ("bubbles") stamped around every match.
//!
//! A bubble is a cube of side `2 * ceil(distance * grain)` whose cell `(r, r, r)` is the
//! reference point. A cell is set when its squared offset from the centre is within
//! `(distance * grain)^2` and the interaction's extra predicate accepts the offset.

use nalgebra as na;

use crate::parallel::for_each_range;
use crate::voxel_grid::grid::{Frame, Point, VoxelGrid};
use crate::voxel_grid::shared::SharedGrid;

/// Cell offset from the bubble centre
pub type Offset = [isize; 3];

#[derive(Debug, Clone)]
pub struct Bubble {
	grid: VoxelGrid,
	radius_cells: usize,
}

impl Bubble {
	/// Half side of the bubble, in cells
	pub fn radius_cells(distance: f64, grain: u32) -> usize {
		(distance * grain as f64).ceil().max(0.0) as usize
	}

	/// Populate a bubble for `distance` using `threads` workers. `accept` refines the
	/// sphere; pass `|_| true` for a plain sphere.
	pub fn build<P>(distance: f64, frame: &Frame, threads: usize, accept: P) -> Self
	where
		P: Fn(Offset) -> bool + Sync,
	{
		let radius_cells = Self::radius_cells(distance, frame.grain());
		let side = 2 * radius_cells;
		let scaled = distance * frame.grain() as f64;
		let cutoff = scaled * scaled;
		let r = radius_cells as isize;

		let cells = SharedGrid::new(side, side, side, frame.unplaced());
		for_each_range(cells.len(), threads, |range| {
			for index in range {
				let (x, y, z) = cells.index_to_xyz(index);
				let offset = [x as isize - r, y as isize - r, z as isize - r];
				let d2 = offset.iter().map(|&o| o * o).sum::<isize>() as f64;
				if d2 <= cutoff && accept(offset) {
					cells.fill_index(index);
				}
			}
		});

		Self {
			grid: cells.into_grid(),
			radius_cells,
		}
	}

	#[inline]
	pub fn grid(&self) -> &VoxelGrid {
		&self.grid
	}

	#[inline]
	pub fn radius(&self) -> usize {
		self.radius_cells
	}

	/// Integer displacement that puts the bubble centre on `point` in a grid framed by `frame`:
	/// `round((point - global) * grain + (internal - radius))`.
	pub fn displacement_in(&self, frame: &Frame, point: &Point) -> Offset {
		let c = frame.lattice_coords(point) - Point::repeat(self.radius_cells as f64);
		[c.x.round() as isize, c.y.round() as isize, c.z.round() as isize]
	}
}

/// Molecular-space vector of a cell offset
#[inline]
pub fn offset_vector(offset: Offset, grain: u32) -> Point {
	Point::new(offset[0] as f64, offset[1] as f64, offset[2] as f64) / grain as f64
}

/// Accept offsets `v` (taken from the pivot) whose angle to `axis` lies in `[min, max]`.
pub fn within_angle(axis: Point, grain: u32, min: f64, max: f64) -> impl Fn(Offset) -> bool + Sync {
	move |offset| {
		let angle = axis.angle(&offset_vector(offset, grain));
		angle >= min && angle <= max
	}
}

/// Least-squares plane through a ring's atoms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingPlane {
	pub centroid: Point,
	/// Unit normal
	pub normal: Point,
}

impl RingPlane {
	/// Centroid and plane normal of at least three positions, from the SVD of the
	/// centred coordinates. `None` for fewer than three atoms or a degenerate fit.
	pub fn fit(positions: &[Point]) -> Option<Self> {
		if positions.len() < 3 {
			return None;
		}

		let mut coords = na::Matrix3xX::<f64>::from_columns(positions);
		let centroid: Point = coords.column_mean();
		for mut column in coords.column_iter_mut() {
			column -= centroid;
		}

		let svd = coords.svd(true, false);
		let normal: Point = svd.u?.column(2).clone_owned();
		let norm = normal.norm();
		if !norm.is_finite() || norm == 0.0 {
			return None;
		}
		Some(Self {
			centroid,
			normal: normal / norm,
		})
	}

	/// Angle between the normal and `v`, folded into `[0, pi/2]` so both faces count
	pub fn normal_angle(&self, v: &Point) -> f64 {
		let angle = self.normal.angle(v);
		angle.min(std::f64::consts::PI - angle)
	}

	/// Distance from the centroid of `v`'s projection onto the ring plane
	pub fn in_plane_offset(&self, v: &Point) -> f64 {
		(v - self.normal * self.normal.dot(v)).norm()
	}
}

/// Accept offsets (taken from the ring centroid) above or below the ring face.
pub fn stacking(
	plane: RingPlane,
	grain: u32,
	min: f64,
	max: f64,
	intersect_radius: Option<f64>,
) -> impl Fn(Offset) -> bool + Sync {
	move |offset| {
		let v = offset_vector(offset, grain);
		let angle = plane.normal_angle(&v);
		if angle < min || angle > max {
			return false;
		}
		intersect_radius.is_none_or(|r| plane.in_plane_offset(&v) <= r)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::{FRAC_PI_2, PI};

	fn frame(grain: u32) -> Frame {
		Frame::new(grain, Point::zeros(), 0).unwrap()
	}

	#[test]
	fn sphere_predicate_is_exact() {
		for (distance, grain) in [(1.0, 2), (1.5, 2), (0.8, 3), (2.0, 1)] {
			let bubble = Bubble::build(distance, &frame(grain), 3, |_| true);
			let r = Bubble::radius_cells(distance, grain);
			assert_eq!(bubble.grid().dims(), (2 * r, 2 * r, 2 * r));

			let limit = (distance * grain as f64).powi(2);
			for (x, y, z) in (0..bubble.grid().total_voxels()).map(|i| bubble.grid().index_to_xyz(i)) {
				let d2 = [x, y, z].iter().map(|&c| (c as f64 - r as f64).powi(2)).sum::<f64>();
				assert_eq!(bubble.grid().at(x, y, z), d2 <= limit, "d = {distance}, grain = {grain}, cell ({x}, {y}, {z})");
			}
		}
	}

	#[test]
	fn unit_sphere_at_grain_two() {
		let bubble = Bubble::build(1.0, &frame(2), 1, |_| true);
		assert_eq!(bubble.radius(), 2);
		assert_eq!(bubble.grid().dims(), (4, 4, 4));
		// centre at (2, 2, 2): the centre, 6 face neighbours at 1, 12 edges at sqrt 2,
		// 8 corners at sqrt 3, and the 3 axis cells at distance 2 on the low side
		assert_eq!(bubble.grid().count_filled(), 1 + 6 + 12 + 8 + 3);
		assert!(bubble.grid().at(2, 2, 2));
		assert!(bubble.grid().at(0, 2, 2));
		assert!(!bubble.grid().at(0, 0, 2));
	}

	#[test]
	fn serial_and_parallel_population_agree() {
		let axis = Point::new(1.0, 1.0, 0.0);
		let serial = Bubble::build(6.5, &frame(2), 1, within_angle(axis, 2, 0.0, 1.0));
		let parallel = Bubble::build(6.5, &frame(2), 8, within_angle(axis, 2, 0.0, 1.0));
		assert_eq!(serial.grid().data, parallel.grid().data);
	}

	#[test]
	fn zero_distance_gives_an_empty_bubble() {
		let bubble = Bubble::build(0.0, &frame(2), 2, |_| true);
		assert_eq!(bubble.grid().total_voxels(), 0);
	}

	#[test]
	fn displacement_centres_the_bubble() {
		let support = Frame::new(2, Point::new(-2.0, 0.0, 5.0), 4).unwrap();
		let bubble = Bubble::build(1.0, &frame(2), 1, |_| true);
		// (-2,0,5) maps to lattice (4,4,4); centre cell 2 lands there
		assert_eq!(bubble.displacement_in(&support, &Point::new(-2.0, 0.0, 5.0)), [2, 2, 2]);
		assert_eq!(bubble.displacement_in(&support, &Point::new(-1.3, 0.0, 4.0)), [3, 2, 0]);
	}

	#[test]
	fn angle_window_selects_half_space() {
		let axis = Point::new(1.0, 0.0, 0.0);
		let behind = within_angle(axis, 2, FRAC_PI_2, PI);
		assert!(behind([-2, 0, 0]));
		assert!(behind([0, 3, 0]));
		assert!(!behind([1, 0, 0]));
		assert!(!behind([2, 1, 1]));
	}

	#[test]
	fn plane_fit_recovers_ring_normal() {
		let ring: Vec<Point> = (0..6)
			.map(|i| {
				let t = i as f64 * PI / 3.0;
				Point::new(3.0 + 1.4 * t.cos(), -1.0, 2.0 + 1.4 * t.sin())
			})
			.collect();
		let plane = RingPlane::fit(&ring).unwrap();
		assert!((plane.centroid - Point::new(3.0, -1.0, 2.0)).norm() < 1e-9);
		assert!((plane.normal.y.abs() - 1.0).abs() < 1e-9);
		assert!(RingPlane::fit(&ring[..2]).is_none());
	}

	#[test]
	fn stacking_accepts_points_over_either_face() {
		let plane = RingPlane {
			centroid: Point::zeros(),
			normal: Point::new(0.0, 0.0, 1.0),
		};
		let cone = stacking(plane, 2, 0.0, 33f64.to_radians(), None);
		assert!(cone([0, 0, 6]));
		assert!(cone([0, 0, -6]));
		assert!(cone([2, 1, 6]));
		assert!(!cone([6, 0, 1]));

		let restricted = stacking(plane, 2, 0.0, 33f64.to_radians(), Some(1.0));
		assert!(restricted([1, 1, 7]));
		assert!(!restricted([3, 0, 7]));
	}
}
