mod common;

use common::{FailingMatcher, StubMatcher, benzene, filled_points, molecule_grid};
use voxel_interactions::interaction::config::{Interaction, Pivot};
use voxel_interactions::molecule::pdb_output::{MemorySink, PointCloudSink};
use voxel_interactions::voxel_grid::grid::{Point, VoxelGrid};

fn two_atoms() -> Vec<Point> {
	vec![Point::new(0.0, 0.0, 0.0), Point::new(3.0, 0.0, 0.0)]
}

#[test]
fn distance_region_is_a_sphere_around_the_match() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);
	let mut support = VoxelGrid::with_frame_of(&mol);

	let interaction = Interaction::distance("first", 2.0);
	let found = interaction.compute(&molecule, &StubMatcher::new(vec![vec![0]]), &mut support, None, 2);
	assert!(found);

	// the footprint cube spans offsets -r..r-1 around the match cell, r = 2.0 * grain
	let centre = support.point_to_cell(&molecule[0]).unwrap();
	let r = 4isize;
	let mut expected = 0;
	for index in 0..support.total_voxels() {
		let (x, y, z) = support.index_to_xyz(index);
		let offset = [
			x as isize - centre.0 as isize,
			y as isize - centre.1 as isize,
			z as isize - centre.2 as isize,
		];
		let inside = offset.iter().all(|o| (-r..r).contains(o))
			&& offset.iter().map(|o| o * o).sum::<isize>() <= r * r;
		if inside {
			expected += 1;
		}
		assert_eq!(support.at(x, y, z), inside, "cell {:?}", (x, y, z));
	}
	assert_eq!(expected, 254);

	let points = filled_points(&support);
	assert_eq!(points.len(), expected);
	for (_, p) in &points {
		assert!(p.norm() <= 2.0 + 1e-9, "{p:?} outside the sphere");
	}
	let far = support.point_to_cell(&molecule[1]).unwrap();
	assert!(!support.at(far.0, far.1, far.2));

	let mut sink = MemorySink::default();
	sink.write_points("Distance", &support.synthesize()).unwrap();
	assert_eq!(sink.clouds.len(), 1);
	assert_eq!(sink.clouds[0].0, "Distance");
	assert_eq!(sink.clouds[0].1.len(), points.len());
}

#[test]
fn no_match_leaves_support_empty() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);

	for interaction in [
		Interaction::distance("none", 2.0),
		Interaction::single_angle("none", (0.0, 1.0), 2.0, Pivot::First),
		Interaction::ring_stacking("none", 2.0, (0.0, 0.5), None),
	] {
		let mut support = VoxelGrid::with_frame_of(&mol);
		assert!(!interaction.compute(&molecule, &StubMatcher::none(), &mut support, Some(&mol), 1));
		assert!(support.is_empty());
	}
}

#[test]
fn matcher_errors_count_as_not_found() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);
	let mut support = VoxelGrid::with_frame_of(&mol);
	assert!(!Interaction::distance("[", 2.0).compute(&molecule, &FailingMatcher, &mut support, None, 1));
	assert!(support.is_empty());
}

#[test]
fn unusable_matches_are_skipped() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);

	let mut support = VoxelGrid::with_frame_of(&mol);
	let angle = Interaction::single_angle("short", (0.0, 1.0), 2.0, Pivot::First);
	assert!(!angle.compute(&molecule, &StubMatcher::new(vec![vec![0]]), &mut support, None, 1));
	assert!(support.is_empty());

	let distance = Interaction::distance("bad index", 2.0);
	assert!(!distance.compute(&molecule, &StubMatcher::new(vec![vec![9]]), &mut support, None, 1));
	assert!(support.is_empty());

	// a good match alongside a bad one still counts
	assert!(distance.compute(&molecule, &StubMatcher::new(vec![vec![9], vec![1]]), &mut support, None, 1));
	assert!(!support.is_empty());
}

#[test]
fn pivot_selects_centre_and_vertex() {
	let molecule = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)];
	let mol = molecule_grid(&molecule, 2);
	let matcher = StubMatcher::new(vec![vec![0, 1]]);
	let behind = (std::f64::consts::FRAC_PI_2, std::f64::consts::PI);

	let mut first = VoxelGrid::with_frame_of(&mol);
	let interaction = Interaction::single_angle("pair", behind, 2.0, Pivot::First);
	assert!(interaction.compute(&molecule, &matcher, &mut first, None, 2));
	for (_, p) in filled_points(&first) {
		assert!(p.x <= 1e-9, "{p:?} in front of atom 0");
		assert!(p.norm() <= 2.0 + 1e-9);
	}
	assert!(first.at_point(&Point::new(-1.0, 0.0, 0.0)));

	let mut second = VoxelGrid::with_frame_of(&mol);
	let interaction = Interaction::single_angle("pair", behind, 2.0, Pivot::Second);
	assert!(interaction.compute(&molecule, &matcher, &mut second, None, 2));
	for (_, p) in filled_points(&second) {
		assert!(p.x >= 1.0 - 1e-9, "{p:?} in front of atom 1");
		assert!((p - molecule[1]).norm() <= 2.0 + 1e-9);
	}
	assert!(second.at_point(&Point::new(2.0, 0.0, 0.0)));
}

#[test]
fn ring_stacking_fills_both_faces() {
	let molecule = benzene();
	let mol = molecule_grid(&molecule, 2);
	let mut support = VoxelGrid::with_frame_of(&mol);
	let window = 33f64.to_radians();

	let interaction = Interaction::ring_stacking("ring", 2.0, (0.0, window), Some(1.5));
	let matcher = StubMatcher::new(vec![(0..6).collect()]);
	assert!(interaction.compute(&molecule, &matcher, &mut support, None, 2));

	let points = filled_points(&support);
	let (mut above, mut below) = (0, 0);
	for (_, p) in &points {
		let norm = p.norm();
		if norm < 1e-9 {
			continue;
		}
		assert!(norm <= 2.0 + 1e-9);
		assert!(p.z.abs() / norm >= window.cos() - 1e-6, "{p:?} outside the cone");
		assert!(p.xy().norm() <= 1.5 + 1e-9);
		if p.z > 0.0 {
			above += 1;
		} else {
			below += 1;
		}
	}
	assert!(above > 0 && below > 0);
	assert!(support.at_point(&Point::new(0.0, 0.0, 1.0)));
	assert!(support.at_point(&Point::new(0.0, 0.0, -1.0)));
	assert!(!support.at_point(&Point::new(1.0, 0.0, 0.0)));
}

#[test]
fn ring_matches_need_three_atoms() {
	let molecule = benzene();
	let mol = molecule_grid(&molecule, 2);
	let mut support = VoxelGrid::with_frame_of(&mol);
	let interaction = Interaction::ring_stacking("ring", 2.0, (0.0, 0.5), None);
	assert!(!interaction.compute(&molecule, &StubMatcher::new(vec![vec![0, 1]]), &mut support, None, 1));
	assert!(support.is_empty());
}

#[test]
fn subtraction_removes_the_molecule_volume() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);
	let interaction = Interaction::distance("both", 2.0);
	let matcher = StubMatcher::new(vec![vec![0], vec![1]]);

	let mut kept = VoxelGrid::with_frame_of(&mol);
	assert!(interaction.compute(&molecule, &matcher, &mut kept, None, 2));
	let mut subtracted = VoxelGrid::with_frame_of(&mol);
	assert!(interaction.compute(&molecule, &matcher, &mut subtracted, Some(&mol), 2));

	assert!(subtracted.count_filled() < kept.count_filled());
	for index in 0..mol.total_voxels() {
		let (x, y, z) = mol.index_to_xyz(index);
		assert_eq!(subtracted.at(x, y, z), kept.at(x, y, z) && !mol.at(x, y, z));
	}
}

#[test]
fn misaligned_mask_is_not_subtracted() {
	let molecule = two_atoms();
	let mol = molecule_grid(&molecule, 2);
	let interaction = Interaction::distance("first", 2.0);
	let matcher = StubMatcher::new(vec![vec![0]]);

	let mut mask = VoxelGrid::new(3, 3, 3, *mol.frame());
	for index in 0..mask.total_voxels() {
		let (x, y, z) = mask.index_to_xyz(index);
		mask.fill(x, y, z);
	}

	let mut plain = VoxelGrid::with_frame_of(&mol);
	interaction.compute(&molecule, &matcher, &mut plain, None, 1);
	let mut masked = VoxelGrid::with_frame_of(&mol);
	assert!(interaction.compute(&molecule, &matcher, &mut masked, Some(&mask), 1));
	assert_eq!(masked.synthesize(), plain.synthesize());
}

#[test]
fn thread_count_does_not_change_the_result() {
	let molecule: Vec<Point> = (0..12)
		.map(|i| Point::new(i as f64 * 0.7, (i % 3) as f64, (i % 4) as f64 * 0.5))
		.collect();
	let mol = molecule_grid(&molecule, 2);
	let matcher = StubMatcher::new((0..12).map(|i| vec![i, (i + 1) % 12]).collect());

	for interaction in [
		Interaction::distance("all", 1.5),
		Interaction::single_angle("all", (0.0, 2.0), 1.5, Pivot::Second),
	] {
		let mut serial = VoxelGrid::with_frame_of(&mol);
		interaction.compute(&molecule, &matcher, &mut serial, Some(&mol), 1);
		let mut parallel = VoxelGrid::with_frame_of(&mol);
		interaction.compute(&molecule, &matcher, &mut parallel, Some(&mol), 4);
		assert_eq!(serial.synthesize(), parallel.synthesize());
	}
}
