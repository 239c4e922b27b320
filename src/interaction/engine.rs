//! The shared skeleton of every interaction kind: match, build footprint, stamp, subtract.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::interaction::config::{Interaction, InteractionKind, Pivot};
use crate::interaction::pattern::{Bubble, RingPlane, stacking, within_angle};
use crate::molecule::matcher::{Match, PatternMatcher};
use crate::molecule::model::Molecule;
use crate::parallel::{for_each_chunk, worker_count};
use crate::voxel_grid::grid::{Point, VoxelGrid};
use crate::voxel_grid::shared::SharedGrid;

impl Interaction {
	/// Stamp this interaction's footprint around every match into `support`.
	///
	/// `support` must be framed like the molecule grid. When `subtraction` is given it is
	/// removed from the result once every match has been stamped; a mask that is not aligned
	/// with `support` is skipped with a warning. Returns whether any match was placed; with
	/// no matches `support` is left as it was.
	pub fn compute<P: PatternMatcher>(
		&self,
		molecule: &P::Molecule,
		matcher: &P,
		support: &mut VoxelGrid,
		subtraction: Option<&VoxelGrid>,
		threads: usize,
	) -> bool {
		let matches = match matcher.find_matches(&self.pattern, molecule) {
			Ok(matches) => matches,
			Err(e) => {
				warn!("{e}");
				return false;
			}
		};
		if matches.is_empty() {
			debug!("No match for pattern '{}'", self.pattern);
			return false;
		}
		debug!("{} matches for {}", matches.len(), self.kind);

		let threads = worker_count(threads);
		let frame = *support.frame();
		let grain = frame.grain();
		let min_len = self.kind.min_match_len();

		let found = match self.kind {
			InteractionKind::Distance { distance } => {
				let bubble = Bubble::build(distance, &frame, threads, |_| true);
				stamp_matches(support, &matches, threads, |m| {
					let atoms = resolve(molecule, m, min_len)?;
					Some((atoms[0], Cow::Borrowed(&bubble)))
				})
			}
			InteractionKind::SingleAngle {
				distance,
				min_angle,
				max_angle,
				pivot,
			} => stamp_matches(support, &matches, threads, |m| {
				let atoms = resolve(molecule, m, min_len)?;
				let (center, anchor) = match pivot {
					Pivot::First => (atoms[0], atoms[1]),
					Pivot::Second => (atoms[1], atoms[0]),
				};
				let accept = within_angle(anchor - center, grain, min_angle, max_angle);
				Some((center, Cow::Owned(Bubble::build(distance, &frame, 1, accept))))
			}),
			InteractionKind::RingStacking {
				distance,
				min_centroid_angle,
				max_centroid_angle,
				intersect_radius,
			} => stamp_matches(support, &matches, threads, |m| {
				let atoms = resolve(molecule, m, min_len)?;
				let Some(plane) = RingPlane::fit(&atoms) else {
					warn!("Skipping degenerate ring {m:?}");
					return None;
				};
				let accept = stacking(plane, grain, min_centroid_angle, max_centroid_angle, intersect_radius);
				Some((plane.centroid, Cow::Owned(Bubble::build(distance, &frame, 1, accept))))
			}),
		};

		if found {
			if let Some(mask) = subtraction {
				subtract(support, mask);
			}
		}
		found
	}
}

/// Positions of a match's atoms; `None` when the match is too short or names an
/// atom the molecule does not have.
fn resolve<M: Molecule + ?Sized>(molecule: &M, m: &Match, min_len: usize) -> Option<Vec<Point>> {
	if m.len() < min_len {
		trace!("Skipping match {m:?}: needs {min_len} atoms");
		return None;
	}
	let positions: Option<Vec<Point>> = m.iter().map(|&i| molecule.atom_position(i)).collect();
	if positions.is_none() {
		warn!("Skipping match {m:?}: atom index out of range");
	}
	positions
}

/// Overlay one footprint per match onto `support`, concurrently across matches.
///
/// Stamps only ever set cells, so workers share the grid without locking; the grid is
/// consolidated after every worker has joined.
fn stamp_matches<'b, F>(support: &mut VoxelGrid, matches: &[Match], threads: usize, locate: F) -> bool
where
	F: Fn(&Match) -> Option<(Point, Cow<'b, Bubble>)> + Sync,
{
	let frame = *support.frame();
	let shared = SharedGrid::from_grid(support);
	let found = AtomicBool::new(false);

	for_each_chunk(matches, threads, |chunk| {
		for m in chunk {
			let Some((center, bubble)) = locate(m) else {
				continue;
			};
			found.store(true, Ordering::Relaxed);
			let [dx, dy, dz] = bubble.displacement_in(&frame, &center);
			if let Err(e) = shared.overlay_or(bubble.grid(), dx, dy, dz) {
				warn!("Could not stamp match {m:?}: {e}");
			}
		}
	});

	*support = shared.into_grid();
	found.into_inner()
}

fn subtract(support: &mut VoxelGrid, mask: &VoxelGrid) {
	if !support.is_aligned_with(mask) {
		warn!(
			"Subtraction mask {:?} is not aligned with support grid {:?}; keeping the molecule volume",
			mask.dims(),
			support.dims()
		);
		return;
	}
	if let Err(e) = support.overlay_and_not(mask, 0, 0, 0) {
		warn!("Could not subtract the molecule volume: {e}");
	}
}
