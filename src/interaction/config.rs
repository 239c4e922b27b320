use std::fmt;

/// Which of the first two matched atoms is the distance centre and angle vertex.
/// The other one is the anchor that fixes the reference direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
	First,
	Second,
}

/// Geometric predicate of an interaction. Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
	/// Everything within `distance` of the first matched atom
	Distance { distance: f64 },
	/// Within `distance` of the pivot, and the angle anchor-pivot-point in `[min_angle, max_angle]`
	SingleAngle {
		distance: f64,
		min_angle: f64,
		max_angle: f64,
		pivot: Pivot,
	},
	/// Within `distance` of the ring centroid, the angle between ring normal and
	/// centroid-to-point (folded into `[0, pi/2]`) in `[min_centroid_angle, max_centroid_angle]`,
	/// and optionally projecting onto the ring plane within `intersect_radius` of the centroid
	RingStacking {
		distance: f64,
		min_centroid_angle: f64,
		max_centroid_angle: f64,
		intersect_radius: Option<f64>,
	},
}

impl InteractionKind {
	/// Reference distance, which also sets the footprint size
	pub fn distance(&self) -> f64 {
		match *self {
			InteractionKind::Distance { distance }
			| InteractionKind::SingleAngle { distance, .. }
			| InteractionKind::RingStacking { distance, .. } => distance,
		}
	}

	/// Atoms a match needs before it can be placed
	pub fn min_match_len(&self) -> usize {
		match self {
			InteractionKind::Distance { .. } => 1,
			InteractionKind::SingleAngle { .. } => 2,
			InteractionKind::RingStacking { .. } => 3,
		}
	}
}

/// A pattern handed to the matcher plus the geometry stamped around each match.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
	pub pattern: String,
	pub kind: InteractionKind,
}

impl Interaction {
	pub fn distance(pattern: &str, distance: f64) -> Self {
		Self {
			pattern: pattern.to_string(),
			kind: InteractionKind::Distance { distance },
		}
	}

	pub fn single_angle(pattern: &str, angle: (f64, f64), distance: f64, pivot: Pivot) -> Self {
		Self {
			pattern: pattern.to_string(),
			kind: InteractionKind::SingleAngle {
				distance,
				min_angle: angle.0,
				max_angle: angle.1,
				pivot,
			},
		}
	}

	pub fn ring_stacking(pattern: &str, distance: f64, centroid_angle: (f64, f64), intersect_radius: Option<f64>) -> Self {
		Self {
			pattern: pattern.to_string(),
			kind: InteractionKind::RingStacking {
				distance,
				min_centroid_angle: centroid_angle.0,
				max_centroid_angle: centroid_angle.1,
				intersect_radius,
			},
		}
	}
}

impl fmt::Display for InteractionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InteractionKind::Distance { distance } => write!(f, "distance <= {distance}"),
			InteractionKind::SingleAngle {
				distance,
				min_angle,
				max_angle,
				pivot,
			} => write!(
				f,
				"distance <= {distance}, angle {:.1}..{:.1} deg at {pivot:?} atom",
				min_angle.to_degrees(),
				max_angle.to_degrees()
			),
			InteractionKind::RingStacking {
				distance,
				min_centroid_angle,
				max_centroid_angle,
				intersect_radius,
			} => {
				write!(
					f,
					"ring distance <= {distance}, normal angle {:.1}..{:.1} deg",
					min_centroid_angle.to_degrees(),
					max_centroid_angle.to_degrees()
				)?;
				if let Some(r) = intersect_radius {
					write!(f, ", in-plane offset <= {r}")?;
				}
				Ok(())
			}
		}
	}
}
