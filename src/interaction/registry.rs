//! The standard set of interaction classes, in output order.
//!
//! Patterns are residue/atom templates for [`TemplateMatcher`](crate::molecule::matcher::TemplateMatcher).
//! Each label names the partner that would occupy the region: the `Cationic` region
//! surrounds the structure's anions, `HBAcceptor` sits in front of its polar hydrogens.

use crate::interaction::config::{Interaction, Pivot};

const HYDROPHOBIC: &str = "(ALA|ARG|ASN|ASP|CYS|GLN|GLU|HIS|ILE|LEU|LYS|MET|PHE|PRO|THR|TRP|TYR|VAL)/CB; \
	(ARG|GLN|GLU|LEU|LYS|MET|PHE|PRO|TRP|TYR)/CG; \
	ILE/CG1|CG2|CD1; LEU/CD1|CD2; LYS/CD; MET/SD|CE; \
	(PHE|TYR)/CD1|CD2|CE1|CE2; PHE/CZ; THR/CG2; VAL/CG1|CG2; \
	TRP/CD2|CE3|CZ3|CH2|CZ2";

/// Polar hydrogen, then the donor it sits on. Every hydrogen starts its own match and is
/// the angle vertex.
const DONOR_HYDROGENS: &str = "*/H|HN|H1|H2|H3/N; SER/HG/OG; THR/HG1/OG1; TYR/HH/OH; \
	LYS/HZ[123]/NZ; ARG/HE/NE; ARG/HH[12][12]/NH[12]; TRP/HE1/NE1; \
	ASN/HD2[12]/ND2; GLN/HE2[12]/NE2; HIS/HD1/ND1; HIS/HE2/NE2; CYS/HG/SG; \
	(HOH|WAT)/H1|H2/O";

/// Acceptor before the heavy atom it is bonded to: the acceptor is the angle vertex
const ACCEPTORS: &str = "*/O/C; */OXT/C; ASP/OD1|OD2/CG; GLU/OE1|OE2/CD; ASN/OD1/CG; \
	GLN/OE1/CD; SER/OG/CB; THR/OG1/CB; TYR/OH/CZ; HIS/ND1|NE2/CE1; MET/SD/CG";

const ANIONS: &str = "ASP/OD1|OD2; GLU/OE1|OE2; */OXT";

const CATIONS: &str = "LYS/NZ; ARG/NE|NH1|NH2";

const METALS: &str = "(CA|CD|CO|CU|FE|FE2|MG|MN|NI|ZN|ZN2)/.*";

const METAL_LIGANDS: &str = "ASP/OD1|OD2; GLU/OE1|OE2; HIS/ND1|NE2; CYS/SG; */O; \
	ASN/OD1; GLN/OE1; SER/OG; THR/OG1; TYR/OH; (HOH|WAT)/O";

const AROMATIC_RINGS: &str = "(PHE|TYR)/CG/CD1/CD2/CE1/CE2/CZ; \
	TRP/CD2/CE2/CE3/CZ2/CZ3/CH2; HIS/CG/ND1/CD2/CE1/NE2";

#[derive(Debug, Clone)]
pub struct RegistryEntry {
	pub label: &'static str,
	pub interaction: Interaction,
}

/// Ordered `(label, interaction)` table.
#[derive(Debug, Clone)]
pub struct InteractionRegistry {
	entries: Vec<RegistryEntry>,
}

impl InteractionRegistry {
	pub fn new(entries: Vec<RegistryEntry>) -> Self {
		Self { entries }
	}

	pub fn standard() -> Self {
		let hbond_angle = (130f64.to_radians(), std::f64::consts::PI);
		let entry = |label, interaction| RegistryEntry { label, interaction };

		Self::new(vec![
			entry("Hydrophobic", Interaction::distance(HYDROPHOBIC, 4.5)),
			entry(
				"HBAcceptor",
				Interaction::single_angle(DONOR_HYDROGENS, hbond_angle, 3.5, Pivot::First),
			),
			entry(
				"HBDonor",
				Interaction::single_angle(ACCEPTORS, hbond_angle, 3.5, Pivot::First),
			),
			entry("Cationic", Interaction::distance(ANIONS, 4.5)),
			entry("Anionic", Interaction::distance(CATIONS, 4.5)),
			entry("MetalAcceptor", Interaction::distance(METALS, 2.8)),
			entry("MetalDonor", Interaction::distance(METAL_LIGANDS, 2.8)),
			entry(
				"PiStacking",
				Interaction::ring_stacking(AROMATIC_RINGS, 5.5, (0.0, 33f64.to_radians()), Some(1.5)),
			),
		])
	}

	pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
		self.entries.iter()
	}

	pub fn get(&self, label: &str) -> Option<&Interaction> {
		self.entries.iter().find(|e| e.label == label).map(|e| &e.interaction)
	}

	pub fn labels(&self) -> Vec<&'static str> {
		self.entries.iter().map(|e| e.label).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Default for InteractionRegistry {
	fn default() -> Self {
		Self::standard()
	}
}
