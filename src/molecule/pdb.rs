use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::InputError;
use crate::molecule::model::{AtomRecord, Structure};
use crate::voxel_grid::grid::Point;

/// Residue classes that can be dropped while reading a structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
	pub exclude_water: bool,
	pub exclude_ions: bool,
	pub exclude_ligands: bool,
	pub exclude_hetatm: bool,
}

#[derive(Debug, Default)]
struct ResidueInfo {
	name: String,
	atom_count: usize,
	polymer: bool,
	hetatm_only: bool,
	elements: HashSet<String>,
}

const WATER_RESIDUES: &[&str] = &[
	"HOH", "H2O", "DOD", "WAT", "SOL", "TIP", "TIP3", "TIP3P", "TIP4", "TIP4P", "TIP5P", "SPC",
	"OH2",
];
const AMINO_RESIDUES: &[&str] = &[
	"ALA", "ARG", "ASN", "ASP", "ASX", "CYS", "GLN", "GLU", "GLX", "GLY", "HIS", "HID", "HIE",
	"HIP", "ILE", "LEU", "LYS", "MET", "MSE", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
	"SEC", "PYL", "ASH", "GLH",
];
const NUCLEIC_RESIDUES: &[&str] = &["A", "C", "G", "U", "I", "T", "DA", "DG", "DC", "DT", "DI", "DU"];
const ION_NAMES: &[&str] = &[
	"NA", "K", "MG", "MN", "FE", "FE2", "ZN", "ZN2", "CU", "CA", "CL", "BR", "I", "LI", "CO",
	"NI", "HG", "CD", "SR", "CS", "BA",
];

impl ResidueInfo {
	fn is_amino(&self) -> bool {
		AMINO_RESIDUES.contains(&self.name.as_str())
	}

	fn is_nucleic(&self) -> bool {
		NUCLEIC_RESIDUES.contains(&self.name.as_str())
	}

	fn is_water(&self) -> bool {
		WATER_RESIDUES.contains(&self.name.as_str()) || self.name.starts_with("HOH") || self.name.starts_with("TIP")
	}

	fn is_ion(&self) -> bool {
		if ION_NAMES.contains(&self.name.as_str()) {
			return true;
		}
		self.atom_count <= 1 && self.elements.iter().any(|e| ION_NAMES.contains(&e.as_str()))
	}

	fn is_ligand(&self) -> bool {
		!self.polymer && !self.is_water() && !self.is_ion()
	}

	fn filtered_by(&self, filters: &Filters) -> bool {
		(filters.exclude_water && self.is_water())
			|| (filters.exclude_ions && self.is_ion())
			|| (filters.exclude_ligands && self.is_ligand())
			|| (filters.exclude_hetatm && self.hetatm_only)
	}
}

fn residue_key(atom: &AtomRecord) -> String {
	format!("{}|{}|{}", atom.chain, atom.residue_number, atom.residue_name)
}

fn classify_residues(atoms: &[AtomRecord]) -> HashMap<String, ResidueInfo> {
	let mut residues: HashMap<String, ResidueInfo> = HashMap::new();
	for atom in atoms {
		let info = residues.entry(residue_key(atom)).or_insert_with(|| ResidueInfo {
			name: atom.residue_name.clone(),
			hetatm_only: true,
			..ResidueInfo::default()
		});
		info.atom_count += 1;
		if !atom.element.is_empty() {
			info.elements.insert(atom.element.clone());
		}
		if !atom.hetatm {
			info.polymer = true;
			info.hetatm_only = false;
		}
	}
	for info in residues.values_mut() {
		if info.is_amino() || info.is_nucleic() {
			info.polymer = true;
		}
	}
	residues
}

fn get_field(line: &str, start: usize, len: usize) -> &str {
	if line.len() <= start {
		return "";
	}
	let end = (start + len).min(line.len());
	line.get(start..end).unwrap_or("")
}

fn parse_coord(field: &str) -> Option<f64> {
	field.trim().parse::<f64>().ok()
}

/// Parse the ATOM/HETATM records of a PDB stream, in file order. Records with unreadable
/// coordinates are skipped.
fn parse_atom_records<R: BufRead>(reader: R) -> Result<Vec<AtomRecord>, InputError> {
	let mut atoms = Vec::new();
	for line in reader.lines() {
		let line = line?;
		let record = get_field(&line, 0, 6).trim().to_ascii_uppercase();
		if record != "ATOM" && record != "HETATM" {
			continue;
		}
		let (Some(x), Some(y), Some(z)) = (
			parse_coord(get_field(&line, 30, 8)),
			parse_coord(get_field(&line, 38, 8)),
			parse_coord(get_field(&line, 46, 8)),
		) else {
			continue;
		};
		let name = get_field(&line, 12, 4).trim().to_ascii_uppercase();
		let mut element = get_field(&line, 76, 2).trim().to_ascii_uppercase();
		if element.is_empty() {
			element = name.chars().find(|c| c.is_ascii_alphabetic()).map(String::from).unwrap_or_default();
		}
		atoms.push(AtomRecord {
			serial: get_field(&line, 6, 5).trim().parse().unwrap_or(atoms.len() + 1),
			name,
			residue_name: get_field(&line, 17, 3).trim().to_ascii_uppercase(),
			residue_number: get_field(&line, 22, 5).trim().to_string(),
			chain: get_field(&line, 21, 1).trim().to_string(),
			element,
			hetatm: record == "HETATM",
			position: Point::new(x, y, z),
		});
	}
	Ok(atoms)
}

/// Read a structure, dropping residues excluded by `filters`.
pub fn load_structure_from_reader<R: BufRead>(reader: R, filters: &Filters) -> Result<Structure, InputError> {
	let atoms = parse_atom_records(reader)?;
	let residues = classify_residues(&atoms);
	let total = atoms.len();

	let kept: Vec<AtomRecord> = atoms
		.into_iter()
		.filter(|atom| {
			residues
				.get(&residue_key(atom))
				.is_none_or(|info| !info.filtered_by(filters))
		})
		.collect();
	debug!("Read {total} atoms, kept {}", kept.len());
	Ok(Structure::new(kept))
}

/// Read a PDB file; a structure with no atoms left is an error.
pub fn load_structure_from_path(path: &Path, filters: &Filters) -> Result<Structure, InputError> {
	let file = File::open(path).map_err(|source| InputError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let structure = load_structure_from_reader(BufReader::new(file), filters)?;
	if structure.atoms.is_empty() {
		return Err(InputError::NoAtoms {
			path: path.to_path_buf(),
		});
	}
	Ok(structure)
}
