use crate::voxel_grid::grid::Point;

/// Read access to the 3D positions of a molecule's atoms.
pub trait Molecule {
	fn atom_count(&self) -> usize;

	/// Position of atom `index`, `None` if there is no such atom
	fn atom_position(&self, index: usize) -> Option<Point>;

	/// All positions, in atom order
	fn atom_positions(&self) -> Vec<Point> {
		(0..self.atom_count()).filter_map(|i| self.atom_position(i)).collect()
	}
}

impl Molecule for Vec<Point> {
	fn atom_count(&self) -> usize {
		self.len()
	}

	fn atom_position(&self, index: usize) -> Option<Point> {
		self.get(index).copied()
	}

	fn atom_positions(&self) -> Vec<Point> {
		self.clone()
	}
}

/// One ATOM/HETATM record of a parsed structure.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
	pub serial: usize,
	pub name: String,
	pub residue_name: String,
	pub residue_number: String,
	pub chain: String,
	pub element: String,
	pub hetatm: bool,
	pub position: Point,
}

impl AtomRecord {
	fn same_residue(&self, other: &AtomRecord) -> bool {
		self.chain == other.chain
			&& self.residue_number == other.residue_number
			&& self.residue_name == other.residue_name
	}
}

/// Atoms of a structure file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Structure {
	pub atoms: Vec<AtomRecord>,
}

impl Structure {
	pub fn new(atoms: Vec<AtomRecord>) -> Self {
		Self { atoms }
	}

	/// Atom indices grouped by residue; consecutive records of one residue form a group.
	pub fn residues(&self) -> Vec<Vec<usize>> {
		let mut groups: Vec<Vec<usize>> = Vec::new();
		for (index, atom) in self.atoms.iter().enumerate() {
			match groups.last_mut() {
				Some(group) if self.atoms[group[0]].same_residue(atom) => group.push(index),
				_ => groups.push(vec![index]),
			}
		}
		groups
	}
}

impl Molecule for Structure {
	fn atom_count(&self) -> usize {
		self.atoms.len()
	}

	fn atom_position(&self, index: usize) -> Option<Point> {
		self.atoms.get(index).map(|a| a.position)
	}
}
