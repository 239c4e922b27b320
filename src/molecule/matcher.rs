use regex::Regex;

use crate::error::InputError;
use crate::molecule::model::{Molecule, Structure};

/// Ordered atom indices of one pattern occurrence
pub type Match = Vec<usize>;

/// Finds occurrences of a pattern in a molecule. What a pattern means is entirely up to
/// the implementation; callers only consume the returned indices.
pub trait PatternMatcher {
	type Molecule: Molecule + Sync + ?Sized;

	fn find_matches(&self, pattern: &str, molecule: &Self::Molecule) -> Result<Vec<Match>, InputError>;
}

/// Matches residue/atom-name templates against a [`Structure`].
///
/// A pattern is a `;`-separated list of alternatives `RESIDUE/ATOM[/ATOM...]`, each part an
/// anchored regular expression (`*` alone matches any residue). Every atom matching the
/// first atom expression in a matching residue starts a match; each further expression
/// adds the nearest not-yet-used atom of the same residue matching it. Starts that cannot
/// be completed are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateMatcher;

#[derive(Debug)]
struct Template {
	residue: Regex,
	atoms: Vec<Regex>,
}

fn anchored(pattern: &str, expr: &str) -> Result<Regex, InputError> {
	Regex::new(&format!("^(?:{expr})$")).map_err(|e| InputError::BadPattern {
		pattern: pattern.to_string(),
		reason: e.to_string(),
	})
}

fn parse_templates(pattern: &str) -> Result<Vec<Template>, InputError> {
	let bad = |reason: &str| InputError::BadPattern {
		pattern: pattern.to_string(),
		reason: reason.to_string(),
	};

	let mut templates = Vec::new();
	for alternative in pattern.split(';').map(str::trim).filter(|a| !a.is_empty()) {
		let mut parts = alternative.split('/').map(str::trim);
		let residue = match parts.next() {
			Some("*") => ".*",
			Some(expr) => expr,
			None => return Err(bad("missing residue")),
		};
		let atoms = parts.map(|expr| anchored(pattern, expr)).collect::<Result<Vec<_>, _>>()?;
		if atoms.is_empty() {
			return Err(bad("alternative without atom names"));
		}
		templates.push(Template {
			residue: anchored(pattern, residue)?,
			atoms,
		});
	}
	if templates.is_empty() {
		return Err(bad("empty pattern"));
	}
	Ok(templates)
}

impl PatternMatcher for TemplateMatcher {
	type Molecule = Structure;

	fn find_matches(&self, pattern: &str, structure: &Structure) -> Result<Vec<Match>, InputError> {
		let templates = parse_templates(pattern)?;
		let residues = structure.residues();
		let atoms = &structure.atoms;
		let mut matches = Vec::new();

		for template in &templates {
			for group in &residues {
				if !template.residue.is_match(&atoms[group[0]].residue_name) {
					continue;
				}
				'start: for &first in group.iter().filter(|&&i| template.atoms[0].is_match(&atoms[i].name)) {
					let origin = atoms[first].position;
					let mut tuple = vec![first];
					for expr in &template.atoms[1..] {
						let next = group
							.iter()
							.copied()
							.filter(|i| !tuple.contains(i) && expr.is_match(&atoms[*i].name))
							.min_by(|&a, &b| {
								let da = (atoms[a].position - origin).norm_squared();
								let db = (atoms[b].position - origin).norm_squared();
								da.total_cmp(&db)
							});
						match next {
							Some(i) => tuple.push(i),
							None => continue 'start,
						}
					}
					matches.push(tuple);
				}
			}
		}
		Ok(matches)
	}
}
