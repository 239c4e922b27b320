use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::voxel_grid::grid::Point;

/// Destination for the point cloud of one interaction.
pub trait PointCloudSink {
	fn write_points(&mut self, label: &str, points: &[Point]) -> io::Result<()>;
}

/// Write points as hydrogen HETATM records followed by `END`.
pub fn write_points_pdb<W: Write>(out: &mut W, label: &str, points: &[Point]) -> io::Result<()> {
	writeln!(out, "REMARK   {label}")?;
	for (i, p) in points.iter().enumerate() {
		// serial field is five columns wide
		let serial = (i + 1) % 100_000;
		writeln!(
			out,
			"HETATM{:5}  H   VOX X   1    {:8.3}{:8.3}{:8.3}  1.00  0.00           H",
			serial, p.x, p.y, p.z
		)?;
	}
	writeln!(out, "END")?;
	Ok(())
}

/// Writes each interaction to `<dir>/<label>.pdb`.
#[derive(Debug, Clone)]
pub struct PdbDirectorySink {
	dir: PathBuf,
}

impl PdbDirectorySink {
	pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
		let dir = dir.into();
		fs::create_dir_all(&dir)?;
		Ok(Self { dir })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn path_for(&self, label: &str) -> PathBuf {
		self.dir.join(format!("{label}.pdb"))
	}
}

impl PointCloudSink for PdbDirectorySink {
	fn write_points(&mut self, label: &str, points: &[Point]) -> io::Result<()> {
		let path = self.path_for(label);
		let mut file = BufWriter::new(File::create(&path)?);
		write_points_pdb(&mut file, label, points)?;
		file.flush()?;
		debug!("Wrote {} points to {}", points.len(), path.display());
		Ok(())
	}
}

/// Keeps every written cloud in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
	pub clouds: Vec<(String, Vec<Point>)>,
}

impl PointCloudSink for MemorySink {
	fn write_points(&mut self, label: &str, points: &[Point]) -> io::Result<()> {
		self.clouds.push((label.to_string(), points.to_vec()));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::molecule::pdb::{load_structure_from_path, Filters};

	#[test]
	fn records_are_fixed_width() {
		let mut buf = Vec::new();
		write_points_pdb(&mut buf, "Test", &[Point::new(1.5, -2.25, 10.0)]).unwrap();
		let text = String::from_utf8(buf).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 3);
		assert!(lines[1].starts_with("HETATM    1  H   VOX"));
		assert_eq!(&lines[1][30..38], "   1.500");
		assert_eq!(&lines[1][38..46], "  -2.250");
		assert_eq!(&lines[1][46..54], "  10.000");
		assert_eq!(lines[2], "END");
	}

	#[test]
	fn directory_sink_output_reads_back() {
		let dir = tempfile::tempdir().unwrap();
		let mut sink = PdbDirectorySink::new(dir.path().join("outs")).unwrap();
		let points = vec![Point::new(0.0, 0.0, 0.0), Point::new(0.5, 1.0, -1.5)];
		sink.write_points("Hydrophobic", &points).unwrap();

		let path = sink.path_for("Hydrophobic");
		assert!(path.ends_with("outs/Hydrophobic.pdb"));
		let back = load_structure_from_path(&path, &Filters::default()).unwrap();
		assert_eq!(back.atoms.len(), 2);
		assert_eq!(back.atoms[1].position, points[1]);
		assert!(back.atoms.iter().all(|a| a.hetatm && a.element == "H"));
	}

	#[test]
	fn empty_cloud_still_writes_end() {
		let mut buf = Vec::new();
		write_points_pdb(&mut buf, "Nothing", &[]).unwrap();
		assert_eq!(String::from_utf8(buf).unwrap(), "REMARK   Nothing\nEND\n");
	}
}
