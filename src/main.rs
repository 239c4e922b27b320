use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

use voxel_interactions::interaction::registry::InteractionRegistry;
use voxel_interactions::molecule::matcher::TemplateMatcher;
use voxel_interactions::molecule::pdb::{Filters, load_structure_from_path};
use voxel_interactions::molecule::pdb_output::{PdbDirectorySink, PointCloudSink};
use voxel_interactions::settings::{MIN_PADDING, Settings};
use voxel_interactions::voxel_grid::grid::{DEFAULT_GRAIN, VoxelGrid};
use voxel_interactions::voxel_grid::info;

/// Compute the space around a molecule where each kind of interaction can happen
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
	/// Input structure in PDB format
	input: PathBuf,

	/// Directory receiving one `<interaction>.pdb` point cloud per interaction found
	#[arg(short, long, default_value = "outs")]
	output: PathBuf,

	/// Lattice cells per unit length
	#[arg(short, long, default_value_t = DEFAULT_GRAIN, value_parser = clap::value_parser!(u32).range(1..))]
	grain: u32,

	/// Border around the molecule, in length units (values below 2 are raised to 2)
	#[arg(short, long, default_value_t = MIN_PADDING)]
	padding: usize,

	/// Worker threads (0 uses every available core)
	#[arg(short = 'j', long, default_value_t = 0)]
	threads: usize,

	/// Keep interaction volume that lies inside the molecule itself
	#[arg(long)]
	keep_interior: bool,

	#[arg(long)]
	exclude_water: bool,

	#[arg(long)]
	exclude_ions: bool,

	#[arg(long)]
	exclude_ligands: bool,

	/// Drop every residue made only of HETATM records
	#[arg(long)]
	exclude_hetatm: bool,

	/// Also write the molecule's own occupancy as `molecule.pdb`
	#[arg(long)]
	write_molecule: bool,

	/// Verbosity of the program:
	/// -v for info, -vv for debug, and -vvv for trace
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Args {
	fn settings(&self) -> Settings {
		Settings {
			grain: self.grain,
			padding: self.padding,
			threads: self.threads,
			subtract_molecule: !self.keep_interior,
			..Settings::default()
		}
	}

	fn filters(&self) -> Filters {
		Filters {
			exclude_water: self.exclude_water,
			exclude_ions: self.exclude_ions,
			exclude_ligands: self.exclude_ligands,
			exclude_hetatm: self.exclude_hetatm,
		}
	}
}

fn setup_logging(verbosity: u8) {
	let level = match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(io::stderr)
		.with_ansi(io::stderr().is_terminal())
		.with_target(false)
		.compact()
		.init();
}

fn progress_bar(len: usize) -> ProgressBar {
	let pb = ProgressBar::new(len as u64);
	let style = ProgressStyle::default_bar()
		.template("Interactions: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
		.unwrap_or_else(|_| ProgressStyle::default_bar())
		.progress_chars("#>-");
	pb.set_style(style);
	pb
}

fn run(args: &Args) -> Result<()> {
	let settings = args.settings();
	debug!("{settings:?}");

	let structure = load_structure_from_path(&args.input, &args.filters())
		.with_context(|| format!("Could not load molecule from {}", args.input.display()))?;
	info!("Loaded {} atoms from {}", structure.atoms.len(), args.input.display());

	let molecule_grid = VoxelGrid::discretize(&structure, &settings).context("Could not discretize the molecule")?;
	molecule_grid.report_memory("molecule");
	info!("Molecule occupies {} cells", molecule_grid.count_filled());

	let mut sink = PdbDirectorySink::new(&args.output)
		.with_context(|| format!("Could not create output directory {}", args.output.display()))?;
	if args.write_molecule {
		sink.write_points("molecule", &molecule_grid.synthesize())
			.context("Could not write the molecule occupancy")?;
	}

	let registry = InteractionRegistry::standard();
	let matcher = TemplateMatcher;
	let subtraction = settings.subtract_molecule.then_some(&molecule_grid);
	let pb = progress_bar(registry.len());

	let mut written = 0usize;
	for entry in registry.iter() {
		pb.set_message(entry.label);
		let mut support = VoxelGrid::with_frame_of(&molecule_grid);
		let found = entry
			.interaction
			.compute(&structure, &matcher, &mut support, subtraction, settings.threads);
		if found {
			let points = support.synthesize();
			debug!("{}: {} cells", entry.label, points.len());
			sink.write_points(entry.label, &points)
				.with_context(|| format!("Could not write {}", sink.path_for(entry.label).display()))?;
			written += 1;
		} else {
			pb.suspend(|| warn!("no interaction found for {}", entry.label));
		}
		pb.inc(1);
	}
	pb.finish_with_message("done");

	if written == 0 {
		warn!("No interaction found in {}", args.input.display());
	}
	info!("Wrote {written} of {} interactions to {}", registry.len(), sink.dir().display());
	Ok(())
}

fn main() -> ExitCode {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => {
			let code = if e.use_stderr() { 1 } else { 0 };
			let _ = e.print();
			return ExitCode::from(code);
		}
	};

	setup_logging(args.verbose);
	info::print_banner();

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {e:#}");
			ExitCode::FAILURE
		}
	}
}
