use std::env;
use std::sync::Once;

fn program_name() -> String {
	env::current_exe()
		.ok()
		.as_ref()
		.and_then(|path| path.file_name())
		.and_then(|name| name.to_str())
		.map(str::to_string)
		.unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Print program, version and build stamp to stderr (only prints once)
pub fn print_banner() {
	static PRINT_BANNER_ONCE: Once = Once::new();
	PRINT_BANNER_ONCE.call_once(|| {
		eprintln!(
			"{} {}: interaction occupancy volumes on a voxel lattice",
			program_name(),
			env!("CARGO_PKG_VERSION")
		);
		eprintln!("Compiled on: {} at {}\n", env!("COMPILE_DATE"), env!("COMPILE_TIME"));
	});
}
