use std::path::PathBuf;

use jse::archive::{ArchiveFile, Result};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
}

/// Decode the whole archive; any failure propagates as a non-zero exit.
pub fn run(args: Args) -> Result<()> {
	let Args { path } = args;

	let file = ArchiveFile::open(&path)?;
	let stats = file.root.stats();
	println!(
		"ok: {} ({} bytes, {} nodes, crc 0x{:08x})",
		path.display(),
		file.bytes().len(),
		stats.nodes,
		file.header.crc
	);
	Ok(())
}
