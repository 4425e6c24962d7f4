use std::fs;
use std::path::PathBuf;

use jse::archive::{ArchiveFile, ArchiveObject, Compression, Result};
use tracing::debug;

use crate::cmd::json::parse_tree;

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
	#[arg(long)]
	pub zstd: bool,
}

/// Encode a tree JSON document into an archive file.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output, zstd } = args;

	let text = fs::read_to_string(&input)?;
	let root = ArchiveObject::from(parse_tree(&text)?);
	debug!(input = %input.display(), nodes = root.stats().nodes, "parsed tree json");
	let compression = if zstd { Compression::Zstd } else { Compression::None };

	let written = ArchiveFile::write(&output, &root, compression)?;
	println!("wrote: {} ({written} bytes, compression {})", output.display(), compression.as_str());
	Ok(())
}
