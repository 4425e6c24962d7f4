use std::path::PathBuf;

use jse::archive::{ArchiveFile, Result};

use crate::cmd::json::{TreeJson, emit_json};
use crate::cmd::print::{PrintOptions, render_tree};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub brief: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
}

/// Print the decoded tree as indented text or as the tree JSON form.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		brief,
		max_depth,
		max_items,
	} = args;

	let file = ArchiveFile::open(&path)?;

	if json {
		return emit_json(&TreeJson::from(&file.root));
	}

	let mut options = if brief { PrintOptions::for_overview() } else { PrintOptions::default() };
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}
	if let Some(max_items) = max_items {
		options.max_items = max_items;
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("crc: 0x{:08x}", file.header.crc);
	print!("{}", render_tree(&file.root, options));
	Ok(())
}
