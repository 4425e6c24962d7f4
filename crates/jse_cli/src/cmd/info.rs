use std::fs;
use std::path::PathBuf;

use jse::archive::{ArchiveFile, ArchiveHeader, Result, TreeStats, decode};

use crate::cmd::json::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header, checksum, and tree statistics.
///
/// Decode failures are reported in the output rather than as errors so a
/// damaged archive can still be inspected.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file_size = fs::metadata(&path)?.len();
	let (compression, bytes) = ArchiveFile::read_raw(&path)?;
	let header = ArchiveHeader::parse(&bytes)?;
	let computed_crc = ArchiveHeader::computed_crc(&bytes);

	let (stats, error) = match decode(&bytes) {
		Ok(decoded) => (Some(decoded.root.stats()), None),
		Err(err) => (None, Some(format!("{}: {err}", err.kind().as_str()))),
	};

	let payload = InfoJson {
		path: path.display().to_string(),
		compression: compression.as_str(),
		file_size,
		archive_size: bytes.len(),
		root_len: header.root_len,
		stored_crc: format!("0x{:08x}", header.crc),
		computed_crc: format!("0x{computed_crc:08x}"),
		crc_ok: header.crc == computed_crc,
		valid: error.is_none(),
		error,
		stats: stats.map(StatsJson::from),
	};

	if json {
		return emit_json(&payload);
	}

	println!("path: {}", payload.path);
	println!("compression: {}", payload.compression);
	println!("file_size: {}", payload.file_size);
	println!("archive_size: {}", payload.archive_size);
	println!("root_len: {}", payload.root_len);
	println!("stored_crc: {}", payload.stored_crc);
	println!("computed_crc: {}", payload.computed_crc);
	println!("crc_ok: {}", payload.crc_ok);
	println!("valid: {}", payload.valid);
	if let Some(error) = &payload.error {
		println!("error: {error}");
	}
	if let Some(stats) = &payload.stats {
		println!("nodes: {}", stats.nodes);
		println!("attributes: {}", stats.attributes);
		println!("values: {}", stats.values);
		println!("max_depth: {}", stats.max_depth);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct StatsJson {
	nodes: usize,
	attributes: usize,
	values: usize,
	max_depth: u32,
}

impl From<TreeStats> for StatsJson {
	fn from(stats: TreeStats) -> Self {
		Self {
			nodes: stats.nodes,
			attributes: stats.attributes,
			values: stats.values,
			max_depth: stats.max_depth,
		}
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	file_size: u64,
	archive_size: usize,
	root_len: u32,
	stored_crc: String,
	computed_crc: String,
	crc_ok: bool,
	valid: bool,
	error: Option<String>,
	stats: Option<StatsJson>,
}
