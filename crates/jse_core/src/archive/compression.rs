use std::io::{Read, Write};

use tracing::debug;

use crate::archive::binary::first3;
use crate::archive::{ArchiveError, MAGIC, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
const ZSTD_LEVEL: i32 = 3;
/// zstd frame magic used by compressed archive files.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode of an archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
	/// Raw archive bytes.
	#[default]
	None,
	/// zstd-compressed archive bytes.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Detect and undo compression, returning `(mode, archive_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		debug!(compressed = raw.len(), decompressed = out.len(), "decompressed archive");
		return Ok((Compression::Zstd, out));
	}

	if !raw.starts_with(&MAGIC) {
		return Err(ArchiveError::InvalidMagic { magic: first3(&raw) });
	}
	Ok((Compression::None, raw))
}

/// Apply `mode` to encoded archive bytes.
pub fn encode_bytes(bytes: Vec<u8>, mode: Compression) -> Result<Vec<u8>> {
	match mode {
		Compression::None => Ok(bytes),
		Compression::Zstd => {
			let mut encoder = zstd::stream::write::Encoder::new(Vec::new(), ZSTD_LEVEL)?;
			encoder.write_all(&bytes)?;
			Ok(encoder.finish()?)
		}
	}
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(ArchiveError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	if !out.starts_with(&MAGIC) {
		return Err(ArchiveError::InvalidMagic { magic: first3(&out) });
	}

	Ok(out)
}
