use std::fs;
use std::path::Path;

use tracing::debug;

use crate::archive::compression::{decode_bytes, encode_bytes};
use crate::archive::{ArchiveHeader, ArchiveObject, Compression, DecodeOptions, Result, decode_with_options, encode};

/// Decoded archive file.
#[derive(Debug, Clone)]
pub struct ArchiveFile {
	/// Compression mode found on disk.
	pub compression: Compression,
	/// Parsed archive header.
	pub header: ArchiveHeader,
	/// Decoded root node.
	pub root: ArchiveObject,
	bytes: Vec<u8>,
}

impl ArchiveFile {
	/// Read and decode an archive file with default limits.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with_options(path, &DecodeOptions::default())
	}

	/// Read and decode an archive file.
	pub fn open_with_options(path: impl AsRef<Path>, opt: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		let file = Self::from_raw(fs::read(path)?, opt)?;
		debug!(path = %path.display(), compression = file.compression.as_str(), bytes = file.bytes.len(), "opened archive file");
		Ok(file)
	}

	/// Decode archive bytes as read from disk, compressed or not.
	pub fn from_raw(raw: Vec<u8>, opt: &DecodeOptions) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let decoded = decode_with_options(&bytes, opt)?;
		let header = ArchiveHeader::parse(&bytes)?;
		Ok(Self {
			compression,
			header,
			root: decoded.root,
			bytes,
		})
	}

	/// Read a file and undo compression without decoding the tree.
	pub fn read_raw(path: impl AsRef<Path>) -> Result<(Compression, Vec<u8>)> {
		decode_bytes(fs::read(path)?)
	}

	/// Uncompressed archive bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Encode `root` and write it to `path`, returning the bytes written.
	pub fn write(path: impl AsRef<Path>, root: &ArchiveObject, compression: Compression) -> Result<usize> {
		let path = path.as_ref();
		let out = encode_bytes(encode(root)?, compression)?;
		fs::write(path, &out)?;
		debug!(path = %path.display(), compression = compression.as_str(), bytes = out.len(), "wrote archive file");
		Ok(out.len())
	}
}

#[cfg(test)]
mod tests;
