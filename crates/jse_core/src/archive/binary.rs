//! Framed, CRC-protected binary encoding of [`ArchiveObject`] trees.
//!
//! ```text
//! "JSE" | crc32 (BE, over everything after this field) | root body length (BE u32) | root body
//! ```
//!
//! Object bodies hold a size-prefixed name (omitted for the root), then
//! attributes, values, and children, each introduced by a one-byte tag.

use tracing::{debug, trace, warn};

use crate::archive::stream::{ByteReader, ByteWriter};
use crate::archive::{ArchiveError, ArchiveObject, Attribute, Result, Value, ValueKind};

/// Leading magic bytes.
pub const MAGIC: [u8; 3] = *b"JSE";
/// Tag introducing a child object entry.
pub const OBJECT_TAG: u8 = 0xFE;
/// Tag introducing an attribute entry.
pub const ATTRIBUTE_TAG: u8 = 0xFF;

const CRC_OFFSET: usize = 3;
const ROOT_OFFSET: usize = 7;

/// Fixed-size archive prefix: magic, checksum, and root body length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
	/// Stored CRC32 over every byte after the checksum field.
	pub crc: u32,
	/// Declared root body length.
	pub root_len: u32,
}

impl ArchiveHeader {
	/// Header size in bytes.
	pub const SIZE: usize = 11;

	/// Parse the header without validating the checksum.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let magic = first3(bytes);
		if magic != MAGIC || bytes.len() < MAGIC.len() {
			return Err(ArchiveError::InvalidMagic { magic });
		}

		let mut reader = ByteReader::new(bytes);
		reader.seek(CRC_OFFSET)?;
		let crc = reader.read_u32()?;
		let root_len = reader.read_u32()?;
		Ok(Self { crc, root_len })
	}

	/// Compute the checksum the header should carry for `bytes`.
	pub fn computed_crc(bytes: &[u8]) -> u32 {
		crc32fast::hash(bytes.get(ROOT_OFFSET..).unwrap_or_default())
	}
}

/// Runtime limits for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting of objects and value arrays below the root.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 128 }
	}
}

/// Successful decode output.
#[derive(Debug, Clone)]
pub struct Decoded {
	/// Root node; its name is always empty.
	pub root: ArchiveObject,
	/// Verified checksum.
	pub crc: u32,
	/// Bytes consumed, always the full input.
	pub consumed: usize,
}

/// Encode a tree. The root's own name is not written.
pub fn encode(root: &ArchiveObject) -> Result<Vec<u8>> {
	let mut writer = ByteWriter::with_capacity(256);
	writer.write_bytes(&MAGIC);
	writer.write_u32(0);
	write_object(&mut writer, root, true)?;

	let crc = crc32fast::hash(&writer.as_bytes()[ROOT_OFFSET..]);
	writer.seek(CRC_OFFSET)?;
	writer.write_u32(crc);
	writer.seek_end();

	debug!(bytes = writer.len(), crc, "encoded archive");
	Ok(writer.into_inner())
}

/// Decode a complete archive buffer with default limits.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
	decode_with_options(bytes, &DecodeOptions::default())
}

/// Decode a complete archive buffer.
pub fn decode_with_options(bytes: &[u8], opt: &DecodeOptions) -> Result<Decoded> {
	let header = ArchiveHeader::parse(bytes)?;
	let computed = ArchiveHeader::computed_crc(bytes);
	if computed != header.crc {
		warn!(stored = header.crc, computed, "archive checksum mismatch");
		return Err(ArchiveError::CrcMismatch {
			stored: header.crc,
			computed,
		});
	}

	let mut reader = ByteReader::new(bytes);
	reader.seek(ROOT_OFFSET)?;
	let root = read_object(&mut reader, opt, None)?;

	if reader.pos() != bytes.len() {
		return Err(ArchiveError::TrailingBytes {
			at: reader.pos(),
			len: bytes.len() - reader.pos(),
		});
	}

	debug!(bytes = bytes.len(), crc = header.crc, "decoded archive");
	Ok(Decoded {
		root,
		crc: header.crc,
		consumed: reader.pos(),
	})
}

fn write_framed(writer: &mut ByteWriter, tag: Option<u8>, body: impl FnOnce(&mut ByteWriter) -> Result<()>) -> Result<()> {
	if let Some(tag) = tag {
		writer.write_u8(tag);
	}
	let len_at = writer.pos();
	writer.write_u32(0);

	let start = writer.pos();
	body(writer)?;
	let end = writer.pos();

	let len = u32::try_from(end - start).map_err(|_| ArchiveError::BodyTooLarge { len: end - start })?;
	writer.seek(len_at)?;
	writer.write_u32(len);
	writer.seek(end)
}

fn write_object(writer: &mut ByteWriter, obj: &ArchiveObject, is_root: bool) -> Result<()> {
	let tag = (!is_root).then_some(OBJECT_TAG);
	write_framed(writer, tag, |writer| {
		if !is_root {
			writer.write_sized_str(obj.name())?;
		}
		for attr in obj.attributes() {
			write_attribute(writer, attr)?;
		}
		for value in obj.values() {
			write_value(writer, value)?;
		}
		for child in obj.children() {
			write_object(writer, child, false)?;
		}
		Ok(())
	})
}

fn write_attribute(writer: &mut ByteWriter, attr: &Attribute) -> Result<()> {
	writer.write_u8(ATTRIBUTE_TAG);
	writer.write_sized_str(&attr.name)?;
	write_value(writer, &attr.value)
}

fn write_value(writer: &mut ByteWriter, value: &Value) -> Result<()> {
	writer.write_u8(value.kind().tag());
	match value {
		Value::Bool(v) => writer.write_u8(u8::from(*v)),
		Value::Null => {}
		Value::Bytes(bytes) => writer.write_sized_bytes(bytes)?,
		Value::Array(items) => {
			writer.write_size(items.len())?;
			for item in items {
				write_value(writer, item)?;
			}
		}
		Value::I8(v) => writer.write_i8(*v),
		Value::U8(v) => writer.write_u8(*v),
		Value::I16(v) => writer.write_i16(*v),
		Value::U16(v) => writer.write_u16(*v),
		Value::I32(v) => writer.write_i32(*v),
		Value::U32(v) => writer.write_u32(*v),
		Value::I64(v) => writer.write_i64(*v),
		Value::U64(v) => writer.write_u64(*v),
		Value::String(text) => writer.write_sized_str(text)?,
		Value::F32(v) => writer.write_f32(*v),
		Value::F64(v) => writer.write_f64(*v),
	}
	Ok(())
}

/// Read one object body. `depth` is `None` for the root, whose name is omitted.
fn read_object(reader: &mut ByteReader<'_>, opt: &DecodeOptions, depth: Option<u32>) -> Result<ArchiveObject> {
	let len = reader.read_u32()? as usize;
	let start = reader.pos();
	if len > reader.remaining() {
		return Err(ArchiveError::BodyOutOfRange {
			at: start,
			len,
			rem: reader.remaining(),
		});
	}
	let end = start + len;
	let outer_end = reader.narrow(end);

	let mut obj = match depth {
		Some(_) => ArchiveObject::new(reader.read_sized_str()?),
		None => ArchiveObject::new(""),
	};
	let level = depth.unwrap_or(0);
	trace!(name = obj.name(), at = start, len, level, "object body");

	while reader.pos() < end {
		let at = reader.pos();
		match reader.read_u8()? {
			OBJECT_TAG => {
				let child_depth = level + 1;
				if child_depth > opt.max_depth {
					return Err(ArchiveError::DecodeDepthExceeded { max_depth: opt.max_depth });
				}
				let child = read_object(reader, opt, Some(child_depth))?;
				obj.add_child(child);
			}
			ATTRIBUTE_TAG => {
				let name = reader.read_sized_str()?;
				let value = read_tagged_value(reader, opt, level)?;
				obj.set_attribute(name, value);
			}
			tag => {
				let kind = ValueKind::from_tag(tag).ok_or(ArchiveError::UnsupportedType { tag, at })?;
				let value = read_value(reader, opt, kind, level)?;
				obj.add_value(value);
			}
		}
	}

	reader.restore_end(outer_end);
	Ok(obj)
}

fn read_tagged_value(reader: &mut ByteReader<'_>, opt: &DecodeOptions, level: u32) -> Result<Value> {
	let at = reader.pos();
	let tag = reader.read_u8()?;
	if tag == OBJECT_TAG || tag == ATTRIBUTE_TAG {
		return Err(ArchiveError::UnexpectedEntry { tag, at });
	}
	let kind = ValueKind::from_tag(tag).ok_or(ArchiveError::UnsupportedType { tag, at })?;
	read_value(reader, opt, kind, level)
}

fn read_value(reader: &mut ByteReader<'_>, opt: &DecodeOptions, kind: ValueKind, level: u32) -> Result<Value> {
	Ok(match kind {
		ValueKind::Bool => Value::Bool(reader.read_u8()? != 0),
		ValueKind::Null => Value::Null,
		ValueKind::Bytes => Value::Bytes(reader.read_sized_bytes()?.to_vec()),
		ValueKind::Array => {
			let nested = level + 1;
			if nested > opt.max_depth {
				return Err(ArchiveError::DecodeDepthExceeded { max_depth: opt.max_depth });
			}
			let count = reader.read_size()?;
			// Every element needs at least its tag byte.
			let mut items = Vec::with_capacity(count.min(reader.remaining()));
			for _ in 0..count {
				items.push(read_tagged_value(reader, opt, nested)?);
			}
			Value::Array(items)
		}
		ValueKind::I8 => Value::I8(reader.read_i8()?),
		ValueKind::U8 => Value::U8(reader.read_u8()?),
		ValueKind::I16 => Value::I16(reader.read_i16()?),
		ValueKind::U16 => Value::U16(reader.read_u16()?),
		ValueKind::I32 => Value::I32(reader.read_i32()?),
		ValueKind::U32 => Value::U32(reader.read_u32()?),
		ValueKind::I64 => Value::I64(reader.read_i64()?),
		ValueKind::U64 => Value::U64(reader.read_u64()?),
		ValueKind::String => Value::String(reader.read_sized_str()?.to_owned()),
		ValueKind::F32 => Value::F32(reader.read_f32()?),
		ValueKind::F64 => Value::F64(reader.read_f64()?),
	})
}

pub(crate) fn first3(bytes: &[u8]) -> [u8; 3] {
	let mut magic = [0_u8; 3];
	let take = bytes.len().min(3);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}
