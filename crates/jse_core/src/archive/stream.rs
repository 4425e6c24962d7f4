use crate::archive::{ArchiveError, Result};

const SIZE_TAG_MASK: u8 = 0b1100_0000;
const SIZE_TAG_1: u8 = 0b0000_0000;
const SIZE_TAG_2: u8 = 0b0100_0000;
const SIZE_TAG_4: u8 = 0b1000_0000;

/// Largest length representable by a one-byte size prefix.
pub const SIZE_MAX_1: usize = 0x3F;
/// Largest length representable by a two-byte size prefix.
pub const SIZE_MAX_2: usize = 0x3FFF;
/// Largest length representable by any size prefix.
pub const SIZE_MAX_4: usize = 0x3FFF_FFFF;

/// Bounded big-endian cursor over an immutable byte slice.
///
/// The cursor can carry a boundary narrower than the slice. Reads that cross
/// a narrowed boundary fail with [`ArchiveError::BodyOverrun`] instead of
/// [`ArchiveError::UnexpectedEof`].
pub struct ByteReader<'a> {
	bytes: &'a [u8],
	pos: usize,
	end: usize,
}

impl<'a> ByteReader<'a> {
	/// Create a cursor at position 0 bounded by the slice length.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, end: bytes.len() }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return the active boundary.
	pub fn end(&self) -> usize {
		self.end
	}

	/// Return bytes left before the active boundary.
	pub fn remaining(&self) -> usize {
		self.end.saturating_sub(self.pos)
	}

	/// Narrow the boundary to `end`, returning the previous boundary.
	///
	/// The boundary never widens; an `end` past it is clamped.
	pub fn narrow(&mut self, end: usize) -> usize {
		let prev = self.end;
		self.end = end.min(prev);
		prev
	}

	/// Restore a boundary previously returned by [`Self::narrow`].
	pub(crate) fn restore_end(&mut self, end: usize) {
		self.end = end.min(self.bytes.len());
	}

	/// Move to an absolute position inside the active boundary.
	pub fn seek(&mut self, to: usize) -> Result<()> {
		if to > self.end {
			return Err(ArchiveError::SeekOutOfRange { to, len: self.end });
		}
		self.pos = to;
		Ok(())
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			if self.end < self.bytes.len() {
				return Err(ArchiveError::BodyOverrun {
					at: self.pos,
					need: n,
					end: self.end,
				});
			}
			return Err(ArchiveError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE-754 `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE-754 `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_be_bytes(self.read_array()?))
	}

	/// Read a variable-width size prefix.
	pub fn read_size(&mut self) -> Result<usize> {
		let at = self.pos;
		let tag = self.read_u8()? & SIZE_TAG_MASK;
		self.seek(at)?;

		match tag {
			SIZE_TAG_1 => Ok(usize::from(self.read_u8()?)),
			SIZE_TAG_2 => Ok(usize::from(self.read_u16()? & 0x3FFF)),
			SIZE_TAG_4 => Ok((self.read_u32()? & 0x3FFF_FFFF) as usize),
			_ => Err(ArchiveError::ReservedSizeTag { at }),
		}
	}

	/// Read a size-prefixed byte span.
	pub fn read_sized_bytes(&mut self) -> Result<&'a [u8]> {
		let len = self.read_size()?;
		self.read_exact(len)
	}

	/// Read a size-prefixed UTF-8 string.
	pub fn read_sized_str(&mut self) -> Result<&'a str> {
		let len = self.read_size()?;
		let at = self.pos;
		let raw = self.read_exact(len)?;
		std::str::from_utf8(raw).map_err(|_| ArchiveError::InvalidUtf8 { at })
	}
}

/// Growable big-endian writer with absolute seek for backpatching.
///
/// Writes at a position before the end overwrite in place; writes at the end
/// extend the buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
	bytes: Vec<u8>,
	pos: usize,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty writer with preallocated capacity.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			bytes: Vec::with_capacity(capacity),
			pos: 0,
		}
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return total written length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Borrow the written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the writer and return its buffer.
	pub fn into_inner(self) -> Vec<u8> {
		self.bytes
	}

	/// Move to an absolute position inside the written range.
	pub fn seek(&mut self, to: usize) -> Result<()> {
		if to > self.bytes.len() {
			return Err(ArchiveError::SeekOutOfRange { to, len: self.bytes.len() });
		}
		self.pos = to;
		Ok(())
	}

	/// Move to the end of the written range.
	pub fn seek_end(&mut self) {
		self.pos = self.bytes.len();
	}

	/// Write raw bytes at the cursor.
	pub fn write_bytes(&mut self, data: &[u8]) {
		let overlap = self.bytes.len().saturating_sub(self.pos).min(data.len());
		self.bytes[self.pos..self.pos + overlap].copy_from_slice(&data[..overlap]);
		self.bytes.extend_from_slice(&data[overlap..]);
		self.pos += data.len();
	}

	/// Write one byte.
	pub fn write_u8(&mut self, value: u8) {
		self.write_bytes(&[value]);
	}

	/// Write one signed byte.
	pub fn write_i8(&mut self, value: i8) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `u16`.
	pub fn write_u16(&mut self, value: u16) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `i16`.
	pub fn write_i16(&mut self, value: i16) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `u32`.
	pub fn write_u32(&mut self, value: u32) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `i32`.
	pub fn write_i32(&mut self, value: i32) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `u64`.
	pub fn write_u64(&mut self, value: u64) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian `i64`.
	pub fn write_i64(&mut self, value: i64) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian IEEE-754 `f32`.
	pub fn write_f32(&mut self, value: f32) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a big-endian IEEE-754 `f64`.
	pub fn write_f64(&mut self, value: f64) {
		self.write_bytes(&value.to_be_bytes());
	}

	/// Write a variable-width size prefix using the narrowest width.
	pub fn write_size(&mut self, len: usize) -> Result<()> {
		if len <= SIZE_MAX_1 {
			self.write_u8(len as u8);
		} else if len <= SIZE_MAX_2 {
			self.write_u16(len as u16 | 0x4000);
		} else if len <= SIZE_MAX_4 {
			self.write_u32(len as u32 | 0x8000_0000);
		} else {
			return Err(ArchiveError::LengthTooLarge { len });
		}
		Ok(())
	}

	/// Write a size-prefixed byte span.
	pub fn write_sized_bytes(&mut self, data: &[u8]) -> Result<()> {
		self.write_size(data.len())?;
		self.write_bytes(data);
		Ok(())
	}

	/// Write a size-prefixed UTF-8 string; the prefix counts bytes.
	pub fn write_sized_str(&mut self, text: &str) -> Result<()> {
		self.write_sized_bytes(text.as_bytes())
	}
}

#[cfg(test)]
mod tests;
