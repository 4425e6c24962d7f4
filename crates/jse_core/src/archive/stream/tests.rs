use crate::archive::stream::{ByteReader, ByteWriter, SIZE_MAX_4};
use crate::archive::{ArchiveError, ErrorKind};

#[test]
fn writes_big_endian_scalars() {
	let mut writer = ByteWriter::new();
	writer.write_u16(0x0102);
	writer.write_i32(-2);
	writer.write_u64(0x1122_3344_5566_7788);
	writer.write_f32(1.5);

	let bytes = writer.into_inner();
	assert_eq!(&bytes[0..2], &[0x01, 0x02]);
	assert_eq!(&bytes[2..6], &[0xFF, 0xFF, 0xFF, 0xFE]);
	assert_eq!(&bytes[6..14], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
	assert_eq!(&bytes[14..18], &1.5_f32.to_be_bytes());

	let mut reader = ByteReader::new(&bytes);
	assert_eq!(reader.read_u16().expect("u16"), 0x0102);
	assert_eq!(reader.read_i32().expect("i32"), -2);
	assert_eq!(reader.read_u64().expect("u64"), 0x1122_3344_5566_7788);
	assert_eq!(reader.read_f32().expect("f32"), 1.5);
	assert_eq!(reader.remaining(), 0);
}

#[test]
fn backpatch_overwrites_in_place() {
	let mut writer = ByteWriter::new();
	writer.write_u8(0xAA);
	writer.write_u32(0);
	writer.write_bytes(b"body");
	let end = writer.pos();

	writer.seek(1).expect("seek back");
	writer.write_u32(4);
	assert_eq!(writer.len(), end, "patch must not grow the buffer");
	writer.seek_end();
	writer.write_u8(0xBB);

	assert_eq!(writer.as_bytes(), &[0xAA, 0, 0, 0, 4, b'b', b'o', b'd', b'y', 0xBB]);
}

#[test]
fn writer_seek_past_end_fails() {
	let mut writer = ByteWriter::new();
	writer.write_u8(1);
	let err = writer.seek(3).expect_err("seek past end");
	assert!(matches!(err, ArchiveError::SeekOutOfRange { to: 3, len: 1 }));
}

#[test]
fn short_read_reports_stream_bounds() {
	let bytes = [0_u8; 3];
	let mut reader = ByteReader::new(&bytes);
	let err = reader.read_u32().expect_err("not enough bytes");
	assert!(matches!(err, ArchiveError::UnexpectedEof { at: 0, need: 4, rem: 3 }));
	assert_eq!(err.kind(), ErrorKind::StreamBounds);
	assert_eq!(reader.pos(), 0, "failed read must not advance");
}

#[test]
fn narrowed_boundary_reports_overrun() {
	let bytes = [0_u8; 8];
	let mut reader = ByteReader::new(&bytes);
	let prev = reader.narrow(2);
	let err = reader.read_u32().expect_err("crosses boundary");
	assert!(matches!(err, ArchiveError::BodyOverrun { at: 0, need: 4, end: 2 }));
	assert_eq!(err.kind(), ErrorKind::Framing);

	reader.restore_end(prev);
	assert_eq!(reader.read_u32().expect("fits after restore"), 0);
}

#[test]
fn narrow_never_widens_the_boundary() {
	let bytes = [0_u8; 8];
	let mut reader = ByteReader::new(&bytes);
	assert_eq!(reader.narrow(4), 8);
	assert_eq!(reader.narrow(6), 4);
	assert_eq!(reader.end(), 4);
	assert_eq!(reader.narrow(usize::MAX), 4);
	assert_eq!(reader.end(), 4);
	assert!(reader.read_exact(6).is_err());
}

#[test]
fn size_prefix_widths() {
	for (len, width) in [(0, 1), (63, 1), (64, 2), (16383, 2), (16384, 4), (SIZE_MAX_4, 4)] {
		let mut writer = ByteWriter::new();
		writer.write_size(len).expect("size encodes");
		assert_eq!(writer.len(), width, "width for {len}");

		let bytes = writer.into_inner();
		let mut reader = ByteReader::new(&bytes);
		assert_eq!(reader.read_size().expect("size decodes"), len);
		assert_eq!(reader.pos(), width);
	}
}

#[test]
fn size_prefix_tag_bits() {
	let mut writer = ByteWriter::new();
	writer.write_size(64).expect("two byte form");
	writer.write_size(16384).expect("four byte form");
	assert_eq!(writer.as_bytes(), &[0x40, 0x40, 0x80, 0x00, 0x40, 0x00]);
}

#[test]
fn size_prefix_rejects_oversized_length() {
	let mut writer = ByteWriter::new();
	let err = writer.write_size(SIZE_MAX_4 + 1).expect_err("too large");
	assert!(matches!(err, ArchiveError::LengthTooLarge { .. }));
	assert!(writer.is_empty());
}

#[test]
fn size_prefix_rejects_reserved_tag() {
	let bytes = [0xC0, 0, 0, 0];
	let mut reader = ByteReader::new(&bytes);
	let err = reader.read_size().expect_err("reserved tag");
	assert!(matches!(err, ArchiveError::ReservedSizeTag { at: 0 }));
	assert_eq!(err.kind(), ErrorKind::Framing);
}

#[test]
fn sized_str_rejects_invalid_utf8() {
	let bytes = [0x02, 0xFF, 0xFE];
	let mut reader = ByteReader::new(&bytes);
	let err = reader.read_sized_str().expect_err("invalid utf-8");
	assert!(matches!(err, ArchiveError::InvalidUtf8 { at: 1 }));
}

#[test]
fn sized_str_counts_bytes_not_chars() {
	let mut writer = ByteWriter::new();
	writer.write_sized_str("héllo").expect("string encodes");
	assert_eq!(writer.as_bytes()[0], 6);

	let bytes = writer.into_inner();
	let mut reader = ByteReader::new(&bytes);
	assert_eq!(reader.read_sized_str().expect("string decodes"), "héllo");
}
