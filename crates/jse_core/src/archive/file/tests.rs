use std::fs;

use crate::archive::{ArchiveError, ArchiveFile, ArchiveObject, Compression, DecodeOptions, ErrorKind};

fn sample_tree() -> ArchiveObject {
	ArchiveObject::new("")
		.with_attribute("version", 3_u16)
		.with_child(ArchiveObject::new("UI:view").with_attribute("title", "Main").with_value(vec![1_u8, 2, 3]))
}

#[test]
fn plain_file_round_trips() {
	let dir = jse_testkit::scratch_dir("file-plain");
	let path = dir.join("tree.jse");

	let written = ArchiveFile::write(&path, &sample_tree(), Compression::None).expect("write");
	assert_eq!(written as u64, fs::metadata(&path).expect("metadata").len());

	let file = ArchiveFile::open(&path).expect("open");
	assert_eq!(file.compression, Compression::None);
	assert_eq!(file.bytes().len(), written);
	assert_eq!(file.header.root_len as usize, written - 11);
	assert!(file.root.structurally_eq(&sample_tree()));
}

#[test]
fn zstd_file_round_trips() {
	let dir = jse_testkit::scratch_dir("file-zstd");
	let path = dir.join("tree.jse.zst");

	ArchiveFile::write(&path, &sample_tree(), Compression::Zstd).expect("write");
	let (mode, raw) = ArchiveFile::read_raw(&path).expect("raw");
	assert_eq!(mode, Compression::Zstd);
	assert!(raw.starts_with(b"JSE"));

	let file = ArchiveFile::open(&path).expect("open");
	assert_eq!(file.compression, Compression::Zstd);
	assert_eq!(file.bytes(), raw.as_slice());
	assert!(file.root.structurally_eq(&sample_tree()));
}

#[test]
fn missing_file_is_io_error() {
	let dir = jse_testkit::scratch_dir("file-missing");
	let err = ArchiveFile::open(dir.join("absent.jse")).expect_err("missing");
	assert!(matches!(err, ArchiveError::Io(_)));
	assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn corrupted_file_is_integrity_error() {
	let dir = jse_testkit::scratch_dir("file-corrupt");
	let path = dir.join("tree.jse");
	ArchiveFile::write(&path, &sample_tree(), Compression::None).expect("write");

	let mut bytes = fs::read(&path).expect("read");
	let last = bytes.len() - 1;
	bytes[last] ^= 0xFF;
	fs::write(&path, &bytes).expect("rewrite");

	let err = ArchiveFile::open(&path).expect_err("corrupt");
	assert_eq!(err.kind(), ErrorKind::Integrity);
}

#[test]
fn depth_limit_passes_through() {
	let dir = jse_testkit::scratch_dir("file-depth");
	let path = dir.join("deep.jse");
	let tree = ArchiveObject::new("").with_child(ArchiveObject::new("a").with_child(ArchiveObject::new("b")));
	ArchiveFile::write(&path, &tree, Compression::None).expect("write");

	ArchiveFile::open_with_options(&path, &DecodeOptions { max_depth: 2 }).expect("fits");
	let err = ArchiveFile::open_with_options(&path, &DecodeOptions { max_depth: 1 }).expect_err("too deep");
	assert!(matches!(err, ArchiveError::DecodeDepthExceeded { max_depth: 1 }));
}
