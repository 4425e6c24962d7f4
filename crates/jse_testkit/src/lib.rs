//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Create a fresh, empty directory under `<target>/jse-scratch` for one test.
///
/// Names combine `label`, the process id, and a per-process counter so
/// parallel tests never share a directory.
pub fn scratch_dir(label: &str) -> PathBuf {
	let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
	let dir = target_dir().join("jse-scratch").join(format!("{label}-{}-{seq}", std::process::id()));
	if dir.exists() {
		std::fs::remove_dir_all(&dir).expect("clear stale scratch dir");
	}
	std::fs::create_dir_all(&dir).expect("create scratch dir");
	dir
}

/// Parse command output as one JSON document.
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
	serde_json::from_slice(stdout).expect("stdout is valid json")
}
