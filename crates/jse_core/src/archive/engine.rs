//! Byte-level boundary to the external engine process.
//!
//! Every engine call returns an archive buffer on success or an encoded
//! [`ExceptionInfo`] archive on failure. [`EditorSession`] turns both into
//! typed results.

use tracing::{debug, warn};

use crate::archive::{ArchiveError, ArchiveObject, ControlDef, ExceptionInfo, Placement, Registry, Result, decode, encode};

/// Child of the opened UI archive's root holding the view tree.
pub const UI_VIEW: &str = "UI:view";

/// Raw engine call outcome: archive bytes, or encoded [`ExceptionInfo`] bytes.
pub type EngineResult = std::result::Result<Vec<u8>, Vec<u8>>;

/// Blocking calls exposed by the engine.
pub trait Engine {
	/// Initialize the engine.
	fn init(&mut self) -> EngineResult;

	/// Advance the engine one frame.
	fn update(&mut self) -> EngineResult;

	/// Load a UI file, returning its archive.
	fn open_ui_file(&mut self, path: &str) -> EngineResult;

	/// Fetch the archived [`ControlDef`] for a control.
	fn get_definition(&mut self, name: &str) -> EngineResult;

	/// Replace the displayed view with an archived tree.
	fn change_view(&mut self, data: &[u8]) -> EngineResult;

	/// Save an archived tree to `path`.
	fn save_file(&mut self, path: &str, data: &[u8]) -> EngineResult;
}

/// Typed wrapper over an [`Engine`] using a shared [`Registry`].
pub struct EditorSession<'r, E> {
	engine: E,
	registry: &'r Registry,
}

impl<'r, E: Engine> EditorSession<'r, E> {
	/// Wrap an engine.
	pub fn new(engine: E, registry: &'r Registry) -> Self {
		Self { engine, registry }
	}

	/// Borrow the wrapped engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Unwrap the engine.
	pub fn into_engine(self) -> E {
		self.engine
	}

	/// Initialize the engine.
	pub fn init(&mut self) -> Result<()> {
		let result = self.engine.init();
		self.check("init", result).map(drop)
	}

	/// Advance the engine one frame.
	pub fn update(&mut self) -> Result<()> {
		let result = self.engine.update();
		self.check("update", result).map(drop)
	}

	/// Open a UI file and return its view tree, if it has one.
	pub fn open_ui_file(&mut self, path: &str) -> Result<Option<ArchiveObject>> {
		let result = self.engine.open_ui_file(path);
		let bytes = self.check("open_ui_file", result)?;
		let mut root = decode(&bytes)?.root;
		let view = root.take_child(UI_VIEW);
		debug!(path, found = view.is_some(), "opened ui file");
		Ok(view)
	}

	/// Fetch and deserialize the definition of a control.
	pub fn definition_for(&mut self, control: &str) -> Result<ControlDef> {
		let result = self.engine.get_definition(control);
		let bytes = self.check("get_definition", result)?;
		let root = decode(&bytes)?.root;
		self.registry.deserialize(&root, &Placement::new())
	}

	/// Send a view tree to the engine.
	///
	/// With `as_root`, the tree's contents become the archive root; otherwise
	/// the tree is added as a child of an empty root.
	pub fn change_view(&mut self, tree: ArchiveObject, as_root: bool) -> Result<()> {
		let bytes = encode(&wrap_root(tree, as_root))?;
		let result = self.engine.change_view(&bytes);
		self.check("change_view", result).map(drop)
	}

	/// Ask the engine to save a tree to `path`. `as_root` as in [`Self::change_view`].
	pub fn save_object_to_file(&mut self, path: &str, tree: ArchiveObject, as_root: bool) -> Result<()> {
		let bytes = encode(&wrap_root(tree, as_root))?;
		let result = self.engine.save_file(path, &bytes);
		self.check("save_file", result).map(drop)
	}

	fn check(&self, call: &'static str, result: EngineResult) -> Result<Vec<u8>> {
		let report = match result {
			Ok(bytes) => return Ok(bytes),
			Err(report) => report,
		};

		if report.is_empty() {
			warn!(call, "engine call failed without a report");
			return Err(ArchiveError::Engine {
				message: format!("engine call {call} failed"),
				stack_trace: String::new(),
			});
		}

		let root = decode(&report)?.root;
		let info: ExceptionInfo = self.registry.deserialize(&root, &Placement::new())?;
		warn!(call, message = %info.message, "engine call failed");
		Err(ArchiveError::Engine {
			message: info.message,
			stack_trace: info.stack_trace,
		})
	}
}

fn wrap_root(tree: ArchiveObject, as_root: bool) -> ArchiveObject {
	let mut root = ArchiveObject::new("");
	if as_root {
		root.absorb(tree);
	} else {
		root.add_child(tree);
	}
	root
}

#[cfg(test)]
mod tests;
