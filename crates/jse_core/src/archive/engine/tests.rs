use crate::archive::{
	ArchiveError, ArchiveObject, BindingDef, ControlDef, EditorSession, Engine, EngineResult, ErrorKind, ExceptionInfo, Placement, Registry,
	decode, encode,
};

/// Scripted engine recording what it was sent.
#[derive(Default)]
struct MockEngine {
	fail_with: Option<Vec<u8>>,
	ui_root: ArchiveObject,
	definitions: Vec<ControlDef>,
	views: Vec<Vec<u8>>,
	saved: Vec<(String, Vec<u8>)>,
	updates: usize,
}

impl MockEngine {
	fn respond(&self, ok: impl FnOnce() -> Vec<u8>) -> EngineResult {
		match &self.fail_with {
			Some(report) => Err(report.clone()),
			None => Ok(ok()),
		}
	}
}

impl Engine for MockEngine {
	fn init(&mut self) -> EngineResult {
		self.respond(Vec::new)
	}

	fn update(&mut self) -> EngineResult {
		self.updates += 1;
		self.respond(Vec::new)
	}

	fn open_ui_file(&mut self, _path: &str) -> EngineResult {
		let bytes = encode(&self.ui_root).expect("encode ui");
		self.respond(|| bytes)
	}

	fn get_definition(&mut self, name: &str) -> EngineResult {
		let registry = Registry::standard().expect("defaults");
		let mut root = ArchiveObject::new("");
		if let Some(def) = self.definitions.iter().find(|def| def.name == name) {
			registry.serialize(&mut root, def, &Placement::new()).expect("serialize def");
		}
		let bytes = encode(&root).expect("encode def");
		self.respond(|| bytes)
	}

	fn change_view(&mut self, data: &[u8]) -> EngineResult {
		self.views.push(data.to_vec());
		self.respond(Vec::new)
	}

	fn save_file(&mut self, path: &str, data: &[u8]) -> EngineResult {
		self.saved.push((path.to_owned(), data.to_vec()));
		self.respond(Vec::new)
	}
}

fn exception_report(registry: &Registry, message: &str) -> Vec<u8> {
	let info = ExceptionInfo {
		message: message.to_owned(),
		stack_trace: "at Engine::update".to_owned(),
	};
	let mut root = ArchiveObject::new("");
	registry.serialize(&mut root, &info, &Placement::new()).expect("serialize");
	encode(&root).expect("encode")
}

#[test]
fn open_ui_file_returns_view_child() {
	let registry = Registry::standard().expect("defaults");
	let engine = MockEngine {
		ui_root: ArchiveObject::new("")
			.with_child(ArchiveObject::new("meta"))
			.with_child(ArchiveObject::new("UI:view").with_attribute("title", "Main")),
		..MockEngine::default()
	};
	let mut session = EditorSession::new(engine, &registry);

	let view = session.open_ui_file("main.ui").expect("open").expect("view present");
	assert_eq!(view.name(), "UI:view");
	assert_eq!(view.expect_attribute_as::<String>("title").expect("title"), "Main");
}

#[test]
fn open_ui_file_without_view_is_none() {
	let registry = Registry::standard().expect("defaults");
	let mut session = EditorSession::new(MockEngine::default(), &registry);
	assert!(session.open_ui_file("empty.ui").expect("open").is_none());
}

#[test]
fn definition_for_deserializes_control() {
	let registry = Registry::standard().expect("defaults");
	let def = ControlDef {
		name: "Slider".to_owned(),
		bindings: vec![BindingDef {
			name: "value".to_owned(),
			target_name: "Float".to_owned(),
			fields: Vec::new(),
		}],
	};
	let engine = MockEngine {
		definitions: vec![def.clone()],
		..MockEngine::default()
	};
	let mut session = EditorSession::new(engine, &registry);

	assert_eq!(session.definition_for("Slider").expect("definition"), def);
	let err = session.definition_for("Unknown").expect_err("no such control");
	assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn change_view_as_root_absorbs_tree() {
	let registry = Registry::standard().expect("defaults");
	let mut session = EditorSession::new(MockEngine::default(), &registry);
	let tree = ArchiveObject::new("view").with_attribute("width", 640_u32).with_child(ArchiveObject::new("button"));

	session.change_view(tree.clone(), true).expect("as root");
	session.change_view(tree.clone(), false).expect("as child");

	let engine = session.into_engine();
	let as_root = decode(&engine.views[0]).expect("decode").root;
	assert!(as_root.structurally_eq(&tree));

	let as_child = decode(&engine.views[1]).expect("decode").root;
	assert!(as_child.attributes().is_empty());
	assert_eq!(as_child.expect_child("view").expect("child"), &tree);
}

#[test]
fn save_object_to_file_forwards_path_and_bytes() {
	let registry = Registry::standard().expect("defaults");
	let mut session = EditorSession::new(MockEngine::default(), &registry);
	let tree = ArchiveObject::new("scene").with_value(3_i64);

	session.save_object_to_file("out/scene.jse", tree.clone(), false).expect("save");
	let (path, bytes) = &session.engine().saved[0];
	assert_eq!(path, "out/scene.jse");
	assert_eq!(decode(bytes).expect("decode").root.expect_child("scene").expect("scene"), &tree);
}

#[test]
fn engine_failure_carries_decoded_exception() {
	let registry = Registry::standard().expect("defaults");
	let engine = MockEngine {
		fail_with: Some(exception_report(&registry, "frame failed")),
		..MockEngine::default()
	};
	let mut session = EditorSession::new(engine, &registry);

	let err = session.update().expect_err("failure");
	assert_eq!(err.kind(), ErrorKind::Engine);
	assert!(matches!(&err, ArchiveError::Engine { message, stack_trace } if message == "frame failed" && stack_trace == "at Engine::update"));
	assert_eq!(err.to_string(), "frame failed\nTrace:\nat Engine::update");
	assert_eq!(session.engine().updates, 1);
}

#[test]
fn engine_failure_without_report_is_still_engine_error() {
	let registry = Registry::standard().expect("defaults");
	let engine = MockEngine {
		fail_with: Some(Vec::new()),
		..MockEngine::default()
	};
	let mut session = EditorSession::new(engine, &registry);
	let err = session.init().expect_err("failure");
	assert!(matches!(&err, ArchiveError::Engine { message, .. } if message.contains("init")));
}

#[test]
fn corrupt_exception_report_surfaces_codec_error() {
	let registry = Registry::standard().expect("defaults");
	let mut report = exception_report(&registry, "boom");
	let last = report.len() - 1;
	report[last] ^= 0x01;
	let engine = MockEngine {
		fail_with: Some(report),
		..MockEngine::default()
	};
	let mut session = EditorSession::new(engine, &registry);
	assert_eq!(session.init().expect_err("failure").kind(), ErrorKind::Integrity);
}
