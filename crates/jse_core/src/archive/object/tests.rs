use crate::archive::{ArchiveError, ArchiveObject, ErrorKind, Value, decode, encode};

#[test]
fn set_attribute_replaces_in_place() {
	let mut node = ArchiveObject::new("node");
	node.set_attribute("a", 1_i32);
	node.set_attribute("b", 2_i32);
	node.set_attribute("a", 3_i32);

	let names: Vec<_> = node.attributes().iter().map(|attr| attr.name.as_str()).collect();
	assert_eq!(names, ["a", "b"]);
	assert_eq!(node.expect_attribute_as::<i32>("a").expect("a exists"), 3);
}

#[test]
fn expect_child_on_absent_name_is_lookup_error() {
	let node = ArchiveObject::new("node").with_child(ArchiveObject::new("present"));

	assert!(node.child("missing").is_none());
	let err = node.expect_child("missing").expect_err("absent child");
	assert!(matches!(&err, ArchiveError::MissingChild { name } if name == "missing"));
	assert_eq!(err.kind(), ErrorKind::Lookup);
	assert_eq!(node.expect_child("present").expect("present").name(), "present");
}

#[test]
fn attribute_and_value_lookup_forms() {
	let node = ArchiveObject::new("node").with_attribute("flag", true).with_value(5_u8);

	assert_eq!(node.attribute("flag"), Some(&Value::Bool(true)));
	assert_eq!(node.attribute_as::<bool>("nope").expect("absent is not an error"), None);
	assert!(node.attribute_or("nope", true).expect("default"));
	assert!(matches!(node.expect_attribute("nope"), Err(ArchiveError::MissingAttribute { .. })));

	assert_eq!(node.value_as::<u8>(0).expect("present"), Some(5));
	assert_eq!(node.value_or(1, 9_u8).expect("default"), 9);
	assert!(matches!(node.expect_value(1), Err(ArchiveError::MissingValue { index: 1 })));
}

#[test]
fn typed_lookup_still_checks_kind() {
	let node = ArchiveObject::new("node").with_attribute("count", "three");
	let err = node.attribute_or("count", 0_u32).expect_err("present but wrong kind");
	assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn child_lookup_returns_first_of_shared_names() {
	let node = ArchiveObject::new("list")
		.with_child(ArchiveObject::new("item").with_value(1_i32))
		.with_child(ArchiveObject::new("other"))
		.with_child(ArchiveObject::new("item").with_value(2_i32));

	assert_eq!(node.expect_child("item").expect("item").expect_value_as::<i32>(0).expect("value"), 1);
	let all: Vec<i32> = node
		.children_named("item")
		.map(|child| child.expect_value_as::<i32>(0).expect("value"))
		.collect();
	assert_eq!(all, [1, 2]);
}

#[test]
fn take_child_moves_first_match_out() {
	let mut node = ArchiveObject::new("")
		.with_child(ArchiveObject::new("view").with_value(1_i32))
		.with_child(ArchiveObject::new("view").with_value(2_i32));

	let first = node.take_child("view").expect("first view");
	assert_eq!(first.expect_value_as::<i32>(0).expect("value"), 1);
	assert_eq!(node.children().len(), 1);
	assert!(node.take_child("absent").is_none());
}

#[test]
fn absorb_merges_contents_without_name() {
	let mut root = ArchiveObject::new("").with_attribute("keep", 1_i32);
	let view = ArchiveObject::new("view")
		.with_attribute("keep", 2_i32)
		.with_value("v")
		.with_child(ArchiveObject::new("child"));

	root.absorb(view);
	assert_eq!(root.name(), "");
	assert_eq!(root.expect_attribute_as::<i32>("keep").expect("replaced"), 2);
	assert_eq!(root.values().len(), 1);
	assert!(root.child("child").is_some());
}

#[test]
fn structural_equality_ignores_root_name() {
	let left = ArchiveObject::new("a").with_value(1_i64);
	let right = ArchiveObject::new("b").with_value(1_i64);
	assert!(left.structurally_eq(&right));
	assert_ne!(left, right);

	let nested_left = ArchiveObject::new("").with_child(ArchiveObject::new("x"));
	let nested_right = ArchiveObject::new("").with_child(ArchiveObject::new("y"));
	assert!(!nested_left.structurally_eq(&nested_right), "child names are significant");
}

#[test]
fn structural_equality_compares_floats_by_bits() {
	let tree = ArchiveObject::new("")
		.with_attribute("ratio", f32::NAN)
		.with_value(f64::NAN)
		.with_value(Value::Array(vec![Value::F64(f64::NAN)]));
	assert!(tree.structurally_eq(&tree.clone()));

	let decoded = decode(&encode(&tree).expect("encode")).expect("decode");
	assert!(decoded.root.structurally_eq(&tree));

	let zero = ArchiveObject::new("").with_value(0.0_f64);
	let negative_zero = ArchiveObject::new("").with_value(-0.0_f64);
	assert!(!zero.structurally_eq(&negative_zero), "sign bit differs");
}

#[test]
fn stats_walk_whole_subtree() {
	let tree = ArchiveObject::new("root")
		.with_attribute("a", 1_i32)
		.with_value(1_i32)
		.with_child(ArchiveObject::new("c").with_value(2_i32).with_child(ArchiveObject::new("d").with_attribute("b", true)));

	let stats = tree.stats();
	assert_eq!(stats.nodes, 3);
	assert_eq!(stats.attributes, 2);
	assert_eq!(stats.values, 2);
	assert_eq!(stats.max_depth, 3);
}
