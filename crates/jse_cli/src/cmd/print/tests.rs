use jse::archive::{ArchiveObject, Value};

use super::{PrintOptions, format_value, render_tree};

fn sample() -> ArchiveObject {
	ArchiveObject::new("")
		.with_attribute("enabled", true)
		.with_value(1_i32)
		.with_value(2_i32)
		.with_child(ArchiveObject::new("item").with_value("hi"))
}

#[test]
fn renders_attributes_values_and_children() {
	let text = render_tree(&sample(), PrintOptions::default());
	let expected = "<root>\n  @enabled = bool true\n  [0] i32 1\n  [1] i32 2\n  item\n    [0] string \"hi\"\n";
	assert_eq!(text, expected);
}

#[test]
fn depth_limit_collapses_subtrees() {
	let tree = ArchiveObject::new("").with_child(ArchiveObject::new("a").with_child(ArchiveObject::new("b")));
	let options = PrintOptions {
		max_depth: 1,
		..PrintOptions::default()
	};
	let text = render_tree(&tree, options);
	assert!(text.contains("a { ... 2 nodes }"), "{text}");
	assert!(!text.contains("\n    b"), "{text}");
}

#[test]
fn item_limit_reports_remainder() {
	let mut tree = ArchiveObject::new("list");
	tree.add_values(0..10_u32);
	let options = PrintOptions {
		max_items: 3,
		..PrintOptions::default()
	};
	let text = render_tree(&tree, options);
	assert!(text.contains("[2] u32 2"));
	assert!(!text.contains("[3]"));
	assert!(text.contains("... 7 more values"));
}

#[test]
fn values_are_truncated() {
	let options = PrintOptions::for_overview();
	let bytes = format_value(&Value::from(vec![0xAB_u8; 12]), options);
	assert_eq!(bytes, "bytes[12] ab ab ab ab ab ab ab ab ..");

	let long = format_value(&Value::from("x".repeat(100)), options);
	assert!(long.ends_with("...\""));

	let nested = format_value(&Value::Array(vec![Value::Null, Value::from(1.5_f64)]), options);
	assert_eq!(nested, "array[2] [null, f64 1.5]");
}
