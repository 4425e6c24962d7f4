use jse::archive::{ArchiveObject, Result, Value};
use serde::{Deserialize, Serialize};

/// Print one pretty JSON document to stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Parse the tree JSON form.
pub(crate) fn parse_tree(text: &str) -> Result<TreeJson> {
	Ok(serde_json::from_str(text).map_err(std::io::Error::from)?)
}

/// JSON form of one archive node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TreeJson {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub attributes: Vec<AttributeJson>,
	#[serde(default)]
	pub values: Vec<ValueJson>,
	#[serde(default)]
	pub children: Vec<TreeJson>,
}

/// JSON form of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AttributeJson {
	pub name: String,
	pub value: ValueJson,
}

/// JSON form of one value, tagged by its kind label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub(crate) enum ValueJson {
	Bool(bool),
	Null,
	Bytes(Vec<u8>),
	Array(Vec<ValueJson>),
	I8(i8),
	U8(u8),
	I16(i16),
	U16(u16),
	I32(i32),
	U32(u32),
	I64(i64),
	U64(u64),
	String(String),
	F32(#[serde(with = "f32_json")] f32),
	F64(#[serde(with = "f64_json")] f64),
}

/// Non-finite floats travel as the strings `"nan"`, `"inf"`, and `"-inf"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FloatJson {
	Number(f64),
	Text(String),
}

impl FloatJson {
	fn into_f64<E: serde::de::Error>(self) -> std::result::Result<f64, E> {
		match self {
			Self::Number(value) => Ok(value),
			Self::Text(text) => match text.as_str() {
				"nan" => Ok(f64::NAN),
				"inf" => Ok(f64::INFINITY),
				"-inf" => Ok(f64::NEG_INFINITY),
				other => Err(E::custom(format!("unknown float literal '{other}'"))),
			},
		}
	}
}

fn non_finite_label(value: f64) -> &'static str {
	if value.is_nan() {
		"nan"
	} else if value.is_sign_negative() {
		"-inf"
	} else {
		"inf"
	}
}

mod f32_json {
	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
		if value.is_finite() {
			serializer.serialize_f32(*value)
		} else {
			serializer.serialize_str(super::non_finite_label(f64::from(*value)))
		}
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
		super::FloatJson::deserialize(deserializer)?.into_f64().map(|value| value as f32)
	}
}

mod f64_json {
	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
		if value.is_finite() {
			serializer.serialize_f64(*value)
		} else {
			serializer.serialize_str(super::non_finite_label(*value))
		}
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
		super::FloatJson::deserialize(deserializer)?.into_f64()
	}
}

impl From<&ArchiveObject> for TreeJson {
	fn from(node: &ArchiveObject) -> Self {
		Self {
			name: node.name().to_owned(),
			attributes: node
				.attributes()
				.iter()
				.map(|attr| AttributeJson {
					name: attr.name.clone(),
					value: ValueJson::from(&attr.value),
				})
				.collect(),
			values: node.values().iter().map(ValueJson::from).collect(),
			children: node.children().iter().map(TreeJson::from).collect(),
		}
	}
}

impl From<TreeJson> for ArchiveObject {
	fn from(tree: TreeJson) -> Self {
		let mut node = ArchiveObject::new(tree.name);
		for attr in tree.attributes {
			node.set_attribute(attr.name, Value::from(attr.value));
		}
		node.add_values(tree.values.into_iter().map(Value::from));
		for child in tree.children {
			node.add_child(ArchiveObject::from(child));
		}
		node
	}
}

impl From<&Value> for ValueJson {
	fn from(value: &Value) -> Self {
		match value {
			Value::Bool(v) => Self::Bool(*v),
			Value::Null => Self::Null,
			Value::Bytes(v) => Self::Bytes(v.clone()),
			Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
			Value::I8(v) => Self::I8(*v),
			Value::U8(v) => Self::U8(*v),
			Value::I16(v) => Self::I16(*v),
			Value::U16(v) => Self::U16(*v),
			Value::I32(v) => Self::I32(*v),
			Value::U32(v) => Self::U32(*v),
			Value::I64(v) => Self::I64(*v),
			Value::U64(v) => Self::U64(*v),
			Value::String(v) => Self::String(v.clone()),
			Value::F32(v) => Self::F32(*v),
			Value::F64(v) => Self::F64(*v),
		}
	}
}

impl From<ValueJson> for Value {
	fn from(value: ValueJson) -> Self {
		match value {
			ValueJson::Bool(v) => Self::Bool(v),
			ValueJson::Null => Self::Null,
			ValueJson::Bytes(v) => Self::Bytes(v),
			ValueJson::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			ValueJson::I8(v) => Self::I8(v),
			ValueJson::U8(v) => Self::U8(v),
			ValueJson::I16(v) => Self::I16(v),
			ValueJson::U16(v) => Self::U16(v),
			ValueJson::I32(v) => Self::I32(v),
			ValueJson::U32(v) => Self::U32(v),
			ValueJson::I64(v) => Self::I64(v),
			ValueJson::U64(v) => Self::U64(v),
			ValueJson::String(v) => Self::String(v),
			ValueJson::F32(v) => Self::F32(v),
			ValueJson::F64(v) => Self::F64(v),
		}
	}
}

#[cfg(test)]
mod tests {
	use jse::archive::{ArchiveObject, Null};

	use super::{TreeJson, ValueJson, parse_tree};

	#[test]
	fn values_serialize_with_kind_labels() {
		let json = serde_json::to_value(ValueJson::U16(7)).expect("serialize");
		assert_eq!(json, serde_json::json!({ "kind": "u16", "value": 7 }));

		let json = serde_json::to_value(ValueJson::Null).expect("serialize");
		assert_eq!(json, serde_json::json!({ "kind": "null" }));
	}

	#[test]
	fn tree_converts_both_ways() {
		let tree = ArchiveObject::new("root")
			.with_attribute("on", true)
			.with_value(Null)
			.with_value(vec![1_u8, 2])
			.with_child(ArchiveObject::new("child").with_value(-3_i64));

		let json = TreeJson::from(&tree);
		let text = serde_json::to_string(&json).expect("serialize");
		let back = ArchiveObject::from(parse_tree(&text).expect("parse"));
		assert_eq!(back, tree);
	}

	#[test]
	fn non_finite_floats_survive_json() {
		let json = serde_json::to_value(ValueJson::F64(f64::NEG_INFINITY)).expect("serialize");
		assert_eq!(json, serde_json::json!({ "kind": "f64", "value": "-inf" }));
		let json = serde_json::to_value(ValueJson::F32(1.5)).expect("serialize");
		assert_eq!(json, serde_json::json!({ "kind": "f32", "value": 1.5 }));

		let tree = ArchiveObject::new("")
			.with_attribute("ratio", f32::NAN)
			.with_value(f64::INFINITY)
			.with_value(-0.25_f32);
		let text = serde_json::to_string(&TreeJson::from(&tree)).expect("serialize");
		let back = ArchiveObject::from(parse_tree(&text).expect("parse"));
		assert!(back.expect_attribute_as::<f32>("ratio").expect("ratio").is_nan());
		assert_eq!(back.expect_value_as::<f64>(0).expect("inf"), f64::INFINITY);
		assert_eq!(back.expect_value_as::<f32>(1).expect("finite"), -0.25);

		let err = parse_tree(r#"{ "values": [{ "kind": "f64", "value": "huge" }] }"#).expect_err("bad literal");
		assert_eq!(err.kind(), jse::archive::ErrorKind::Io);
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let tree = parse_tree(r#"{ "values": [{ "kind": "string", "value": "hi" }] }"#).expect("parse");
		let node = ArchiveObject::from(tree);
		assert_eq!(node.name(), "");
		assert_eq!(node.values().len(), 1);
		assert!(node.children().is_empty());
	}

	#[test]
	fn malformed_json_is_io_error() {
		let err = parse_tree("{ not json").expect_err("malformed");
		assert_eq!(err.kind(), jse::archive::ErrorKind::Io);
	}
}
