use std::borrow::Cow;

use crate::archive::{ArchiveObject, Result};

/// Default name for scalar and enum children and attributes.
pub(crate) const VALUE_NAME: &str = "value";
/// Default name for list wrapper children.
pub(crate) const LIST_NAME: &str = "items";

/// Where a placed value lives relative to its parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
	/// Positional value on the parent.
	Value,
	/// Named attribute on the parent.
	Attribute,
	/// Named child node.
	Child,
}

/// Placement configuration passed alongside every (de)serialize call.
///
/// Flags are independent; when several are set, main value wins over
/// attribute, which wins over child object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
	/// Explicit entry name; each serializer has its own default.
	pub name: Option<Cow<'static, str>>,
	/// Positional index used when reading a main value.
	pub index: usize,
	/// Store as a positional value on the parent.
	pub main_value: bool,
	/// Store as a named attribute on the parent.
	pub attribute: bool,
	/// Store as a named child node. Implied when no other slot flag is set.
	pub child_object: bool,
	/// Write list elements or record contents directly into the parent.
	pub flatten: bool,
	/// Store enums as their raw `i32` value instead of their symbol.
	pub enum_raw: bool,
}

impl Placement {
	/// Default placement: a child object with the serializer's default name.
	pub fn new() -> Self {
		Self::default()
	}

	/// Placement with an explicit name.
	pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	/// Store as a positional value.
	pub fn as_main_value(mut self) -> Self {
		self.main_value = true;
		self
	}

	/// Store as a named attribute.
	pub fn as_attribute(mut self) -> Self {
		self.attribute = true;
		self
	}

	/// Store as a named child node.
	pub fn as_child_object(mut self) -> Self {
		self.child_object = true;
		self
	}

	/// Write contents directly into the parent.
	pub fn flattened(mut self) -> Self {
		self.flatten = true;
		self
	}

	/// Store enums by raw value.
	pub fn raw_enum(mut self) -> Self {
		self.enum_raw = true;
		self
	}

	/// Set the positional index.
	pub fn at(mut self, index: usize) -> Self {
		self.index = index;
		self
	}

	/// Placement for one element of a list placed with `self`.
	pub fn element(&self) -> Self {
		Self {
			main_value: true,
			enum_raw: self.enum_raw,
			..Self::default()
		}
	}

	/// Resolve the effective slot.
	pub fn slot(&self) -> Slot {
		if self.main_value {
			Slot::Value
		} else if self.attribute {
			Slot::Attribute
		} else {
			Slot::Child
		}
	}

	/// Explicit name, or `default` when unset.
	pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
		self.name.as_deref().unwrap_or(default)
	}
}

/// Return `node` itself when it carries `name`, else its first child called `name`.
pub(crate) fn locate<'n>(node: &'n ArchiveObject, name: &str) -> Result<&'n ArchiveObject> {
	if node.name() == name {
		return Ok(node);
	}
	node.expect_child(name)
}
