use crate::archive::{ArchiveError, ArchiveType, Result, Value};

/// Named attribute entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
	/// Attribute identifier.
	pub name: String,
	/// Attribute payload.
	pub value: Value,
}

/// Named archive tree node with attributes, positional values, and children.
///
/// Children are owned by their parent, so a node can never appear twice in
/// one tree and a missing child is unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchiveObject {
	name: String,
	attributes: Vec<Attribute>,
	values: Vec<Value>,
	children: Vec<ArchiveObject>,
}

impl ArchiveObject {
	/// Create an empty node.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Node name. Empty for decoded roots.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Attributes in insertion order.
	pub fn attributes(&self) -> &[Attribute] {
		&self.attributes
	}

	/// Positional values in insertion order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Child nodes in insertion order.
	pub fn children(&self) -> &[ArchiveObject] {
		&self.children
	}

	/// Set an attribute, replacing an existing one with the same name in place.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|attr| attr.name == name) {
			Some(attr) => attr.value = value,
			None => self.attributes.push(Attribute { name, value }),
		}
	}

	/// Append a positional value.
	pub fn add_value(&mut self, value: impl Into<Value>) {
		self.values.push(value.into());
	}

	/// Append positional values.
	pub fn add_values<I>(&mut self, values: I)
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		self.values.extend(values.into_iter().map(Into::into));
	}

	/// Append a child node, returning a handle to it.
	pub fn add_child(&mut self, child: ArchiveObject) -> &mut ArchiveObject {
		self.children.push(child);
		let last = self.children.len() - 1;
		&mut self.children[last]
	}

	/// Builder form of [`Self::set_attribute`].
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Builder form of [`Self::add_value`].
	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.add_value(value);
		self
	}

	/// Builder form of [`Self::add_child`].
	pub fn with_child(mut self, child: ArchiveObject) -> Self {
		self.children.push(child);
		self
	}

	/// Look up an attribute by name.
	pub fn attribute(&self, name: &str) -> Option<&Value> {
		self.attributes.iter().find(|attr| attr.name == name).map(|attr| &attr.value)
	}

	/// Look up an attribute by name, failing when absent.
	pub fn expect_attribute(&self, name: &str) -> Result<&Value> {
		self.attribute(name).ok_or_else(|| ArchiveError::MissingAttribute { name: name.to_owned() })
	}

	/// Read an attribute as `T`; `None` when absent.
	pub fn attribute_as<T: ArchiveType>(&self, name: &str) -> Result<Option<T>> {
		self.attribute(name).map(Value::get::<T>).transpose()
	}

	/// Read an attribute as `T`, falling back to `default` when absent.
	pub fn attribute_or<T: ArchiveType>(&self, name: &str, default: T) -> Result<T> {
		Ok(self.attribute_as(name)?.unwrap_or(default))
	}

	/// Read an attribute as `T`, failing when absent.
	pub fn expect_attribute_as<T: ArchiveType>(&self, name: &str) -> Result<T> {
		self.expect_attribute(name)?.get()
	}

	/// Look up a positional value.
	pub fn value(&self, index: usize) -> Option<&Value> {
		self.values.get(index)
	}

	/// Look up a positional value, failing when absent.
	pub fn expect_value(&self, index: usize) -> Result<&Value> {
		self.value(index).ok_or(ArchiveError::MissingValue { index })
	}

	/// Read a positional value as `T`; `None` when absent.
	pub fn value_as<T: ArchiveType>(&self, index: usize) -> Result<Option<T>> {
		self.value(index).map(Value::get::<T>).transpose()
	}

	/// Read a positional value as `T`, falling back to `default` when absent.
	pub fn value_or<T: ArchiveType>(&self, index: usize, default: T) -> Result<T> {
		Ok(self.value_as(index)?.unwrap_or(default))
	}

	/// Read a positional value as `T`, failing when absent.
	pub fn expect_value_as<T: ArchiveType>(&self, index: usize) -> Result<T> {
		self.expect_value(index)?.get()
	}

	/// Look up the first child with `name`.
	pub fn child(&self, name: &str) -> Option<&ArchiveObject> {
		self.children.iter().find(|child| child.name == name)
	}

	/// Look up the first child with `name`, failing when absent.
	pub fn expect_child(&self, name: &str) -> Result<&ArchiveObject> {
		self.child(name).ok_or_else(|| ArchiveError::MissingChild { name: name.to_owned() })
	}

	/// Remove and return the first child with `name`.
	pub fn take_child(&mut self, name: &str) -> Option<ArchiveObject> {
		let idx = self.children.iter().position(|child| child.name == name)?;
		Some(self.children.remove(idx))
	}

	/// Iterate all children with `name`, in order.
	pub fn children_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s ArchiveObject> + 's {
		self.children.iter().filter(move |child| child.name == name)
	}

	/// Move another node's attributes, values, and children into this node.
	///
	/// The other node's name is discarded.
	pub fn absorb(&mut self, other: ArchiveObject) {
		for attr in other.attributes {
			self.set_attribute(attr.name, attr.value);
		}
		self.values.extend(other.values);
		self.children.extend(other.children);
	}

	/// Compare contents recursively, ignoring this node's own name.
	///
	/// Floats compare by bit pattern, so a decoded NaN equals its source.
	pub fn structurally_eq(&self, other: &ArchiveObject) -> bool {
		self.attributes.len() == other.attributes.len()
			&& self
				.attributes
				.iter()
				.zip(&other.attributes)
				.all(|(left, right)| left.name == right.name && same_bits(&left.value, &right.value))
			&& self.values.len() == other.values.len()
			&& self.values.iter().zip(&other.values).all(|(left, right)| same_bits(left, right))
			&& self.children.len() == other.children.len()
			&& self
				.children
				.iter()
				.zip(&other.children)
				.all(|(left, right)| left.name == right.name && left.structurally_eq(right))
	}

	/// Count nodes, attributes, and values in this subtree.
	pub fn stats(&self) -> TreeStats {
		let mut stats = TreeStats::default();
		self.collect_stats(1, &mut stats);
		stats
	}

	fn collect_stats(&self, depth: u32, stats: &mut TreeStats) {
		stats.nodes += 1;
		stats.attributes += self.attributes.len();
		stats.values += self.values.len();
		stats.max_depth = stats.max_depth.max(depth);
		for child in &self.children {
			child.collect_stats(depth + 1, stats);
		}
	}
}

/// Aggregate counts from a subtree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
	/// Number of nodes, including the starting node.
	pub nodes: usize,
	/// Number of attributes across all nodes.
	pub attributes: usize,
	/// Number of positional values across all nodes.
	pub values: usize,
	/// Deepest node level; the starting node is level 1.
	pub max_depth: u32,
}

fn same_bits(left: &Value, right: &Value) -> bool {
	match (left, right) {
		(Value::F32(left), Value::F32(right)) => left.to_bits() == right.to_bits(),
		(Value::F64(left), Value::F64(right)) => left.to_bits() == right.to_bits(),
		(Value::Array(left), Value::Array(right)) => {
			left.len() == right.len() && left.iter().zip(right).all(|(left, right)| same_bits(left, right))
		}
		_ => left == right,
	}
}

#[cfg(test)]
mod tests;
