use std::marker::PhantomData;

use crate::archive::serial::placement::VALUE_NAME;
use crate::archive::serial::{Placement, Registry, Slot, TypeSerializer};
use crate::archive::{ArchiveObject, ArchiveType, Result, Value};

/// Serializer for any single-kind [`ArchiveType`].
///
/// Main value: positional value. Attribute: named attribute. Child object:
/// a child node holding the value at index 0.
pub struct ScalarSerializer<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> ScalarSerializer<T> {
	/// Create the serializer.
	pub fn new() -> Self {
		Self { _marker: PhantomData }
	}
}

impl<T> Default for ScalarSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ArchiveType> TypeSerializer<T> for ScalarSerializer<T> {
	fn serialize(&self, _registry: &Registry, parent: &mut ArchiveObject, value: &T, placement: &Placement) -> Result<()> {
		place_value(parent, placement, value.clone().into_value());
		Ok(())
	}

	fn deserialize(&self, _registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<T> {
		placed_value(node, placement)?.get()
	}
}

/// Store one value in the slot `placement` selects.
pub(crate) fn place_value(parent: &mut ArchiveObject, placement: &Placement, value: Value) {
	match placement.slot() {
		Slot::Value => parent.add_value(value),
		Slot::Attribute => parent.set_attribute(placement.name_or(VALUE_NAME), value),
		Slot::Child => {
			parent.add_child(ArchiveObject::new(placement.name_or(VALUE_NAME)).with_value(value));
		}
	}
}

/// Find the value stored in the slot `placement` selects.
pub(crate) fn placed_value<'n>(node: &'n ArchiveObject, placement: &Placement) -> Result<&'n Value> {
	match placement.slot() {
		Slot::Value => node.expect_value(placement.index),
		Slot::Attribute => node.expect_attribute(placement.name_or(VALUE_NAME)),
		Slot::Child => node.expect_child(placement.name_or(VALUE_NAME))?.expect_value(0),
	}
}
