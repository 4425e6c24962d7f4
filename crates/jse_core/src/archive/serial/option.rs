use std::any::type_name;
use std::marker::PhantomData;

use crate::archive::serial::placement::VALUE_NAME;
use crate::archive::serial::{Placement, Registry, Shape, Slot, TypeSerializer};
use crate::archive::{ArchiveError, ArchiveObject, Result, Value};

/// Serializer for `Option<T>`, placed with the inner type's shape.
///
/// `None` writes nothing in an attribute or child slot, so an absent slot
/// reads as `None`. As a main value (list elements) `None` keeps its position:
/// a `Null` value for scalar shapes, or a child holding only `Null` for object
/// shapes. A stored `Null` therefore always reads as `None`.
///
/// Flattened placements are rejected: a flattened `None` leaves nothing to
/// tell it apart from an empty inner value.
pub struct OptionSerializer<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> OptionSerializer<T> {
	/// Create the serializer.
	pub fn new() -> Self {
		Self { _marker: PhantomData }
	}
}

impl<T> Default for OptionSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> TypeSerializer<Option<T>> for OptionSerializer<T> {
	fn serialize(&self, registry: &Registry, parent: &mut ArchiveObject, value: &Option<T>, placement: &Placement) -> Result<()> {
		reject_flatten::<T>(placement)?;
		match value {
			Some(inner) => registry.serialize(parent, inner, placement),
			None if placement.slot() == Slot::Value => {
				match registry.shape_of::<T>()? {
					Shape::Scalar => parent.add_value(Value::Null),
					Shape::Object(name) => {
						parent.add_child(ArchiveObject::new(placement.name_or(name)).with_value(Value::Null));
					}
				}
				Ok(())
			}
			None => Ok(()),
		}
	}

	fn deserialize(&self, registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<Option<T>> {
		reject_flatten::<T>(placement)?;
		let present = match registry.shape_of::<T>()? {
			Shape::Scalar => placed_scalar(node, placement).is_some_and(|value| !matches!(value, Value::Null)),
			Shape::Object(name) => {
				let name = placement.name_or(name);
				let target = if node.name() == name { Some(node) } else { node.child(name) };
				target.is_some_and(|target| !is_null_marker(target))
			}
		};
		if !present {
			return Ok(None);
		}
		registry.deserialize(node, placement).map(Some)
	}

	fn shape(&self, registry: &Registry) -> Result<Shape> {
		registry.shape_of::<T>()
	}
}

fn reject_flatten<T>(placement: &Placement) -> Result<()> {
	if placement.flatten {
		return Err(ArchiveError::UnsupportedPlacement {
			type_name: type_name::<Option<T>>(),
			reason: "optional values cannot be flattened",
		});
	}
	Ok(())
}

fn placed_scalar<'n>(node: &'n ArchiveObject, placement: &Placement) -> Option<&'n Value> {
	match placement.slot() {
		Slot::Value => node.value(placement.index),
		Slot::Attribute => node.attribute(placement.name_or(VALUE_NAME)),
		Slot::Child => node.child(placement.name_or(VALUE_NAME)).and_then(|child| child.value(0)),
	}
}

fn is_null_marker(node: &ArchiveObject) -> bool {
	node.attributes().is_empty() && node.children().is_empty() && matches!(node.values(), [Value::Null])
}
