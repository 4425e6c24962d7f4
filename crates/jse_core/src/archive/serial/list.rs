use std::marker::PhantomData;

use crate::archive::serial::placement::{LIST_NAME, locate};
use crate::archive::serial::{Placement, Registry, Shape, TypeSerializer};
use crate::archive::{ArchiveObject, Result};

/// Serializer for `Vec<T>`, delegating each element back into the registry.
///
/// Elements use [`Placement::element`]: scalar-shaped elements become
/// positional values, object-shaped elements become children named by the
/// element type. Without `flatten`, elements live in a wrapper child.
pub struct ListSerializer<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> ListSerializer<T> {
	/// Create the serializer.
	pub fn new() -> Self {
		Self { _marker: PhantomData }
	}
}

impl<T> Default for ListSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> TypeSerializer<Vec<T>> for ListSerializer<T> {
	fn serialize(&self, registry: &Registry, parent: &mut ArchiveObject, value: &Vec<T>, placement: &Placement) -> Result<()> {
		let target = if placement.flatten {
			parent
		} else {
			parent.add_child(ArchiveObject::new(placement.name_or(LIST_NAME)))
		};

		let element = placement.element();
		for (idx, item) in value.iter().enumerate() {
			registry.serialize(target, item, &element.clone().at(idx))?;
		}
		Ok(())
	}

	fn deserialize(&self, registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<Vec<T>> {
		let target = if placement.flatten { node } else { locate(node, placement.name_or(LIST_NAME))? };

		let element = placement.element();
		match registry.shape_of::<T>()? {
			Shape::Scalar => (0..target.values().len())
				.map(|idx| registry.deserialize::<T>(target, &element.clone().at(idx)))
				.collect(),
			Shape::Object(name) => target.children_named(name).map(|child| registry.deserialize::<T>(child, &element)).collect(),
		}
	}

	fn shape(&self, _registry: &Registry) -> Result<Shape> {
		Ok(Shape::Object(LIST_NAME))
	}
}
