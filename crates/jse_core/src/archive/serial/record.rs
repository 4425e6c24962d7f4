use std::marker::PhantomData;

use crate::archive::serial::placement::locate;
use crate::archive::serial::{Placement, Registry, Shape, TypeSerializer};
use crate::archive::{ArchiveObject, Result};

/// Native struct stored as a named child node holding one entry per field.
pub trait Record: Sized + Send + Sync + 'static {
	/// Default node name.
	const NAME: &'static str;

	/// Write every field into `node`.
	fn write_fields(&self, registry: &Registry, node: &mut ArchiveObject) -> Result<()>;

	/// Read every field from `node`.
	fn read_fields(registry: &Registry, node: &ArchiveObject) -> Result<Self>;
}

/// Serializer for [`Record`] types.
///
/// Reads from the given node itself when its name matches, else from its
/// first child with the expected name.
pub struct RecordSerializer<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> RecordSerializer<T> {
	/// Create the serializer.
	pub fn new() -> Self {
		Self { _marker: PhantomData }
	}
}

impl<T> Default for RecordSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Record> TypeSerializer<T> for RecordSerializer<T> {
	fn serialize(&self, registry: &Registry, parent: &mut ArchiveObject, value: &T, placement: &Placement) -> Result<()> {
		if placement.flatten {
			return value.write_fields(registry, parent);
		}

		let mut node = ArchiveObject::new(placement.name_or(T::NAME));
		value.write_fields(registry, &mut node)?;
		parent.add_child(node);
		Ok(())
	}

	fn deserialize(&self, registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<T> {
		if placement.flatten {
			return T::read_fields(registry, node);
		}
		T::read_fields(registry, locate(node, placement.name_or(T::NAME))?)
	}

	fn shape(&self, _registry: &Registry) -> Result<Shape> {
		Ok(Shape::Object(T::NAME))
	}
}
