use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use crate::archive::serial::{ArchiveEnum, EnumSerializer, ListSerializer, OptionSerializer, Placement, Record, RecordSerializer, ScalarSerializer};
use crate::archive::{ArchiveError, ArchiveObject, ArchiveType, Null, Result, Value, register_definitions};

/// Tree shape a serializer produces for its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
	/// A single value placed per [`Placement`].
	Scalar,
	/// A child node; the payload is its default name.
	Object(&'static str),
}

/// Converts one static type to and from archive nodes.
pub trait TypeSerializer<T>: Send + Sync + 'static {
	/// Append a representation of `value` under `parent`.
	fn serialize(&self, registry: &Registry, parent: &mut ArchiveObject, value: &T, placement: &Placement) -> Result<()>;

	/// Extract a value placed relative to `node`.
	fn deserialize(&self, registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<T>;

	/// Shape written for element placements, used by list serializers to find elements.
	///
	/// Wrapping serializers forward the shape of the type they wrap.
	fn shape(&self, _registry: &Registry) -> Result<Shape> {
		Ok(Shape::Scalar)
	}
}

struct Registered {
	type_name: &'static str,
	serializer: Box<dyn Any + Send + Sync>,
}

/// Serializer table keyed by static type.
///
/// Populate with `&mut self` during startup, then share by reference; the
/// table is read-only afterwards.
#[derive(Default)]
pub struct Registry {
	entries: HashMap<TypeId, Registered>,
	defaults_loaded: bool,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry with [`Self::register_defaults`] applied.
	pub fn standard() -> Result<Self> {
		let mut registry = Self::new();
		registry.register_defaults()?;
		Ok(registry)
	}

	/// Register the serializer for `T`.
	pub fn register<T: 'static>(&mut self, serializer: impl TypeSerializer<T>) -> Result<()> {
		let type_name = type_name::<T>();
		match self.entries.entry(TypeId::of::<T>()) {
			Entry::Occupied(_) => Err(ArchiveError::DuplicateSerializer { type_name }),
			Entry::Vacant(slot) => {
				let serializer: Box<dyn TypeSerializer<T>> = Box::new(serializer);
				slot.insert(Registered {
					type_name,
					serializer: Box::new(serializer),
				});
				trace!(type_name, "registered serializer");
				Ok(())
			}
		}
	}

	/// Register the scalar serializer for an [`ArchiveType`].
	pub fn register_scalar<T: ArchiveType>(&mut self) -> Result<()> {
		self.register::<T>(ScalarSerializer::new())
	}

	/// Register the list serializer for `Vec<T>`.
	pub fn register_list<T: 'static>(&mut self) -> Result<()> {
		self.register::<Vec<T>>(ListSerializer::new())
	}

	/// Register the optional-value serializer for `Option<T>`.
	pub fn register_option<T: 'static>(&mut self) -> Result<()> {
		self.register::<Option<T>>(OptionSerializer::new())
	}

	/// Register the record serializer for `T`.
	pub fn register_record<T: Record>(&mut self) -> Result<()> {
		self.register::<T>(RecordSerializer::new())
	}

	/// Register the enum serializer for `T`.
	pub fn register_enum<T: ArchiveEnum>(&mut self) -> Result<()> {
		self.register::<T>(EnumSerializer::new())
	}

	/// Register every scalar kind, string lists, and the definition records.
	///
	/// Repeated calls are no-ops. When any default type is already
	/// registered nothing is added and the conflict is reported.
	pub fn register_defaults(&mut self) -> Result<()> {
		if self.defaults_loaded {
			return Ok(());
		}

		let mut staged = Self::new();
		staged.register_scalar::<bool>()?;
		staged.register_scalar::<Null>()?;
		staged.register_scalar::<Vec<u8>>()?;
		staged.register_scalar::<Vec<Value>>()?;
		staged.register_scalar::<i8>()?;
		staged.register_scalar::<u8>()?;
		staged.register_scalar::<i16>()?;
		staged.register_scalar::<u16>()?;
		staged.register_scalar::<i32>()?;
		staged.register_scalar::<u32>()?;
		staged.register_scalar::<i64>()?;
		staged.register_scalar::<u64>()?;
		staged.register_scalar::<String>()?;
		staged.register_scalar::<f32>()?;
		staged.register_scalar::<f64>()?;
		staged.register_list::<String>()?;
		register_definitions(&mut staged)?;

		let conflict = staged
			.entries
			.iter()
			.filter(|(id, _)| self.entries.contains_key(*id))
			.map(|(_, entry)| entry.type_name)
			.min();
		if let Some(type_name) = conflict {
			return Err(ArchiveError::DuplicateSerializer { type_name });
		}
		self.entries.extend(staged.entries);

		self.defaults_loaded = true;
		debug!(serializers = self.len(), "registered default serializers");
		Ok(())
	}

	/// Return whether `T` has a serializer.
	pub fn contains<T: 'static>(&self) -> bool {
		self.entries.contains_key(&TypeId::of::<T>())
	}

	/// Number of registered serializers.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered type names, sorted.
	pub fn type_names(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.entries.values().map(|entry| entry.type_name).collect();
		names.sort_unstable();
		names
	}

	/// Shape produced by `T`'s serializer.
	pub fn shape_of<T: 'static>(&self) -> Result<Shape> {
		self.lookup::<T>()?.shape(self)
	}

	/// Append a representation of `value` under `parent`.
	pub fn serialize<T: 'static>(&self, parent: &mut ArchiveObject, value: &T, placement: &Placement) -> Result<()> {
		let serializer = self.lookup::<T>()?;
		trace!(type_name = type_name::<T>(), parent = parent.name(), "serialize");
		serializer.serialize(self, parent, value, placement)
	}

	/// Extract a `T` placed relative to `node`.
	pub fn deserialize<T: 'static>(&self, node: &ArchiveObject, placement: &Placement) -> Result<T> {
		let serializer = self.lookup::<T>()?;
		trace!(type_name = type_name::<T>(), node = node.name(), "deserialize");
		serializer.deserialize(self, node, placement)
	}

	fn lookup<T: 'static>(&self) -> Result<&dyn TypeSerializer<T>> {
		self.entries
			.get(&TypeId::of::<T>())
			.and_then(|entry| entry.serializer.downcast_ref::<Box<dyn TypeSerializer<T>>>())
			.map(|serializer| &**serializer)
			.ok_or(ArchiveError::SerializerNotFound { type_name: type_name::<T>() })
	}
}
