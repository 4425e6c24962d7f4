use std::marker::PhantomData;

use crate::archive::serial::scalar::{place_value, placed_value};
use crate::archive::serial::{Placement, Registry, TypeSerializer};
use crate::archive::{ArchiveError, ArchiveObject, Result, Value};

/// Fieldless native enum stored by symbol or by raw value.
pub trait ArchiveEnum: Copy + Send + Sync + 'static {
	/// Enum name used in error reports.
	const NAME: &'static str;

	/// Every variant.
	fn variants() -> &'static [Self];

	/// Symbolic name of this variant.
	fn variant_name(self) -> &'static str;

	/// Raw numeric value of this variant.
	fn raw_value(self) -> i32;

	/// Find a variant by symbolic name.
	fn from_variant_name(name: &str) -> Option<Self> {
		Self::variants().iter().copied().find(|variant| variant.variant_name() == name)
	}

	/// Find a variant by raw value.
	fn from_raw_value(raw: i32) -> Option<Self> {
		Self::variants().iter().copied().find(|variant| variant.raw_value() == raw)
	}
}

/// Serializer for [`ArchiveEnum`] types.
///
/// Writes a string value by default and an `i32` value with `enum_raw`,
/// placed like any scalar.
pub struct EnumSerializer<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> EnumSerializer<T> {
	/// Create the serializer.
	pub fn new() -> Self {
		Self { _marker: PhantomData }
	}
}

impl<T> Default for EnumSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ArchiveEnum> TypeSerializer<T> for EnumSerializer<T> {
	fn serialize(&self, _registry: &Registry, parent: &mut ArchiveObject, value: &T, placement: &Placement) -> Result<()> {
		let stored = if placement.enum_raw {
			Value::I32(value.raw_value())
		} else {
			Value::from(value.variant_name())
		};
		place_value(parent, placement, stored);
		Ok(())
	}

	fn deserialize(&self, _registry: &Registry, node: &ArchiveObject, placement: &Placement) -> Result<T> {
		let stored = placed_value(node, placement)?;
		if placement.enum_raw {
			let raw = stored.get::<i32>()?;
			return T::from_raw_value(raw).ok_or_else(|| unknown::<T>(raw.to_string()));
		}

		let name = stored.as_str()?;
		T::from_variant_name(name).ok_or_else(|| unknown::<T>(name.to_owned()))
	}
}

fn unknown<T: ArchiveEnum>(variant: String) -> ArchiveError {
	ArchiveError::UnknownEnumVariant { enum_name: T::NAME, variant }
}
