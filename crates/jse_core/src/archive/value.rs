use std::fmt;

use crate::archive::{ArchiveError, Result};

/// Explicit null marker stored by [`Value::Null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

/// Closed set of value kinds, numbered by their wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueKind {
	/// Boolean scalar.
	Bool = 0,
	/// Null marker.
	Null = 1,
	/// Raw byte blob.
	Bytes = 2,
	/// Heterogeneous value array.
	Array = 3,
	/// Signed 8-bit integer.
	I8 = 4,
	/// Unsigned 8-bit integer.
	U8 = 5,
	/// Signed 16-bit integer.
	I16 = 6,
	/// Unsigned 16-bit integer.
	U16 = 7,
	/// Signed 32-bit integer.
	I32 = 8,
	/// Unsigned 32-bit integer.
	U32 = 9,
	/// Signed 64-bit integer.
	I64 = 10,
	/// Unsigned 64-bit integer.
	U64 = 11,
	/// UTF-8 string.
	String = 12,
	/// 32-bit float.
	F32 = 13,
	/// 64-bit float.
	F64 = 14,
}

impl ValueKind {
	/// Every kind in tag order.
	pub const ALL: [Self; 15] = [
		Self::Bool,
		Self::Null,
		Self::Bytes,
		Self::Array,
		Self::I8,
		Self::U8,
		Self::I16,
		Self::U16,
		Self::I32,
		Self::U32,
		Self::I64,
		Self::U64,
		Self::String,
		Self::F32,
		Self::F64,
	];

	/// Wire tag byte.
	pub fn tag(self) -> u8 {
		self as u8
	}

	/// Map a wire tag byte back to a kind.
	pub fn from_tag(tag: u8) -> Option<Self> {
		Self::ALL.get(usize::from(tag)).copied()
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Null => "null",
			Self::Bytes => "bytes",
			Self::Array => "array",
			Self::I8 => "i8",
			Self::U8 => "u8",
			Self::I16 => "i16",
			Self::U16 => "u16",
			Self::I32 => "i32",
			Self::U32 => "u32",
			Self::I64 => "i64",
			Self::U64 => "u64",
			Self::String => "string",
			Self::F32 => "f32",
			Self::F64 => "f64",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One archive value; holds exactly one variant of the closed kind set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Explicit null marker.
	Null,
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// Heterogeneous sequence.
	Array(Vec<Value>),
	/// Signed 8-bit integer.
	I8(i8),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// UTF-8 string.
	String(String),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
}

impl Value {
	/// Return the kind of the stored variant.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Bool(_) => ValueKind::Bool,
			Self::Null => ValueKind::Null,
			Self::Bytes(_) => ValueKind::Bytes,
			Self::Array(_) => ValueKind::Array,
			Self::I8(_) => ValueKind::I8,
			Self::U8(_) => ValueKind::U8,
			Self::I16(_) => ValueKind::I16,
			Self::U16(_) => ValueKind::U16,
			Self::I32(_) => ValueKind::I32,
			Self::U32(_) => ValueKind::U32,
			Self::I64(_) => ValueKind::I64,
			Self::U64(_) => ValueKind::U64,
			Self::String(_) => ValueKind::String,
			Self::F32(_) => ValueKind::F32,
			Self::F64(_) => ValueKind::F64,
		}
	}

	/// Return whether the stored variant is `T`'s kind.
	pub fn is<T: ArchiveType>(&self) -> bool {
		self.kind() == T::KIND
	}

	/// Read the stored value as `T`, failing unless the kinds match exactly.
	pub fn get<T: ArchiveType>(&self) -> Result<T> {
		T::from_value(self).ok_or(ArchiveError::TypeMismatch {
			expected: T::KIND,
			got: self.kind(),
		})
	}

	/// Borrow a string payload.
	pub fn as_str(&self) -> Result<&str> {
		match self {
			Self::String(text) => Ok(text),
			other => Err(other.mismatch(ValueKind::String)),
		}
	}

	/// Borrow a raw byte payload.
	pub fn as_bytes(&self) -> Result<&[u8]> {
		match self {
			Self::Bytes(bytes) => Ok(bytes),
			other => Err(other.mismatch(ValueKind::Bytes)),
		}
	}

	/// Borrow a value array payload.
	pub fn as_array(&self) -> Result<&[Value]> {
		match self {
			Self::Array(items) => Ok(items),
			other => Err(other.mismatch(ValueKind::Array)),
		}
	}

	fn mismatch(&self, expected: ValueKind) -> ArchiveError {
		ArchiveError::TypeMismatch { expected, got: self.kind() }
	}
}

/// Native types that map onto exactly one [`ValueKind`].
///
/// Only the closed kind set implements this trait, so constructing a value
/// from any other native type does not compile.
pub trait ArchiveType: Clone + Send + Sync + 'static {
	/// Kind stored for this type.
	const KIND: ValueKind;

	/// Wrap a native value.
	fn into_value(self) -> Value;

	/// Clone the payload out of a value of the same kind.
	fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! archive_type {
	($ty:ty, $variant:ident) => {
		impl ArchiveType for $ty {
			const KIND: ValueKind = ValueKind::$variant;

			fn into_value(self) -> Value {
				Value::$variant(self)
			}

			fn from_value(value: &Value) -> Option<Self> {
				match value {
					Value::$variant(inner) => Some(inner.clone()),
					_ => None,
				}
			}
		}

		impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::$variant(value)
			}
		}
	};
}

archive_type!(bool, Bool);
archive_type!(Vec<u8>, Bytes);
archive_type!(Vec<Value>, Array);
archive_type!(i8, I8);
archive_type!(u8, U8);
archive_type!(i16, I16);
archive_type!(u16, U16);
archive_type!(i32, I32);
archive_type!(u32, U32);
archive_type!(i64, I64);
archive_type!(u64, U64);
archive_type!(String, String);
archive_type!(f32, F32);
archive_type!(f64, F64);

impl ArchiveType for Null {
	const KIND: ValueKind = ValueKind::Null;

	fn into_value(self) -> Value {
		Value::Null
	}

	fn from_value(value: &Value) -> Option<Self> {
		matches!(value, Value::Null).then_some(Null)
	}
}

impl From<Null> for Value {
	fn from(_: Null) -> Self {
		Value::Null
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}
