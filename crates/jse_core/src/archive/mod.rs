mod binary;
mod compression;
mod defs;
mod engine;
mod error;
mod file;
mod object;
mod serial;
mod stream;
mod value;

/// Wire codec entry points, header inspection, and decode limits.
pub use binary::{ATTRIBUTE_TAG, ArchiveHeader, DecodeOptions, Decoded, MAGIC, OBJECT_TAG, decode, decode_with_options, encode};
/// Compression detection result.
pub use compression::{Compression, ZSTD_MAGIC};
/// Definition records exchanged with the engine.
pub use defs::{BindingDef, ControlDef, ExceptionInfo, FieldDef, register_definitions};
/// Byte-level engine boundary and the session wrapping it.
pub use engine::{EditorSession, Engine, EngineResult, UI_VIEW};
/// Error and result aliases.
pub use error::{ArchiveError, ErrorKind, Result};
/// Archive file abstraction.
pub use file::ArchiveFile;
/// Archive tree node types.
pub use object::{ArchiveObject, Attribute, TreeStats};
/// Type-driven serialization registry and generic serializers.
pub use serial::{
	ArchiveEnum, EnumSerializer, ListSerializer, OptionSerializer, Placement, Record, RecordSerializer, Registry, ScalarSerializer, Shape,
	Slot, TypeSerializer,
};
/// Bounded big-endian byte cursors.
pub use stream::{ByteReader, ByteWriter, SIZE_MAX_1, SIZE_MAX_2, SIZE_MAX_4};
/// Closed value union.
pub use value::{ArchiveType, Null, Value, ValueKind};
