use thiserror::Error;

use crate::archive::ValueKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Coarse classification of [`ArchiveError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A read or seek would leave the buffer.
	StreamBounds,
	/// Declared lengths or tags disagree with the actual structure.
	Framing,
	/// Checksum mismatch, implying corruption or tampering in transit.
	Integrity,
	/// A value was requested as a kind other than its stored kind.
	TypeMismatch,
	/// A kind outside the closed value set was encountered.
	UnsupportedType,
	/// An expected attribute, value, child, or serializer was absent.
	Lookup,
	/// Registry population or a placement configuration is invalid.
	Registration,
	/// Filesystem or compression failure.
	Io,
	/// The external engine reported an error.
	Engine,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::StreamBounds => "stream_bounds",
			Self::Framing => "framing",
			Self::Integrity => "integrity",
			Self::TypeMismatch => "type_mismatch",
			Self::UnsupportedType => "unsupported_type",
			Self::Lookup => "lookup",
			Self::Registration => "registration",
			Self::Io => "io",
			Self::Engine => "engine",
		}
	}
}

/// Errors produced while encoding, decoding, and (de)serializing archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Absolute seek target lies beyond the buffer.
	#[error("seek to {to} out of range (len={len})")]
	SeekOutOfRange {
		/// Requested position.
		to: usize,
		/// Current buffer length.
		len: usize,
	},
	/// Leading bytes are not the `JSE` magic.
	#[error("invalid magic {magic:?} (expected \"JSE\")")]
	InvalidMagic {
		/// First up-to-3 bytes of the buffer.
		magic: [u8; 3],
	},
	/// Stored checksum does not match the payload.
	#[error("crc mismatch: stored=0x{stored:08x}, computed=0x{computed:08x}; data was corrupted or tampered with")]
	CrcMismatch {
		/// Checksum read from the header.
		stored: u32,
		/// Checksum computed over the payload.
		computed: u32,
	},
	/// Size prefix used the reserved `11` width tag.
	#[error("reserved size prefix tag at offset {at}")]
	ReservedSizeTag {
		/// Offset of the prefix byte.
		at: usize,
	},
	/// Length cannot be represented by a size prefix.
	#[error("length {len} exceeds size prefix limit")]
	LengthTooLarge {
		/// Offending length.
		len: usize,
	},
	/// Object body cannot be represented by a 4-byte length.
	#[error("object body of {len} bytes exceeds u32 length field")]
	BodyTooLarge {
		/// Body size in bytes.
		len: usize,
	},
	/// Declared body length runs past its enclosing body or the buffer.
	#[error("body at offset {at} declares {len} bytes but only {rem} remain in the enclosing body")]
	BodyOutOfRange {
		/// Offset where the body starts.
		at: usize,
		/// Declared body length.
		len: usize,
		/// Bytes available in the enclosing body.
		rem: usize,
	},
	/// A read inside a framed body would cross the body's end.
	#[error("read of {need} bytes at offset {at} overruns body ending at {end}")]
	BodyOverrun {
		/// Offset of the attempted read.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Declared end of the enclosing body.
		end: usize,
	},
	/// Bytes remain after the root body.
	#[error("{len} trailing bytes after root body at offset {at}")]
	TrailingBytes {
		/// Offset where the root body ended.
		at: usize,
		/// Unconsumed bytes.
		len: usize,
	},
	/// An object or attribute entry appeared where a value was required.
	#[error("unexpected entry tag 0x{tag:02x} at offset {at}, expected a value")]
	UnexpectedEntry {
		/// Offending tag.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Name or string payload is not valid UTF-8.
	#[error("invalid utf-8 at offset {at}")]
	InvalidUtf8 {
		/// Offset of the payload.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Stored kind differs from the requested kind.
	#[error("type mismatch: stored {got}, requested {expected}")]
	TypeMismatch {
		/// Requested kind.
		expected: ValueKind,
		/// Stored kind.
		got: ValueKind,
	},
	/// Tag byte is outside the closed value set.
	#[error("unsupported value type tag 0x{tag:02x} at offset {at}")]
	UnsupportedType {
		/// Offending tag.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// `expect_attribute` found nothing.
	#[error("no attribute called '{name}' was found")]
	MissingAttribute {
		/// Requested attribute name.
		name: String,
	},
	/// `expect_value` found nothing.
	#[error("no value at index {index}")]
	MissingValue {
		/// Requested positional index.
		index: usize,
	},
	/// `expect_child` found nothing.
	#[error("no child called '{name}' was found")]
	MissingChild {
		/// Requested child name.
		name: String,
	},
	/// No serializer is registered for a type.
	#[error("no serializer registered for {type_name}")]
	SerializerNotFound {
		/// Rust type name.
		type_name: &'static str,
	},
	/// A serializer for the type already exists.
	#[error("a serializer for {type_name} already exists")]
	DuplicateSerializer {
		/// Rust type name.
		type_name: &'static str,
	},
	/// The serializer cannot honour the requested placement.
	#[error("placement not supported for {type_name}: {reason}")]
	UnsupportedPlacement {
		/// Rust type name.
		type_name: &'static str,
		/// Why the placement was refused.
		reason: &'static str,
	},
	/// Enum symbol or raw value has no matching variant.
	#[error("enum {enum_name} has no variant {variant}")]
	UnknownEnumVariant {
		/// Enum type name.
		enum_name: &'static str,
		/// Symbol or rendered raw value.
		variant: String,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Engine call failed with a decoded exception report.
	#[error("{message}\nTrace:\n{stack_trace}")]
	Engine {
		/// Exception message.
		message: String,
		/// Engine-side stack trace.
		stack_trace: String,
	},
}

impl ArchiveError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnexpectedEof { .. } | Self::SeekOutOfRange { .. } => ErrorKind::StreamBounds,
			Self::InvalidMagic { .. }
			| Self::ReservedSizeTag { .. }
			| Self::LengthTooLarge { .. }
			| Self::BodyTooLarge { .. }
			| Self::BodyOutOfRange { .. }
			| Self::BodyOverrun { .. }
			| Self::TrailingBytes { .. }
			| Self::UnexpectedEntry { .. }
			| Self::InvalidUtf8 { .. }
			| Self::DecodeDepthExceeded { .. } => ErrorKind::Framing,
			Self::CrcMismatch { .. } => ErrorKind::Integrity,
			Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
			Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
			Self::MissingAttribute { .. }
			| Self::MissingValue { .. }
			| Self::MissingChild { .. }
			| Self::SerializerNotFound { .. }
			| Self::UnknownEnumVariant { .. } => ErrorKind::Lookup,
			Self::DuplicateSerializer { .. } | Self::UnsupportedPlacement { .. } => ErrorKind::Registration,
			Self::Io(_) | Self::DecompressedTooLarge { .. } => ErrorKind::Io,
			Self::Engine { .. } => ErrorKind::Engine,
		}
	}
}
