//! Public library API for the JSE binary archive format.

/// Archive tree model, binary codec, serialization registry, and engine boundary.
pub mod archive;
