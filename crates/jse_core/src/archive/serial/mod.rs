//! Type-driven conversion between native values and archive trees.
//!
//! A [`Registry`] maps each static type to one [`TypeSerializer`]. Call
//! sites pass a [`Placement`] describing where the value lives relative to
//! the node being written or read.

mod enumeration;
mod list;
mod option;
mod placement;
mod record;
mod registry;
mod scalar;

pub use enumeration::{ArchiveEnum, EnumSerializer};
pub use list::ListSerializer;
pub use option::OptionSerializer;
pub use placement::{Placement, Slot};
pub use record::{Record, RecordSerializer};
pub use registry::{Registry, Shape, TypeSerializer};
pub use scalar::ScalarSerializer;
