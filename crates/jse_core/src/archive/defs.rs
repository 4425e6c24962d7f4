//! Schema records exchanged with the engine.
//!
//! Every field is a named child node; lists are flattened into their owner
//! so elements sit directly beside the scalar fields.

use crate::archive::{ArchiveObject, Placement, Record, Registry, Result};

/// One bindable field of a control binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDef {
	/// Field name.
	pub name: String,
	/// Type accepted from the editor.
	pub input_type: String,
	/// Element or detail type accepted from the editor.
	pub input_subtype: String,
	/// Fixed element count of the input, 0 when dynamic.
	pub input_static_length: u32,
	/// Type stored on the target.
	pub output_type: String,
	/// Element or detail type stored on the target.
	pub output_subtype: String,
	/// Fixed element count of the output, 0 when dynamic.
	pub output_static_length: u32,
}

/// Binding from a control to a target type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingDef {
	/// Binding name.
	pub name: String,
	/// Bound target type name.
	pub target_name: String,
	/// Bound fields.
	pub fields: Vec<FieldDef>,
}

/// Definition of an editor control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlDef {
	/// Control name.
	pub name: String,
	/// Bindings the control supports.
	pub bindings: Vec<BindingDef>,
}

/// Error report produced by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionInfo {
	/// Human-readable message.
	pub message: String,
	/// Engine-side stack trace.
	pub stack_trace: String,
}

fn field(name: &'static str) -> Placement {
	Placement::named(name)
}

fn flattened(name: &'static str) -> Placement {
	Placement::named(name).flattened()
}

impl Record for FieldDef {
	const NAME: &'static str = "FieldDef";

	fn write_fields(&self, registry: &Registry, node: &mut ArchiveObject) -> Result<()> {
		registry.serialize(node, &self.output_subtype, &field("outputSubtype"))?;
		registry.serialize(node, &self.input_static_length, &field("inputStaticLength"))?;
		registry.serialize(node, &self.output_type, &field("outputType"))?;
		registry.serialize(node, &self.name, &field("name"))?;
		registry.serialize(node, &self.input_type, &field("inputType"))?;
		registry.serialize(node, &self.output_static_length, &field("outputStaticLength"))?;
		registry.serialize(node, &self.input_subtype, &field("inputSubtype"))
	}

	fn read_fields(registry: &Registry, node: &ArchiveObject) -> Result<Self> {
		Ok(Self {
			name: registry.deserialize(node, &field("name"))?,
			input_type: registry.deserialize(node, &field("inputType"))?,
			input_subtype: registry.deserialize(node, &field("inputSubtype"))?,
			input_static_length: registry.deserialize(node, &field("inputStaticLength"))?,
			output_type: registry.deserialize(node, &field("outputType"))?,
			output_subtype: registry.deserialize(node, &field("outputSubtype"))?,
			output_static_length: registry.deserialize(node, &field("outputStaticLength"))?,
		})
	}
}

impl Record for BindingDef {
	const NAME: &'static str = "BindingDef";

	fn write_fields(&self, registry: &Registry, node: &mut ArchiveObject) -> Result<()> {
		registry.serialize(node, &self.target_name, &field("targetName"))?;
		registry.serialize(node, &self.fields, &flattened("fields"))?;
		registry.serialize(node, &self.name, &field("name"))
	}

	fn read_fields(registry: &Registry, node: &ArchiveObject) -> Result<Self> {
		Ok(Self {
			name: registry.deserialize(node, &field("name"))?,
			target_name: registry.deserialize(node, &field("targetName"))?,
			fields: registry.deserialize(node, &flattened("fields"))?,
		})
	}
}

impl Record for ControlDef {
	const NAME: &'static str = "ControlDef";

	fn write_fields(&self, registry: &Registry, node: &mut ArchiveObject) -> Result<()> {
		registry.serialize(node, &self.bindings, &flattened("bindings"))?;
		registry.serialize(node, &self.name, &field("name"))
	}

	fn read_fields(registry: &Registry, node: &ArchiveObject) -> Result<Self> {
		Ok(Self {
			name: registry.deserialize(node, &field("name"))?,
			bindings: registry.deserialize(node, &flattened("bindings"))?,
		})
	}
}

impl Record for ExceptionInfo {
	const NAME: &'static str = "ExceptionInfo";

	fn write_fields(&self, registry: &Registry, node: &mut ArchiveObject) -> Result<()> {
		registry.serialize(node, &self.stack_trace, &field("stackTrace"))?;
		registry.serialize(node, &self.message, &field("message"))
	}

	fn read_fields(registry: &Registry, node: &ArchiveObject) -> Result<Self> {
		Ok(Self {
			message: registry.deserialize(node, &field("message"))?,
			stack_trace: registry.deserialize(node, &field("stackTrace"))?,
		})
	}
}

/// Register the definition records and their lists.
///
/// Field serializers for `String` and `u32` must already be registered.
pub fn register_definitions(registry: &mut Registry) -> Result<()> {
	registry.register_record::<ExceptionInfo>()?;
	registry.register_record::<ControlDef>()?;
	registry.register_list::<BindingDef>()?;
	registry.register_record::<BindingDef>()?;
	registry.register_list::<FieldDef>()?;
	registry.register_record::<FieldDef>()
}
