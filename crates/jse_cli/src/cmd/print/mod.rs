use std::fmt::Write;

use jse::archive::{ArchiveObject, Value};

/// Output truncation limits for printed trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Deepest node level printed in full; the root is level 1.
	pub max_depth: u32,
	/// Maximum attributes, values, children, or array elements printed per node.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of bytes shown for byte payloads.
	pub max_bytes: usize,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			max_items: 64,
			max_string_len: 200,
			max_bytes: 16,
		}
	}
}

impl PrintOptions {
	/// Preset for a quick overview of large archives.
	pub fn for_overview() -> Self {
		Self {
			max_depth: 3,
			max_items: 8,
			max_string_len: 60,
			max_bytes: 8,
		}
	}
}

/// Render a node and its subtree as indented text.
pub fn render_tree(node: &ArchiveObject, options: PrintOptions) -> String {
	let mut out = String::new();
	render_node(&mut out, node, 0, 1, options);
	out
}

fn render_node(out: &mut String, node: &ArchiveObject, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let label = if node.name().is_empty() { "<root>" } else { node.name() };

	if depth > options.max_depth {
		let stats = node.stats();
		let _ = writeln!(out, "{pad}{label} {{ ... {} nodes }}", stats.nodes);
		return;
	}
	let _ = writeln!(out, "{pad}{label}");

	let inner = " ".repeat(indent + 2);
	for attr in node.attributes().iter().take(options.max_items) {
		let _ = writeln!(out, "{inner}@{} = {}", attr.name, format_value(&attr.value, options));
	}
	more(out, &inner, node.attributes().len(), options.max_items, "attributes");

	for (idx, value) in node.values().iter().enumerate().take(options.max_items) {
		let _ = writeln!(out, "{inner}[{idx}] {}", format_value(value, options));
	}
	more(out, &inner, node.values().len(), options.max_items, "values");

	for child in node.children().iter().take(options.max_items) {
		render_node(out, child, indent + 2, depth + 1, options);
	}
	more(out, &inner, node.children().len(), options.max_items, "children");
}

fn more(out: &mut String, pad: &str, total: usize, shown: usize, what: &str) {
	if total > shown {
		let _ = writeln!(out, "{pad}... {} more {what}", total - shown);
	}
}

/// Render one value on a single line as `kind value`.
pub fn format_value(value: &Value, options: PrintOptions) -> String {
	let kind = value.kind();
	match value {
		Value::Null => kind.to_string(),
		Value::Bool(v) => format!("{kind} {v}"),
		Value::I8(v) => format!("{kind} {v}"),
		Value::U8(v) => format!("{kind} {v}"),
		Value::I16(v) => format!("{kind} {v}"),
		Value::U16(v) => format!("{kind} {v}"),
		Value::I32(v) => format!("{kind} {v}"),
		Value::U32(v) => format!("{kind} {v}"),
		Value::I64(v) => format!("{kind} {v}"),
		Value::U64(v) => format!("{kind} {v}"),
		Value::F32(v) => format!("{kind} {v}"),
		Value::F64(v) => format!("{kind} {v}"),
		Value::String(v) => format!("{kind} \"{}\"", truncate(v, options.max_string_len)),
		Value::Bytes(v) => {
			let hex: Vec<String> = v.iter().take(options.max_bytes).map(|byte| format!("{byte:02x}")).collect();
			let tail = if v.len() > options.max_bytes { " .." } else { "" };
			format!("{kind}[{}] {}{tail}", v.len(), hex.join(" "))
		}
		Value::Array(items) => {
			let shown: Vec<String> = items.iter().take(options.max_items).map(|item| format_value(item, options)).collect();
			let tail = if items.len() > options.max_items {
				format!(", ... {} more", items.len() - options.max_items)
			} else {
				String::new()
			};
			format!("{kind}[{}] [{}{tail}]", items.len(), shown.join(", "))
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
