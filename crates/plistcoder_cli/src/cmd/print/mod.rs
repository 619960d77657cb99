use std::fmt::Write as _;

use plistcoder::coder::Value;
use time::format_description::well_known::Rfc3339;

/// Output truncation limits for printed value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single dictionary.
	pub max_entries_per_dictionary: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/dictionaries.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_entries_per_dictionary: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

impl PrintOptions {
	/// Preset for single-entry store output.
	pub fn for_store_entry() -> Self {
		Self {
			max_entries_per_dictionary: 40,
			max_string_len: 160,
			max_array_items: 8,
			max_print_depth: 4,
		}
	}
}

/// Print one value tree.
pub fn print_value(value: &Value, indent: usize, options: PrintOptions) {
	print!("{}", render_value(value, indent, options));
}

/// Render one value tree into indented text.
pub fn render_value(value: &Value, indent: usize, options: PrintOptions) -> String {
	let mut out = String::new();
	write_value(&mut out, value, indent, 0, options);
	out
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}[... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}[");
			for item in items.iter().take(options.max_array_items) {
				write_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items);
			}
			let _ = writeln!(out, "{pad}]");
		}
		Value::Dictionary(map) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{{ ... {} entries }}", map.len());
				return;
			}
			let _ = writeln!(out, "{pad}{{");
			for (key, item) in map.iter().take(options.max_entries_per_dictionary) {
				if matches!(item, Value::Array(_) | Value::Dictionary(_)) {
					let _ = writeln!(out, "{pad}  {key} =");
					write_value(out, item, indent + 4, depth + 1, options);
				} else {
					let _ = writeln!(out, "{pad}  {key} = {}", scalar(item, options));
				}
			}
			if map.len() > options.max_entries_per_dictionary {
				let _ = writeln!(out, "{pad}  ... {} more entries", map.len() - options.max_entries_per_dictionary);
			}
			let _ = writeln!(out, "{pad}}}");
		}
		other => {
			let _ = writeln!(out, "{pad}{}", scalar(other, options));
		}
	}
}

fn scalar(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Bool(v) => v.to_string(),
		Value::I8(v) => format!("{v}_i8"),
		Value::I16(v) => format!("{v}_i16"),
		Value::I32(v) => format!("{v}_i32"),
		Value::I64(v) => v.to_string(),
		Value::U8(v) => format!("{v}_u8"),
		Value::U16(v) => format!("{v}_u16"),
		Value::U32(v) => format!("{v}_u32"),
		Value::U64(v) => format!("{v}_u64"),
		Value::F32(v) => format!("{v}_f32"),
		Value::F64(v) => format!("{v:?}"),
		Value::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		Value::Data(v) => format!("data[{}] {}", v.len(), truncate(&hex::encode(v), options.max_string_len)),
		Value::Date(v) => v.format(&Rfc3339).unwrap_or_else(|_| v.to_string()),
		Value::Array(items) => format!("[... {} items]", items.len()),
		Value::Dictionary(map) => format!("{{ ... {} entries }}", map.len()),
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
