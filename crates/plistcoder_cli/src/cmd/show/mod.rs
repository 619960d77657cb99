use std::path::PathBuf;

use plistcoder::defaults::value_to_json;

use crate::cmd::Result;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_document, parse_selection, select};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "path")]
	pub path_expr: Option<String>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "max-string")]
	pub max_string: Option<usize>,
}

/// Print a document, or the subtree selected by `--path`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		path_expr,
		json,
		max_depth,
		max_array,
		max_string,
	} = args;

	let selection = parse_selection(path_expr.as_deref())?;
	let root = load_document(&file)?;
	let value = select(&root, &selection)?;
	tracing::debug!(file = %file.display(), path = %selection, kind = %value.kind(), "selected value");

	if json {
		let payload = ShowJson {
			file: file.display().to_string(),
			path: selection.to_string(),
			kind: value.kind().name(),
			value: value_to_json(value)?,
		};
		emit_json(&payload);
		return Ok(());
	}

	let mut print = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		print.max_print_depth = max_depth;
	}
	if let Some(max_array) = max_array {
		print.max_array_items = max_array;
	}
	if let Some(max_string) = max_string {
		print.max_string_len = max_string;
	}

	println!("path: {}", file.display());
	println!("selection: {selection}");
	println!("kind: {}", value.kind());
	print_value(value, 0, print);
	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	file: String,
	path: String,
	kind: &'static str,
	value: serde_json::Value,
}

#[cfg(test)]
mod tests;
