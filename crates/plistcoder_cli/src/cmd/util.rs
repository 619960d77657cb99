use std::path::Path;

use plistcoder::coder::{CodingPath, Value};
use plistcoder::defaults::value_from_json;

use crate::cmd::{CliError, Result};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: cannot render JSON output: {err}"),
	}
}

/// Read a JSON document and map it into a value tree.
pub(crate) fn load_document(path: &Path) -> Result<Value> {
	let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	parse_json_value(&text, &path.display().to_string())
}

/// Parse JSON text from `origin` into a value tree.
pub(crate) fn parse_json_value(text: &str, origin: &str) -> Result<Value> {
	let json: serde_json::Value = serde_json::from_str(text).map_err(|source| CliError::Json {
		origin: origin.to_owned(),
		source,
	})?;
	Ok(value_from_json(&json)?)
}

/// Parse an optional `--path` selection; absent means the root.
pub(crate) fn parse_selection(path_expr: Option<&str>) -> Result<CodingPath> {
	match path_expr {
		Some(expr) => Ok(CodingPath::parse(expr)?),
		None => Ok(CodingPath::root()),
	}
}

/// Resolve `path` inside `root`.
pub(crate) fn select<'a>(root: &'a Value, path: &CodingPath) -> Result<&'a Value> {
	root.get_path(path).ok_or_else(|| CliError::PathNotFound { path: path.to_string() })
}
