use std::path::PathBuf;

use bytes::Bytes;
use plistcoder::coder::{CodingPath, Decode, DecodeError, Encode, ObjectDecoder, ObjectEncoder, Value};
use plistcoder::defaults::value_to_json;
use time::OffsetDateTime;

use crate::cmd::Result;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_document, parse_selection};

/// Target type for `decode --as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
	Bool,
	String,
	I8,
	I16,
	I32,
	I64,
	U8,
	U16,
	U32,
	U64,
	F32,
	F64,
	Date,
	Data,
	/// Array of optional strings.
	Strings,
	/// Array of `f64`.
	Numbers,
}

impl Kind {
	fn name(self) -> &'static str {
		match self {
			Kind::Bool => "bool",
			Kind::String => "string",
			Kind::I8 => "i8",
			Kind::I16 => "i16",
			Kind::I32 => "i32",
			Kind::I64 => "i64",
			Kind::U8 => "u8",
			Kind::U16 => "u16",
			Kind::U32 => "u32",
			Kind::U64 => "u64",
			Kind::F32 => "f32",
			Kind::F64 => "f64",
			Kind::Date => "date",
			Kind::Data => "data",
			Kind::Strings => "strings",
			Kind::Numbers => "numbers",
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "as", value_enum)]
	pub kind: Kind,
	#[arg(long = "path")]
	pub path_expr: Option<String>,
	#[arg(long = "nil-symbol")]
	pub nil_symbol: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Decode the selected value as a typed primitive and print the result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		kind,
		path_expr,
		nil_symbol,
		json,
	} = args;

	let selection = parse_selection(path_expr.as_deref())?;
	let root = load_document(&file)?;
	let decoder = nil_symbol.map(ObjectDecoder::with_nil_symbol).unwrap_or_default();

	let result = decode_as(&decoder, &root, &selection, kind);
	if json {
		emit_json(&DecodeJson::new(&file, &selection, kind, &result)?);
	}

	let value = result?;
	if !json {
		println!("path: {}", file.display());
		println!("selection: {selection}");
		println!("as: {}", kind.name());
		print_value(&value, 0, PrintOptions::default());
	}
	Ok(())
}

/// Decode `path` inside `root` as `kind`, re-encoded as a tree for display.
pub(crate) fn decode_as(decoder: &ObjectDecoder, root: &Value, path: &CodingPath, kind: Kind) -> std::result::Result<Value, DecodeError> {
	match kind {
		Kind::Bool => typed::<bool>(decoder, root, path),
		Kind::String => typed::<String>(decoder, root, path),
		Kind::I8 => typed::<i8>(decoder, root, path),
		Kind::I16 => typed::<i16>(decoder, root, path),
		Kind::I32 => typed::<i32>(decoder, root, path),
		Kind::I64 => typed::<i64>(decoder, root, path),
		Kind::U8 => typed::<u8>(decoder, root, path),
		Kind::U16 => typed::<u16>(decoder, root, path),
		Kind::U32 => typed::<u32>(decoder, root, path),
		Kind::U64 => typed::<u64>(decoder, root, path),
		Kind::F32 => typed::<f32>(decoder, root, path),
		Kind::F64 => typed::<f64>(decoder, root, path),
		Kind::Date => typed::<OffsetDateTime>(decoder, root, path),
		Kind::Data => typed::<Bytes>(decoder, root, path),
		Kind::Strings => typed::<Vec<Option<String>>>(decoder, root, path),
		Kind::Numbers => typed::<Vec<f64>>(decoder, root, path),
	}
}

fn typed<T: Decode + Encode>(decoder: &ObjectDecoder, root: &Value, path: &CodingPath) -> std::result::Result<Value, DecodeError> {
	let encoder = ObjectEncoder::with_nil_symbol(decoder.nil_symbol.clone());
	decoder.decode_at::<T>(root, path).map(|value| encoder.encode(&value))
}

#[derive(serde::Serialize)]
struct DecodeJson {
	file: String,
	path: String,
	#[serde(rename = "as")]
	kind: &'static str,
	ok: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	value: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<ErrorJson>,
}

#[derive(serde::Serialize)]
struct ErrorJson {
	kind: String,
	path: String,
	message: String,
}

impl DecodeJson {
	fn new(file: &std::path::Path, selection: &CodingPath, kind: Kind, result: &std::result::Result<Value, DecodeError>) -> Result<Self> {
		let (value, error) = match result {
			Ok(value) => (Some(value_to_json(value)?), None),
			Err(err) => (
				None,
				Some(ErrorJson {
					kind: err.kind().to_string(),
					path: err.path().to_string(),
					message: err.to_string(),
				}),
			),
		};
		Ok(Self {
			file: file.display().to_string(),
			path: selection.to_string(),
			kind: kind.name(),
			ok: result.is_ok(),
			value,
			error,
		})
	}
}
