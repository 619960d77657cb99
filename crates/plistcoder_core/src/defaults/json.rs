use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde_json::{Map, Number, Value as Json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::coder::Value;
use crate::defaults::{KeyValueStore, MemoryStore, StoreError, StoreResult};

const DATE_TAG: &str = "$date";
const DATA_TAG: &str = "$data";
const DICT_TAG: &str = "$dict";

/// Convert a value tree into a JSON document.
///
/// Dates become `{"$date": "<RFC 3339>"}` and data becomes `{"$data": "<hex>"}`. A
/// dictionary whose only key is one of the tags is wrapped as `{"$dict": {...}}` so it
/// reads back as a dictionary. Integer widths collapse to JSON numbers; non-finite floats are rejected.
pub fn value_to_json(value: &Value) -> StoreResult<Json> {
	to_json(value, "")
}

/// Convert a JSON document into a value tree.
///
/// Integers map to `I64` (or `U64` above `i64::MAX`), other numbers to `F64`. JSON
/// `null` is rejected; absent values are stored as the nil sentinel string instead.
pub fn value_from_json(json: &Json) -> StoreResult<Value> {
	from_json(json, "")
}

fn to_json(value: &Value, location: &str) -> StoreResult<Json> {
	Ok(match value {
		Value::Bool(v) => Json::Bool(*v),
		Value::I8(v) => Json::from(*v),
		Value::I16(v) => Json::from(*v),
		Value::I32(v) => Json::from(*v),
		Value::I64(v) => Json::from(*v),
		Value::U8(v) => Json::from(*v),
		Value::U16(v) => Json::from(*v),
		Value::U32(v) => Json::from(*v),
		Value::U64(v) => Json::from(*v),
		Value::F32(v) => float(f64::from(*v), location)?,
		Value::F64(v) => float(*v, location)?,
		Value::String(v) => Json::String(v.clone()),
		Value::Data(v) => tagged(DATA_TAG, hex::encode(v)),
		Value::Date(v) => {
			let text = v
				.format(&Rfc3339)
				.map_err(|err| StoreError::unsupported(location, format!("date cannot be written as RFC 3339: {err}")))?;
			tagged(DATE_TAG, text)
		}
		Value::Array(items) => Json::Array(
			items
				.iter()
				.enumerate()
				.map(|(idx, item)| to_json(item, &format!("{location}/{idx}")))
				.collect::<StoreResult<_>>()?,
		),
		Value::Dictionary(map) => {
			let object = map
				.iter()
				.map(|(key, item)| Ok((key.clone(), to_json(item, &format!("{location}/{key}"))?)))
				.collect::<StoreResult<Map<_, _>>>()?;
			if looks_tagged(map.keys().map(String::as_str)) {
				let mut wrapper = Map::new();
				wrapper.insert(DICT_TAG.to_owned(), Json::Object(object));
				Json::Object(wrapper)
			} else {
				Json::Object(object)
			}
		}
	})
}

fn float(value: f64, location: &str) -> StoreResult<Json> {
	Number::from_f64(value)
		.map(Json::Number)
		.ok_or_else(|| StoreError::unsupported(location, format!("non-finite number {value} has no JSON form")))
}

fn is_tag(key: &str) -> bool {
	matches!(key, DATE_TAG | DATA_TAG | DICT_TAG)
}

fn looks_tagged<'k>(mut keys: impl Iterator<Item = &'k str>) -> bool {
	match (keys.next(), keys.next()) {
		(Some(key), None) => is_tag(key),
		_ => false,
	}
}

fn tagged(tag: &str, text: String) -> Json {
	let mut map = Map::new();
	map.insert(tag.to_owned(), Json::String(text));
	Json::Object(map)
}

fn from_json(json: &Json, location: &str) -> StoreResult<Value> {
	Ok(match json {
		Json::Null => return Err(StoreError::unsupported(location, "null has no value-tree form; store the nil sentinel instead")),
		Json::Bool(v) => Value::Bool(*v),
		Json::Number(n) => number(n, location)?,
		Json::String(v) => Value::String(v.clone()),
		Json::Array(items) => Value::Array(
			items
				.iter()
				.enumerate()
				.map(|(idx, item)| from_json(item, &format!("{location}/{idx}")))
				.collect::<StoreResult<_>>()?,
		),
		Json::Object(map) => {
			if let Some(value) = from_tagged(map, location)? {
				return Ok(value);
			}
			dictionary(map, location)?
		}
	})
}

fn dictionary(map: &Map<String, Json>, location: &str) -> StoreResult<Value> {
	map.iter()
		.map(|(key, item)| Ok((key.clone(), from_json(item, &format!("{location}/{key}"))?)))
		.collect::<StoreResult<BTreeMap<_, _>>>()
		.map(Value::Dictionary)
}

fn number(n: &Number, location: &str) -> StoreResult<Value> {
	if let Some(v) = n.as_i64() {
		return Ok(Value::I64(v));
	}
	if let Some(v) = n.as_u64() {
		return Ok(Value::U64(v));
	}
	n.as_f64()
		.map(Value::F64)
		.ok_or_else(|| StoreError::unsupported(location, format!("number {n} is not representable")))
}

fn from_tagged(map: &Map<String, Json>, location: &str) -> StoreResult<Option<Value>> {
	if map.len() != 1 {
		return Ok(None);
	}
	let Some((tag, payload)) = map.iter().next() else {
		return Ok(None);
	};
	if !is_tag(tag) {
		return Ok(None);
	}

	let location = format!("{location}/{tag}");
	if tag == DICT_TAG {
		let Json::Object(inner) = payload else {
			return Err(StoreError::unsupported(&location, format!("{tag} payload must be an object")));
		};
		return dictionary(inner, &location).map(Some);
	}
	let Json::String(text) = payload else {
		return Err(StoreError::unsupported(&location, format!("{tag} payload must be a string")));
	};

	if tag == DATE_TAG {
		let date = OffsetDateTime::parse(text, &Rfc3339)
			.map_err(|err| StoreError::unsupported(&location, format!("invalid RFC 3339 date {text:?}: {err}")))?;
		return Ok(Some(Value::Date(date)));
	}
	let data = hex::decode(text).map_err(|err| StoreError::unsupported(&location, format!("invalid hex data: {err}")))?;
	Ok(Some(Value::Data(Bytes::from(data))))
}

/// Store persisted as one JSON object on disk.
///
/// Changes stay in memory until [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
	entries: MemoryStore,
}

impl JsonFileStore {
	/// Load the store at `path`. A missing file opens as an empty store.
	pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
		let path = path.into();
		let text = match fs::read_to_string(&path) {
			Ok(text) => text,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "store file missing, starting empty");
				return Ok(Self {
					path,
					entries: MemoryStore::new(),
				});
			}
			Err(source) => return Err(StoreError::Io { path, source }),
		};

		let json: Json = serde_json::from_str(&text).map_err(|source| StoreError::Json { path: path.clone(), source })?;
		let Json::Object(map) = &json else {
			return Err(StoreError::unsupported("", "store root must be a JSON object"));
		};

		let mut entries = MemoryStore::new();
		for (key, item) in map {
			entries.set(key, from_json(item, &format!("/{key}"))?);
		}
		tracing::debug!(path = %path.display(), entries = entries.len(), "store loaded");
		Ok(Self { path, entries })
	}

	/// Backing file location.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// In-memory view of the entries.
	pub fn entries(&self) -> &MemoryStore {
		&self.entries
	}

	/// Write every entry back to disk through a temporary sibling file and a rename.
	pub fn save(&self) -> StoreResult<()> {
		let mut root = Map::new();
		for (key, item) in self.entries.entries() {
			root.insert(key.clone(), to_json(item, &format!("/{key}"))?);
		}
		let mut text = serde_json::to_string_pretty(&Json::Object(root)).map_err(|source| StoreError::Json {
			path: self.path.clone(),
			source,
		})?;
		text.push('\n');

		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(io_error(parent))?;
		}

		let tmp = self.temp_path();
		fs::write(&tmp, text).map_err(io_error(&tmp))?;
		fs::rename(&tmp, &self.path).map_err(io_error(&self.path))?;
		tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "store saved");
		Ok(())
	}

	fn temp_path(&self) -> PathBuf {
		let mut name = self.path.clone().into_os_string();
		name.push(".tmp");
		PathBuf::from(name)
	}
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + use<> {
	let path = path.to_path_buf();
	move |source| StoreError::Io { path, source }
}

impl KeyValueStore for JsonFileStore {
	fn object(&self, key: &str) -> Option<&Value> {
		self.entries.object(key)
	}

	fn set(&mut self, key: &str, value: Value) {
		self.entries.set(key, value);
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.remove(key)
	}

	fn keys(&self) -> Vec<String> {
		self.entries.keys()
	}
}
