use std::path::PathBuf;

use plistcoder::defaults::{JsonFileStore, KeyValueStore, value_to_json};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, parse_json_value};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct GetArgs {
	pub store: PathBuf,
	pub key: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(clap::Args)]
pub struct SetArgs {
	pub store: PathBuf,
	pub key: String,
	/// JSON literal; dates as {"$date": ...}, data as {"$data": ...}.
	pub value: String,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
	pub store: PathBuf,
	pub key: String,
}

#[derive(clap::Args)]
pub struct KeysArgs {
	pub store: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print the entry stored under a key.
pub fn get(args: GetArgs) -> Result<()> {
	let GetArgs { store: path, key, json } = args;
	let store = JsonFileStore::open(&path)?;
	let value = store.object(&key).ok_or_else(|| CliError::KeyNotFound { key: key.clone() })?;

	if json {
		emit_json(&EntryJson {
			store: path.display().to_string(),
			key,
			kind: value.kind().name(),
			value: value_to_json(value)?,
		});
		return Ok(());
	}

	println!("key: {key}");
	println!("kind: {}", value.kind());
	print_value(value, 0, PrintOptions::for_store_entry());
	Ok(())
}

/// Store a JSON literal under a key and save the store.
pub fn set(args: SetArgs) -> Result<()> {
	let SetArgs { store: path, key, value } = args;
	let value = parse_json_value(&value, "value argument")?;
	let mut store = JsonFileStore::open(&path)?;
	let replaced = store.object(&key).is_some();
	store.set(&key, value);
	store.save()?;

	tracing::info!(store = %path.display(), key = %key, replaced, "entry written");
	println!("{} {key}", if replaced { "replaced" } else { "added" });
	Ok(())
}

/// Remove the entry under a key and save the store.
pub fn delete(args: DeleteArgs) -> Result<()> {
	let DeleteArgs { store: path, key } = args;
	let mut store = JsonFileStore::open(&path)?;
	if store.remove(&key).is_none() {
		return Err(CliError::KeyNotFound { key });
	}
	store.save()?;

	tracing::info!(store = %path.display(), key = %key, "entry removed");
	println!("deleted {key}");
	Ok(())
}

/// List every key in the store.
pub fn keys(args: KeysArgs) -> Result<()> {
	let KeysArgs { store: path, json } = args;
	let store = JsonFileStore::open(&path)?;
	let keys = store.keys();

	if json {
		emit_json(&KeysJson {
			store: path.display().to_string(),
			count: keys.len(),
			keys,
		});
		return Ok(());
	}

	for key in keys {
		println!("{key}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct EntryJson {
	store: String,
	key: String,
	kind: &'static str,
	value: serde_json::Value,
}

#[derive(serde::Serialize)]
struct KeysJson {
	store: String,
	count: usize,
	keys: Vec<String>,
}
