use plistcoder_testkit::{fixture_path, scratch_dir};

use crate::coder::{Decode, Decoder, Encode, ObjectEncoder, Result, Value};
use crate::defaults::{Field, JsonFileStore, KeyValueStore, MemoryStore, StoreAccessor};

#[derive(Debug, Clone, PartialEq)]
struct Window {
	width: u32,
	height: u32,
}

impl Decode for Window {
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		let mut container = decoder.keyed_container()?;
		Ok(Self {
			width: container.decode("width")?,
			height: container.decode("height")?,
		})
	}
}

impl Encode for Window {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		encoder.dictionary().insert("width", &self.width).insert("height", &self.height).finish()
	}
}

#[derive(Debug)]
struct Settings {
	volume: u8,
	theme: String,
	nickname: Option<String>,
	recent: Vec<String>,
	window: Window,
}

const VOLUME: Field<Settings, u8> = Field::new("volume", |s| &s.volume);
const THEME: Field<Settings, String> = Field::new("theme", |s| &s.theme);
const NICKNAME: Field<Settings, Option<String>> = Field::new("nickname", |s| &s.nickname);
const RECENT: Field<Settings, Vec<String>> = Field::new("recent", |s| &s.recent);
const WINDOW: Field<Settings, Window> = Field::new("window", |s| &s.window);
const UNMAPPED: Field<Settings, u8> = Field::new("unmapped", |s| &s.volume);

fn defaults() -> Settings {
	Settings {
		volume: 5,
		theme: "light".to_owned(),
		nickname: Some("guest".to_owned()),
		recent: Vec::new(),
		window: Window { width: 800, height: 600 },
	}
}

fn accessor<K: KeyValueStore>(store: K) -> StoreAccessor<Settings, K> {
	StoreAccessor::new(
		store,
		defaults(),
		[
			(VOLUME.id(), "app.volume"),
			(THEME.id(), "app.theme"),
			(NICKNAME.id(), "app.nickname"),
			(RECENT.id(), "app.recent"),
			(WINDOW.id(), "app.window"),
		],
	)
}

#[test]
fn missing_entries_fall_back_to_defaults() {
	let mut settings = accessor(MemoryStore::new());
	assert_eq!(settings.key(&VOLUME), "app.volume");
	assert_eq!(settings.get(&VOLUME), 5);
	assert_eq!(settings.get(&THEME), "light");
	assert_eq!(settings.get(&WINDOW), Window { width: 800, height: 600 });
	assert!(settings.store().is_empty());
}

#[test]
fn set_then_get_round_trips_through_store() {
	let mut settings = accessor(MemoryStore::new());
	settings.set(&VOLUME, &9);
	settings.set(&RECENT, &vec!["a".to_owned(), "b".to_owned()]);
	settings.set(&WINDOW, &Window { width: 1, height: 2 });

	assert_eq!(settings.store().object("app.volume"), Some(&Value::U8(9)));
	assert_eq!(settings.get(&VOLUME), 9);
	assert_eq!(settings.get(&RECENT), vec!["a".to_owned(), "b".to_owned()]);
	assert_eq!(settings.get(&WINDOW), Window { width: 1, height: 2 });
}

#[test]
fn none_is_stored_as_sentinel_and_read_back() {
	let mut settings = accessor(MemoryStore::new());
	settings.set(&NICKNAME, &None);
	assert_eq!(settings.store().object("app.nickname"), Some(&Value::from("$null")));
	assert_eq!(settings.get(&NICKNAME), None);

	let mut custom = accessor(MemoryStore::new()).with_nil_symbol("~");
	custom.set(&NICKNAME, &None);
	assert_eq!(custom.store().object("app.nickname"), Some(&Value::from("~")));
	assert_eq!(custom.get(&NICKNAME), None);
}

#[test]
fn undecodable_entry_is_removed_and_default_returned() {
	let mut store = MemoryStore::new();
	store.set("app.volume", Value::from("loud"));
	store.set("app.window", [("width", Value::I64(-1)), ("height", Value::I64(10))].into_iter().collect());

	let mut settings = accessor(store);
	assert_eq!(settings.get(&VOLUME), 5);
	assert!(settings.store().object("app.volume").is_none());
	assert_eq!(settings.get(&WINDOW), Window { width: 800, height: 600 });
	assert!(settings.store().is_empty());
}

#[test]
fn numeric_entries_convert_exactly() {
	let mut store = MemoryStore::new();
	store.set("app.volume", Value::F64(7.0));
	let mut settings = accessor(store);
	assert_eq!(settings.get(&VOLUME), 7);

	settings.store_mut().set("app.volume", Value::I64(256));
	assert_eq!(settings.get(&VOLUME), 5);
	assert!(settings.store().object("app.volume").is_none());
}

#[test]
fn reset_drops_entry() {
	let mut settings = accessor(MemoryStore::new());
	settings.set(&THEME, &"dark".to_owned());
	assert_eq!(settings.reset(&THEME), Some(Value::from("dark")));
	assert_eq!(settings.reset(&THEME), None);
	assert_eq!(settings.get(&THEME), "light");
}

#[test]
#[should_panic(expected = "no store key registered for field `unmapped`")]
fn unmapped_field_panics() {
	let settings = accessor(MemoryStore::new());
	let _ = settings.key(&UNMAPPED);
}

#[test]
fn file_backed_accessor_persists_and_heals() {
	let dir = scratch_dir("accessor_file_store");
	let path = dir.join("settings.json");
	std::fs::copy(fixture_path("settings_store.json"), &path).expect("copy fixture");

	let store = JsonFileStore::open(&path).expect("fixture store opens");
	let mut settings = StoreAccessor::new(
		store,
		defaults(),
		[
			(VOLUME.id(), "broken_volume"),
			(THEME.id(), "theme"),
			(NICKNAME.id(), "nickname"),
			(RECENT.id(), "recent"),
		],
	);

	assert_eq!(settings.get(&THEME), "dark");
	assert_eq!(settings.get(&NICKNAME), None);
	assert_eq!(settings.get(&RECENT), vec!["a.txt".to_owned(), "b.txt".to_owned()]);
	assert_eq!(settings.get(&VOLUME), 5);

	settings.set(&THEME, &"solarized".to_owned());
	settings.into_store().save().expect("save succeeds");

	let reopened = JsonFileStore::open(&path).expect("reopen");
	assert!(reopened.object("broken_volume").is_none());
	assert_eq!(reopened.object("theme"), Some(&Value::from("solarized")));
	assert_eq!(reopened.object("volume"), Some(&Value::I64(7)));
}
