use crate::coder::Value;
use crate::defaults::{KeyValueStore, MemoryStore};

#[test]
fn memory_store_set_replace_remove() {
	let mut store = MemoryStore::new();
	assert!(store.is_empty());

	store.set("volume", Value::U8(3));
	store.set("theme", Value::from("dark"));
	store.set("volume", Value::U8(7));

	assert_eq!(store.len(), 2);
	assert_eq!(store.object("volume"), Some(&Value::U8(7)));
	assert_eq!(store.keys(), vec!["theme".to_owned(), "volume".to_owned()]);

	assert_eq!(store.remove("theme"), Some(Value::from("dark")));
	assert_eq!(store.remove("theme"), None);
	assert!(store.object("theme").is_none());
}

#[test]
fn mutable_reference_forwards_to_store() {
	fn write_through(mut store: impl KeyValueStore) {
		store.set("k", Value::Bool(true));
	}

	let mut store = MemoryStore::new();
	write_through(&mut store);
	assert_eq!(store.into_value(), [("k", Value::Bool(true))].into_iter().collect::<Value>());
}
