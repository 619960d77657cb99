use std::collections::BTreeMap;

use crate::coder::Value;

/// String-keyed storage of value trees.
///
/// Stored values are opaque to the store; typed access goes through
/// [`StoreAccessor`](crate::defaults::StoreAccessor).
pub trait KeyValueStore {
	/// Value stored under `key`.
	fn object(&self, key: &str) -> Option<&Value>;

	/// Store `value` under `key`, replacing any previous entry.
	fn set(&mut self, key: &str, value: Value);

	/// Remove and return the entry under `key`.
	fn remove(&mut self, key: &str) -> Option<Value>;

	/// Every stored key, sorted.
	fn keys(&self) -> Vec<String>;
}

/// In-memory store backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
	entries: BTreeMap<String, Value>,
}

impl MemoryStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Borrow the backing map.
	pub fn entries(&self) -> &BTreeMap<String, Value> {
		&self.entries
	}

	/// Consume the store, returning its entries as a dictionary value.
	pub fn into_value(self) -> Value {
		Value::Dictionary(self.entries)
	}
}

impl From<BTreeMap<String, Value>> for MemoryStore {
	fn from(entries: BTreeMap<String, Value>) -> Self {
		Self { entries }
	}
}

impl KeyValueStore for MemoryStore {
	fn object(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	fn set(&mut self, key: &str, value: Value) {
		self.entries.insert(key.to_owned(), value);
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.remove(key)
	}

	fn keys(&self) -> Vec<String> {
		self.entries.keys().cloned().collect()
	}
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &mut K {
	fn object(&self, key: &str) -> Option<&Value> {
		(**self).object(key)
	}

	fn set(&mut self, key: &str, value: Value) {
		(**self).set(key, value);
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		(**self).remove(key)
	}

	fn keys(&self) -> Vec<String> {
		(**self).keys()
	}
}

#[cfg(test)]
mod tests;
