use std::collections::HashMap;
use std::fmt;

use crate::coder::{Decode, Encode, ObjectDecoder, ObjectEncoder, Value};
use crate::defaults::KeyValueStore;

/// Typed handle for one field of a settings subject `S`.
///
/// `id` names the field in the accessor's key table; `project` reads the field's
/// default out of the subject.
///
/// ```
/// use plistcoder::defaults::Field;
///
/// struct Settings {
/// 	volume: u8,
/// }
///
/// const VOLUME: Field<Settings, u8> = Field::new("volume", |s| &s.volume);
/// assert_eq!(VOLUME.id(), "volume");
/// ```
pub struct Field<S, T> {
	id: &'static str,
	project: fn(&S) -> &T,
}

impl<S, T> Field<S, T> {
	/// Field descriptor from an id and a projection.
	pub const fn new(id: &'static str, project: fn(&S) -> &T) -> Self {
		Self { id, project }
	}

	/// Identifier used in the key table.
	pub fn id(&self) -> &'static str {
		self.id
	}

	/// Borrow this field from `subject`.
	pub fn project<'s>(&self, subject: &'s S) -> &'s T {
		(self.project)(subject)
	}
}

impl<S, T> Clone for Field<S, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<S, T> Copy for Field<S, T> {}

impl<S, T> fmt::Debug for Field<S, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field").field("id", &self.id).finish_non_exhaustive()
	}
}

/// Typed, default-backed view over a [`KeyValueStore`].
///
/// Reads fall back to the matching field of the default subject when the store has no
/// entry. An entry that no longer decodes as the field's type is dropped from the store
/// and the default is returned.
#[derive(Debug)]
pub struct StoreAccessor<S, K> {
	store: K,
	defaults: S,
	keys: HashMap<&'static str, String>,
	decoder: ObjectDecoder,
	encoder: ObjectEncoder,
}

impl<S, K: KeyValueStore> StoreAccessor<S, K> {
	/// Accessor over `store` with `defaults` and a `field id -> store key` table.
	pub fn new<I, Key>(store: K, defaults: S, keys: I) -> Self
	where
		I: IntoIterator<Item = (&'static str, Key)>,
		Key: Into<String>,
	{
		Self {
			store,
			defaults,
			keys: keys.into_iter().map(|(id, key)| (id, key.into())).collect(),
			decoder: ObjectDecoder::default(),
			encoder: ObjectEncoder::default(),
		}
	}

	/// Use `nil_symbol` for both reads and writes.
	pub fn with_nil_symbol(mut self, nil_symbol: impl Into<String>) -> Self {
		let nil_symbol = nil_symbol.into();
		self.decoder = ObjectDecoder::with_nil_symbol(nil_symbol.clone());
		self.encoder = ObjectEncoder::with_nil_symbol(nil_symbol);
		self
	}

	/// Store key mapped to `field`.
	///
	/// # Panics
	///
	/// Panics when `field` has no entry in the key table.
	pub fn key<T>(&self, field: &Field<S, T>) -> &str {
		match self.keys.get(field.id) {
			Some(key) => key.as_str(),
			None => panic!("no store key registered for field `{}`", field.id),
		}
	}

	/// Current value of `field`: the stored entry when it decodes, else the default.
	pub fn get<T: Decode + Clone>(&mut self, field: &Field<S, T>) -> T {
		let key = self.key(field).to_owned();
		let decoded = self.store.object(&key).map(|value| self.decoder.decode::<T>(value));

		match decoded {
			None => field.project(&self.defaults).clone(),
			Some(Ok(value)) => value,
			Some(Err(err)) => {
				tracing::warn!(field = field.id, key = %key, error = %err, "stored value does not decode; removing entry");
				self.store.remove(&key);
				field.project(&self.defaults).clone()
			}
		}
	}

	/// Encode `value` and store it under `field`'s key.
	pub fn set<T: Encode>(&mut self, field: &Field<S, T>, value: &T) {
		let key = self.key(field).to_owned();
		let encoded = self.encoder.encode(value);
		self.store.set(&key, encoded);
	}

	/// Drop the stored entry for `field`, returning it.
	pub fn reset<T>(&mut self, field: &Field<S, T>) -> Option<Value> {
		let key = self.key(field).to_owned();
		self.store.remove(&key)
	}

	/// Default subject.
	pub fn defaults(&self) -> &S {
		&self.defaults
	}

	/// Borrow the underlying store.
	pub fn store(&self) -> &K {
		&self.store
	}

	/// Mutably borrow the underlying store.
	pub fn store_mut(&mut self) -> &mut K {
		&mut self.store
	}

	/// Consume the accessor, returning the store.
	pub fn into_store(self) -> K {
		self.store
	}
}

#[cfg(test)]
mod tests;
