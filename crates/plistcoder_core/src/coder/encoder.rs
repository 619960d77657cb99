use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use time::OffsetDateTime;

use crate::coder::{CodingKey, DEFAULT_NIL_SYMBOL, Value};

/// Types that render themselves as a value tree.
///
/// Inverse of [`Decode`](crate::coder::Decode). Encoding cannot fail: every Rust value
/// handled here has a tree representation, and `None` becomes the nil sentinel.
pub trait Encode {
	/// Build the tree for `self`.
	fn encode(&self, encoder: &ObjectEncoder) -> Value;
}

/// Encoder configuration and entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEncoder {
	/// String written in place of `None`.
	pub nil_symbol: String,
}

impl Default for ObjectEncoder {
	fn default() -> Self {
		Self {
			nil_symbol: DEFAULT_NIL_SYMBOL.to_owned(),
		}
	}
}

impl ObjectEncoder {
	/// Encoder using [`DEFAULT_NIL_SYMBOL`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Encoder using a custom nil sentinel.
	pub fn with_nil_symbol(nil_symbol: impl Into<String>) -> Self {
		Self {
			nil_symbol: nil_symbol.into(),
		}
	}

	/// Encode `value` into a tree.
	pub fn encode<T: Encode + ?Sized>(&self, value: &T) -> Value {
		value.encode(self)
	}

	/// The nil sentinel as a tree value.
	pub fn nil(&self) -> Value {
		Value::String(self.nil_symbol.clone())
	}

	/// Start a dictionary.
	pub fn dictionary(&self) -> DictionaryBuilder<'_> {
		DictionaryBuilder {
			encoder: self,
			map: BTreeMap::new(),
		}
	}

	/// Encode every item into an array.
	pub fn array<'i, T: Encode + 'i>(&self, items: impl IntoIterator<Item = &'i T>) -> Value {
		Value::Array(items.into_iter().map(|item| item.encode(self)).collect())
	}
}

/// Incremental dictionary encoder returned by [`ObjectEncoder::dictionary`].
#[derive(Debug)]
pub struct DictionaryBuilder<'e> {
	encoder: &'e ObjectEncoder,
	map: BTreeMap<String, Value>,
}

impl DictionaryBuilder<'_> {
	/// Encode `value` under `key`, replacing any earlier entry.
	pub fn insert<T: Encode + ?Sized>(mut self, key: &(impl CodingKey + ?Sized), value: &T) -> Self {
		self.map.insert(key.string_value().to_owned(), value.encode(self.encoder));
		self
	}

	/// Encode `value` under `key` only when it is `Some`.
	pub fn insert_if_present<T: Encode>(self, key: &(impl CodingKey + ?Sized), value: Option<&T>) -> Self {
		match value {
			Some(value) => self.insert(key, value),
			None => self,
		}
	}

	/// Finish into a dictionary value.
	pub fn finish(self) -> Value {
		Value::Dictionary(self.map)
	}
}

/// Encode `value` with the default nil sentinel.
pub fn to_value<T: Encode + ?Sized>(value: &T) -> Value {
	ObjectEncoder::default().encode(value)
}

macro_rules! impl_encode_scalar {
	($($ty:ty),* $(,)?) => {
		$(
			impl Encode for $ty {
				fn encode(&self, _encoder: &ObjectEncoder) -> Value {
					Value::from(*self)
				}
			}
		)*
	};
}

impl_encode_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, OffsetDateTime);

impl Encode for str {
	fn encode(&self, _encoder: &ObjectEncoder) -> Value {
		Value::from(self)
	}
}

impl Encode for String {
	fn encode(&self, _encoder: &ObjectEncoder) -> Value {
		Value::String(self.clone())
	}
}

impl Encode for Bytes {
	fn encode(&self, _encoder: &ObjectEncoder) -> Value {
		Value::Data(self.clone())
	}
}

impl Encode for Value {
	fn encode(&self, _encoder: &ObjectEncoder) -> Value {
		self.clone()
	}
}

impl<T: Encode + ?Sized> Encode for &T {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		(**self).encode(encoder)
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		(**self).encode(encoder)
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		match self {
			Some(value) => value.encode(encoder),
			None => encoder.nil(),
		}
	}
}

impl<T: Encode> Encode for [T] {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		encoder.array(self)
	}
}

impl<T: Encode> Encode for Vec<T> {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		encoder.array(self)
	}
}

impl<K: CodingKey, T: Encode> Encode for BTreeMap<K, T> {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		self.iter().map(|(key, value)| (key.string_value().to_owned(), value.encode(encoder))).collect()
	}
}

impl<K: CodingKey, T: Encode, S> Encode for HashMap<K, T, S> {
	fn encode(&self, encoder: &ObjectEncoder) -> Value {
		self.iter().map(|(key, value)| (key.string_value().to_owned(), value.encode(encoder))).collect()
	}
}

#[cfg(test)]
mod tests;
