use std::collections::BTreeMap;

use crate::coder::{CodingKey, CodingPath, Decode, DecodeError, Decoder, PathSegment, Result, SUPER_KEY, Value};

/// Map-like view over a dictionary value.
///
/// A nested keyed container keeps its own key on the decoder's coding path until it is
/// dropped.
#[derive(Debug)]
pub struct KeyedContainer<'d, 'a> {
	decoder: &'d mut Decoder<'a>,
	map: &'a BTreeMap<String, Value>,
	nested: bool,
}

impl<'d, 'a> KeyedContainer<'d, 'a> {
	pub(crate) fn new(decoder: &'d mut Decoder<'a>, map: &'a BTreeMap<String, Value>, nested: bool) -> Self {
		Self { decoder, map, nested }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		self.decoder.coding_path()
	}

	/// Number of entries in the backing dictionary.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// True for an empty dictionary.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// Dictionary keys in sorted order.
	pub fn keys(&self) -> Vec<&'a str> {
		self.map.keys().map(String::as_str).collect()
	}

	/// Every present key convertible into `K`.
	pub fn all_keys<K: CodingKey>(&self) -> Vec<K> {
		self.map.keys().filter_map(|key| K::from_string_value(key)).collect()
	}

	/// Pure membership test.
	pub fn contains(&self, key: &(impl CodingKey + ?Sized)) -> bool {
		self.map.contains_key(key.string_value())
	}

	/// True when the value under `key` is the nil sentinel.
	pub fn decode_nil(&self, key: &(impl CodingKey + ?Sized)) -> Result<bool> {
		let value = self.value_for(key.string_value())?;
		Ok(self.decoder.is_nil(value))
	}

	/// Decode the value under `key` as `T`.
	pub fn decode<T: Decode>(&mut self, key: &(impl CodingKey + ?Sized)) -> Result<T> {
		let key = key.string_value();
		let value = self.value_for(key)?;
		self.decoder.with_segment(PathSegment::Key(key.to_owned()), |decoder| decoder.unbox(value))
	}

	/// Decode the value under `key`, yielding `None` when absent or null.
	pub fn decode_if_present<T: Decode>(&mut self, key: &(impl CodingKey + ?Sized)) -> Result<Option<T>> {
		let key = key.string_value();
		match self.map.get(key) {
			None => Ok(None),
			Some(value) if self.decoder.is_nil(value) => Ok(None),
			Some(value) => self
				.decoder
				.with_segment(PathSegment::Key(key.to_owned()), |decoder| decoder.unbox(value))
				.map(Some),
		}
	}

	/// Keyed container over the dictionary stored under `key`.
	pub fn nested_keyed_container(&mut self, key: &(impl CodingKey + ?Sized)) -> Result<KeyedContainer<'_, 'a>> {
		let key = key.string_value();
		let value = self.nested_value(key, "dictionary", "nested keyed container")?;
		match value {
			Value::Dictionary(map) => {
				self.decoder.push_segment(PathSegment::Key(key.to_owned()));
				Ok(KeyedContainer::new(self.decoder, map, true))
			}
			other => Err(DecodeError::type_mismatch(self.coding_path().joined(key), "dictionary", other.kind())),
		}
	}

	/// Unkeyed container over the array stored under `key`.
	pub fn nested_unkeyed_container(&mut self, key: &(impl CodingKey + ?Sized)) -> Result<UnkeyedContainer<'_, 'a>> {
		let key = key.string_value();
		let value = self.nested_value(key, "array", "nested unkeyed container")?;
		match value {
			Value::Array(items) => {
				self.decoder.push_segment(PathSegment::Key(key.to_owned()));
				Ok(UnkeyedContainer::new(self.decoder, items, true))
			}
			other => Err(DecodeError::type_mismatch(self.coding_path().joined(key), "array", other.kind())),
		}
	}

	/// Independent decoder rooted at the value under [`SUPER_KEY`].
	pub fn super_decoder(&self) -> Result<Decoder<'a>> {
		self.super_decoder_for(SUPER_KEY)
	}

	/// Independent decoder rooted at the value under `key`.
	///
	/// The new decoder starts from a copy of this container's coding path plus `key` and
	/// shares no other state with it.
	pub fn super_decoder_for(&self, key: &(impl CodingKey + ?Sized)) -> Result<Decoder<'a>> {
		let key = key.string_value();
		let path = self.coding_path().joined(key);
		let Some(value) = self.map.get(key) else {
			return Err(DecodeError::value_not_found(
				path,
				"decoder",
				format!("cannot get super decoder -- no value found for key \"{key}\""),
			));
		};
		Ok(Decoder::new(self.decoder.nil_symbol(), path, value))
	}

	fn value_for(&self, key: &str) -> Result<&'a Value> {
		self.map.get(key).ok_or_else(|| DecodeError::key_not_found(self.coding_path(), key))
	}

	fn nested_value(&self, key: &str, expected: &'static str, what: &str) -> Result<&'a Value> {
		let Some(value) = self.map.get(key) else {
			return Err(DecodeError::value_not_found(
				self.coding_path().joined(key),
				expected,
				format!("cannot get {what} -- no value found for key \"{key}\""),
			));
		};
		if self.decoder.is_nil(value) {
			return Err(DecodeError::null_found(self.coding_path().joined(key), expected));
		}
		Ok(value)
	}
}

impl Drop for KeyedContainer<'_, '_> {
	fn drop(&mut self) {
		if self.nested {
			self.decoder.pop_segment();
		}
	}
}

/// Sequence view over an array value with a forward-only cursor.
///
/// The cursor advances only after a successful read.
#[derive(Debug)]
pub struct UnkeyedContainer<'d, 'a> {
	decoder: &'d mut Decoder<'a>,
	items: &'a [Value],
	current: usize,
	nested: bool,
}

impl<'d, 'a> UnkeyedContainer<'d, 'a> {
	pub(crate) fn new(decoder: &'d mut Decoder<'a>, items: &'a [Value], nested: bool) -> Self {
		Self {
			decoder,
			items,
			current: 0,
			nested,
		}
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		self.decoder.coding_path()
	}

	/// Total number of elements.
	pub fn count(&self) -> usize {
		self.items.len()
	}

	/// True once every element has been consumed.
	pub fn is_at_end(&self) -> bool {
		self.current >= self.items.len()
	}

	/// Index of the next element to read.
	pub fn current_index(&self) -> usize {
		self.current
	}

	/// Consume the next element when it is the nil sentinel.
	///
	/// Returns `false` and leaves the cursor in place for any other value.
	pub fn decode_nil(&mut self) -> Result<bool> {
		let value = self.next_value("value", "unkeyed container is at end")?;
		if self.decoder.is_nil(value) {
			self.current += 1;
			return Ok(true);
		}
		Ok(false)
	}

	/// Decode the next element as `T`.
	pub fn decode<T: Decode>(&mut self) -> Result<T> {
		let value = self.next_value(T::type_label(), "unkeyed container is at end")?;
		let out = self
			.decoder
			.with_segment(PathSegment::Index(self.current), |decoder| decoder.unbox(value))?;
		self.current += 1;
		Ok(out)
	}

	/// Decode the next element, yielding `None` (and advancing) when it is null.
	///
	/// At the end of the container this fails with [`DecodeError::ValueNotFound`] rather
	/// than yielding `None`.
	pub fn decode_if_present<T: Decode>(&mut self) -> Result<Option<T>> {
		if self.decode_nil()? {
			return Ok(None);
		}
		self.decode().map(Some)
	}

	/// Keyed container over the next element, which must be a dictionary.
	pub fn nested_keyed_container(&mut self) -> Result<KeyedContainer<'_, 'a>> {
		let value = self.next_nested("dictionary", "cannot get nested keyed container -- unkeyed container is at end")?;
		match value {
			Value::Dictionary(map) => {
				self.decoder.push_segment(PathSegment::Index(self.current));
				self.current += 1;
				Ok(KeyedContainer::new(self.decoder, map, true))
			}
			other => Err(DecodeError::type_mismatch(self.element_path(), "dictionary", other.kind())),
		}
	}

	/// Unkeyed container over the next element, which must be an array.
	pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'_, 'a>> {
		let value = self.next_nested("array", "cannot get nested unkeyed container -- unkeyed container is at end")?;
		match value {
			Value::Array(items) => {
				self.decoder.push_segment(PathSegment::Index(self.current));
				self.current += 1;
				Ok(UnkeyedContainer::new(self.decoder, items, true))
			}
			other => Err(DecodeError::type_mismatch(self.element_path(), "array", other.kind())),
		}
	}

	/// Independent decoder rooted at the next element.
	pub fn super_decoder(&mut self) -> Result<Decoder<'a>> {
		let value = self.next_value("decoder", "cannot get super decoder -- unkeyed container is at end")?;
		let path = self.element_path();
		self.current += 1;
		Ok(Decoder::new(self.decoder.nil_symbol(), path, value))
	}

	fn element_path(&self) -> CodingPath {
		self.coding_path().joined(self.current)
	}

	fn next_value(&self, expected: &'static str, detail: &str) -> Result<&'a Value> {
		self.items
			.get(self.current)
			.ok_or_else(|| DecodeError::value_not_found(self.element_path(), expected, detail))
	}

	fn next_nested(&self, expected: &'static str, detail: &str) -> Result<&'a Value> {
		let value = self.next_value(expected, detail)?;
		if self.decoder.is_nil(value) {
			return Err(DecodeError::null_found(self.element_path(), expected));
		}
		Ok(value)
	}
}

impl Drop for UnkeyedContainer<'_, '_> {
	fn drop(&mut self) {
		if self.nested {
			self.decoder.pop_segment();
		}
	}
}

/// Scalar view over the decoder's current value.
#[derive(Debug)]
pub struct SingleValueContainer<'d, 'a> {
	decoder: &'d mut Decoder<'a>,
}

impl<'d, 'a> SingleValueContainer<'d, 'a> {
	pub(crate) fn new(decoder: &'d mut Decoder<'a>) -> Self {
		Self { decoder }
	}

	/// Location of the current value.
	pub fn coding_path(&self) -> &CodingPath {
		self.decoder.coding_path()
	}

	/// True when the current value is the nil sentinel.
	pub fn decode_nil(&self) -> bool {
		self.decoder.is_nil(self.decoder.value())
	}

	/// Decode the current value as `T`.
	pub fn decode<T: Decode>(self) -> Result<T> {
		if self.decode_nil() {
			return T::from_nil().ok_or_else(|| DecodeError::null_found(self.decoder.coding_path().clone(), T::type_label()));
		}
		T::decode(self.decoder)
	}
}
