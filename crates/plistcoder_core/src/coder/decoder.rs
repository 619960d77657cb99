use std::any::type_name;

use crate::coder::{
	CodingPath, DEFAULT_NIL_SYMBOL, DecodeError, KeyedContainer, PathSegment, Primitive, Result, SingleValueContainer, UnkeyedContainer, Value, coerce,
};

/// Types that construct themselves from a decode context.
///
/// Implementations ask the decoder for the container matching their shape and read
/// fields from it; nested fields recurse through the same machinery.
///
/// ```
/// use plistcoder::coder::{Decode, Decoder, Result};
///
/// struct Window {
/// 	title: String,
/// 	width: u32,
/// }
///
/// impl Decode for Window {
/// 	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
/// 		let mut container = decoder.keyed_container()?;
/// 		Ok(Self {
/// 			title: container.decode("title")?,
/// 			width: container.decode("width")?,
/// 		})
/// 	}
/// }
/// ```
pub trait Decode: Sized {
	/// Build `Self` from the value at the decoder's current position.
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self>;

	/// Value to produce when the nil sentinel stands where `Self` was requested.
	///
	/// `None` means the type does not accept null and the decode fails with
	/// [`DecodeError::ValueNotFound`].
	fn from_nil() -> Option<Self> {
		None
	}

	/// Label for this type in error messages.
	///
	/// Defaults to the type name without its module path.
	fn type_label() -> &'static str {
		short_type_name::<Self>()
	}
}

fn short_type_name<T>() -> &'static str {
	let full = type_name::<T>();
	let head = full.split('<').next().unwrap_or(full);
	head.rsplit("::").next().unwrap_or(head)
}

/// Per-call decode context: coding path, storage stack, and nil symbol.
///
/// One context exists per top-level [`ObjectDecoder::decode`] call, plus one per super
/// decoder. Nothing in it outlives the call that created it.
#[derive(Debug)]
pub struct Decoder<'a> {
	path: CodingPath,
	storage: Vec<&'a Value>,
	nil_symbol: &'a str,
}

impl<'a> Decoder<'a> {
	pub(crate) fn new(nil_symbol: &'a str, path: CodingPath, root: &'a Value) -> Self {
		Self {
			path,
			storage: vec![root],
			nil_symbol,
		}
	}

	/// Location currently being decoded.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Sentinel string treated as null.
	pub fn nil_symbol(&self) -> &'a str {
		self.nil_symbol
	}

	/// Value at the top of the storage stack.
	///
	/// # Panics
	///
	/// Panics when the storage stack is empty, which only a broken container
	/// implementation can cause.
	pub fn value(&self) -> &'a Value {
		match self.storage.last() {
			Some(&value) => value,
			None => panic!("empty container stack"),
		}
	}

	/// True when `value` is the nil sentinel.
	pub fn is_nil(&self, value: &Value) -> bool {
		value.is_nil(self.nil_symbol)
	}

	/// Keyed view over the current value, which must be a dictionary.
	pub fn keyed_container(&mut self) -> Result<KeyedContainer<'_, 'a>> {
		let value = self.value();
		if self.is_nil(value) {
			return Err(DecodeError::value_not_found(
				self.path.clone(),
				"dictionary",
				"cannot get keyed decoding container -- found null value instead",
			));
		}
		match value {
			Value::Dictionary(map) => Ok(KeyedContainer::new(self, map, false)),
			other => Err(DecodeError::type_mismatch(self.path.clone(), "dictionary", other.kind())),
		}
	}

	/// Sequential view over the current value, which must be an array.
	pub fn unkeyed_container(&mut self) -> Result<UnkeyedContainer<'_, 'a>> {
		let value = self.value();
		if self.is_nil(value) {
			return Err(DecodeError::value_not_found(
				self.path.clone(),
				"array",
				"cannot get unkeyed decoding container -- found null value instead",
			));
		}
		match value {
			Value::Array(items) => Ok(UnkeyedContainer::new(self, items, false)),
			other => Err(DecodeError::type_mismatch(self.path.clone(), "array", other.kind())),
		}
	}

	/// Scalar view over the current value.
	pub fn single_value_container(&mut self) -> SingleValueContainer<'_, 'a> {
		SingleValueContainer::new(self)
	}

	/// Decode the current value as `T`.
	pub fn decode<T: Decode>(&mut self) -> Result<T> {
		self.single_value_container().decode()
	}

	/// Build a [`DecodeError::DataCorrupted`] at the current location, for validation
	/// failures raised by [`Decode`] implementations.
	pub fn data_corrupted(&self, detail: impl Into<String>) -> DecodeError {
		DecodeError::DataCorrupted {
			path: self.path.clone(),
			detail: detail.into(),
		}
	}

	/// Coerce the current value into a primitive, rejecting the nil sentinel.
	pub(crate) fn decode_primitive<T: Primitive>(&self) -> Result<T> {
		let value = self.value();
		if self.is_nil(value) {
			return Err(DecodeError::null_found(self.path.clone(), T::NAME));
		}
		coerce(value, &self.path)
	}

	/// Decode `value` as `T` with `value` on top of the storage stack.
	///
	/// The nil sentinel resolves through [`Decode::from_nil`] before `T` is asked to
	/// decode. The stack entry is popped on every exit.
	pub(crate) fn unbox<T: Decode>(&mut self, value: &'a Value) -> Result<T> {
		if self.is_nil(value) {
			return T::from_nil().ok_or_else(|| DecodeError::null_found(self.path.clone(), T::type_label()));
		}

		self.storage.push(value);
		let result = T::decode(self);
		self.storage.pop();
		result
	}

	/// Run `f` with `segment` appended to the coding path, popping it afterwards.
	pub(crate) fn with_segment<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
		self.path.push(segment);
		let out = f(self);
		self.path.pop();
		out
	}

	pub(crate) fn push_segment(&mut self, segment: PathSegment) {
		self.path.push(segment);
	}

	pub(crate) fn pop_segment(&mut self) {
		self.path.pop();
	}

	pub(crate) fn storage_depth(&self) -> usize {
		self.storage.len()
	}
}

/// Reusable decoder configuration and top-level entry point.
///
/// Holds no per-call state: every [`decode`](Self::decode) builds a fresh [`Decoder`], so
/// one instance can serve any number of independent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDecoder {
	/// String treated as null.
	pub nil_symbol: String,
}

impl Default for ObjectDecoder {
	fn default() -> Self {
		Self {
			nil_symbol: DEFAULT_NIL_SYMBOL.to_owned(),
		}
	}
}

impl ObjectDecoder {
	/// Decoder using [`DEFAULT_NIL_SYMBOL`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Decoder using a custom nil sentinel.
	pub fn with_nil_symbol(nil_symbol: impl Into<String>) -> Self {
		Self {
			nil_symbol: nil_symbol.into(),
		}
	}

	/// Decode a whole tree into `T`.
	pub fn decode<T: Decode>(&self, value: &Value) -> Result<T> {
		self.decode_rooted(value, CodingPath::root())
	}

	/// Decode the subtree of `root` at `path` into `T`.
	///
	/// Errors report paths from `root`, so they start with `path`.
	pub fn decode_at<T: Decode>(&self, root: &Value, path: &CodingPath) -> Result<T> {
		let Some(value) = root.get_path(path) else {
			return Err(DecodeError::value_not_found(path.clone(), T::type_label(), "no value at path"));
		};
		self.decode_rooted(value, path.clone())
	}

	fn decode_rooted<T: Decode>(&self, value: &Value, path: CodingPath) -> Result<T> {
		let depth = path.len();
		let mut decoder = Decoder::new(&self.nil_symbol, path, value);
		let result = decoder.decode::<T>();
		debug_assert_eq!(decoder.storage_depth(), 1, "storage stack leaked entries");
		debug_assert_eq!(decoder.coding_path().len(), depth, "coding path leaked segments");

		if let Err(err) = &result {
			tracing::debug!(target_type = type_name::<T>(), error = %err, "decode failed");
		}
		result
	}
}

/// Decode `value` into `T` with the default nil sentinel.
pub fn from_value<T: Decode>(value: &Value) -> Result<T> {
	ObjectDecoder::default().decode(value)
}
