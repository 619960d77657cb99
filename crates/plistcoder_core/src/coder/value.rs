use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use time::OffsetDateTime;

use crate::coder::{CodingPath, PathSegment};

/// Untyped node of a parsed property-list document.
///
/// There is no null variant: property lists cannot express null, so a
/// reserved sentinel string stands in for it (see [`crate::coder::DEFAULT_NIL_SYMBOL`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// 8-bit signed integer.
	I8(i8),
	/// 16-bit signed integer.
	I16(i16),
	/// 32-bit signed integer.
	I32(i32),
	/// 64-bit signed integer.
	I64(i64),
	/// 8-bit unsigned integer.
	U8(u8),
	/// 16-bit unsigned integer.
	U16(u16),
	/// 32-bit unsigned integer.
	U32(u32),
	/// 64-bit unsigned integer.
	U64(u64),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// UTF-8 string, including the nil sentinel.
	String(String),
	/// Opaque binary blob.
	Data(Bytes),
	/// Point in time.
	Date(OffsetDateTime),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// String-keyed mapping.
	Dictionary(BTreeMap<String, Value>),
}

/// Shape of a [`Value`] without its payload, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// [`Value::Bool`].
	Bool,
	/// [`Value::I8`].
	I8,
	/// [`Value::I16`].
	I16,
	/// [`Value::I32`].
	I32,
	/// [`Value::I64`].
	I64,
	/// [`Value::U8`].
	U8,
	/// [`Value::U16`].
	U16,
	/// [`Value::U32`].
	U32,
	/// [`Value::U64`].
	U64,
	/// [`Value::F32`].
	F32,
	/// [`Value::F64`].
	F64,
	/// [`Value::String`].
	String,
	/// [`Value::Data`].
	Data,
	/// [`Value::Date`].
	Date,
	/// [`Value::Array`].
	Array,
	/// [`Value::Dictionary`].
	Dictionary,
}

impl ValueKind {
	/// Stable lowercase label.
	pub fn name(self) -> &'static str {
		match self {
			ValueKind::Bool => "bool",
			ValueKind::I8 => "i8",
			ValueKind::I16 => "i16",
			ValueKind::I32 => "i32",
			ValueKind::I64 => "i64",
			ValueKind::U8 => "u8",
			ValueKind::U16 => "u16",
			ValueKind::U32 => "u32",
			ValueKind::U64 => "u64",
			ValueKind::F32 => "f32",
			ValueKind::F64 => "f64",
			ValueKind::String => "string",
			ValueKind::Data => "data",
			ValueKind::Date => "date",
			ValueKind::Array => "array",
			ValueKind::Dictionary => "dictionary",
		}
	}

	/// Whether values of this kind take part in numeric conversion.
	pub fn is_numeric(self) -> bool {
		!matches!(
			self,
			ValueKind::Bool | ValueKind::String | ValueKind::Data | ValueKind::Date | ValueKind::Array | ValueKind::Dictionary
		)
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Value {
	/// Return the payload-free shape of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Bool(_) => ValueKind::Bool,
			Value::I8(_) => ValueKind::I8,
			Value::I16(_) => ValueKind::I16,
			Value::I32(_) => ValueKind::I32,
			Value::I64(_) => ValueKind::I64,
			Value::U8(_) => ValueKind::U8,
			Value::U16(_) => ValueKind::U16,
			Value::U32(_) => ValueKind::U32,
			Value::U64(_) => ValueKind::U64,
			Value::F32(_) => ValueKind::F32,
			Value::F64(_) => ValueKind::F64,
			Value::String(_) => ValueKind::String,
			Value::Data(_) => ValueKind::Data,
			Value::Date(_) => ValueKind::Date,
			Value::Array(_) => ValueKind::Array,
			Value::Dictionary(_) => ValueKind::Dictionary,
		}
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow the array payload.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Value::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow the dictionary payload.
	pub fn as_dictionary(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Value::Dictionary(map) => Some(map),
			_ => None,
		}
	}

	/// True when this value is the string `nil_symbol`.
	pub fn is_nil(&self, nil_symbol: &str) -> bool {
		self.as_str() == Some(nil_symbol)
	}

	/// Look up a direct dictionary child.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_dictionary()?.get(key)
	}

	/// Follow a coding path from this value.
	pub fn get_path(&self, path: &CodingPath) -> Option<&Value> {
		let mut current = self;
		for segment in path.segments() {
			current = match (segment, current) {
				(PathSegment::Key(key), Value::Dictionary(map)) => map.get(key)?,
				(PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}
}

macro_rules! impl_from_scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::$variant(value)
				}
			}
		)*
	};
}

impl_from_scalar! {
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	String => String,
	Bytes => Data,
	OffsetDateTime => Date,
	Vec<Value> => Array,
	BTreeMap<String, Value> => Dictionary,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<isize> for Value {
	fn from(value: isize) -> Self {
		Value::I64(value as i64)
	}
}

impl From<usize> for Value {
	fn from(value: usize) -> Self {
		Value::U64(value as u64)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Value::Dictionary(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
