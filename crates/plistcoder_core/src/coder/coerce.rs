use bytes::Bytes;
use time::OffsetDateTime;

use crate::coder::{CodingPath, DecodeError, ExactNumber, Number, Result, Value};

/// String that stands in for null unless a decoder or encoder is configured otherwise.
pub const DEFAULT_NIL_SYMBOL: &str = "$null";

/// Closed set of scalar targets decoded straight from a tree value.
///
/// Implemented for `bool`, `String`, every integer and float width, [`Bytes`] and
/// [`OffsetDateTime`]. Composite targets go through [`Decode`](crate::coder::Decode) instead.
pub trait Primitive: Sized {
	/// Type label used in diagnostics.
	const NAME: &'static str;

	/// Return the payload when `value` already has this type's representation.
	fn identity(value: &Value) -> Option<Self>;

	/// Exact numeric conversion, or `None` when this target is not numeric.
	fn from_number(number: Number) -> Option<Self> {
		let _ = number;
		None
	}

	/// Whether numeric sources are convertible at all.
	fn is_numeric() -> bool {
		false
	}
}

/// Coerce one tree value into a primitive target.
///
/// Direct representation matches win. Numeric sources then go through the exact
/// conversion matrix: an inexact result is [`DecodeError::DataCorrupted`], any other
/// kind of value is [`DecodeError::TypeMismatch`]. The nil sentinel is not special here;
/// callers check it first.
pub fn coerce<T: Primitive>(value: &Value, path: &CodingPath) -> Result<T> {
	if let Some(out) = T::identity(value) {
		return Ok(out);
	}

	let number = match Number::from_value(value) {
		Some(number) if T::is_numeric() => number,
		_ => return Err(DecodeError::type_mismatch(path.clone(), T::NAME, value.kind())),
	};

	T::from_number(number).ok_or_else(|| DecodeError::DataCorrupted {
		path: path.clone(),
		detail: format!("parsed number <{number}> does not fit in {}", T::NAME),
	})
}

macro_rules! impl_numeric_primitive {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl Primitive for $ty {
				const NAME: &'static str = <$ty as ExactNumber>::NAME;

				fn identity(value: &Value) -> Option<Self> {
					match value {
						Value::$variant(v) => Some(*v),
						_ => None,
					}
				}

				fn from_number(number: Number) -> Option<Self> {
					<$ty>::exact_from(number)
				}

				fn is_numeric() -> bool {
					true
				}
			}
		)*
	};
}

impl_numeric_primitive! {
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
}

macro_rules! impl_platform_primitive {
	($($ty:ty),* $(,)?) => {
		$(
			impl Primitive for $ty {
				const NAME: &'static str = <$ty as ExactNumber>::NAME;

				fn identity(_value: &Value) -> Option<Self> {
					None
				}

				fn from_number(number: Number) -> Option<Self> {
					<$ty>::exact_from(number)
				}

				fn is_numeric() -> bool {
					true
				}
			}
		)*
	};
}

impl_platform_primitive!(isize, usize);

impl Primitive for bool {
	const NAME: &'static str = "bool";

	fn identity(value: &Value) -> Option<Self> {
		match value {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}
}

impl Primitive for String {
	const NAME: &'static str = "string";

	fn identity(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_owned)
	}
}

impl Primitive for Bytes {
	const NAME: &'static str = "data";

	fn identity(value: &Value) -> Option<Self> {
		match value {
			Value::Data(bytes) => Some(bytes.clone()),
			_ => None,
		}
	}
}

impl Primitive for OffsetDateTime {
	const NAME: &'static str = "date";

	fn identity(value: &Value) -> Option<Self> {
		match value {
			Value::Date(date) => Some(*date),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests;
