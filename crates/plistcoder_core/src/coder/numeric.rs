use std::fmt;

use crate::coder::Value;

const I128_LOWER: f64 = i128::MIN as f64;

/// Numeric payload lifted out of a [`Value`], widened without loss.
///
/// Every integer variant of the tree fits in `i128`; floats keep their source width so the
/// float-to-float rules can tell widening from narrowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
	/// Any signed or unsigned integer.
	Int(i128),
	/// Single-precision source.
	F32(f32),
	/// Double-precision source.
	F64(f64),
}

impl Number {
	/// Lift a numeric tree value; `None` for every non-numeric kind.
	pub fn from_value(value: &Value) -> Option<Self> {
		Some(match value {
			Value::I8(v) => Number::Int(i128::from(*v)),
			Value::I16(v) => Number::Int(i128::from(*v)),
			Value::I32(v) => Number::Int(i128::from(*v)),
			Value::I64(v) => Number::Int(i128::from(*v)),
			Value::U8(v) => Number::Int(i128::from(*v)),
			Value::U16(v) => Number::Int(i128::from(*v)),
			Value::U32(v) => Number::Int(i128::from(*v)),
			Value::U64(v) => Number::Int(i128::from(*v)),
			Value::F32(v) => Number::F32(*v),
			Value::F64(v) => Number::F64(*v),
			_ => return None,
		})
	}
}

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Number::Int(v) => write!(f, "{v}"),
			Number::F32(v) => write!(f, "{v}"),
			Number::F64(v) => write!(f, "{v}"),
		}
	}
}

/// Target side of the exact conversion matrix.
///
/// Each conversion returns `Some` only when the result compares equal to the source.
/// NaN is the one exception: it crosses float widths unconditionally.
pub trait ExactNumber: Copy + Sized {
	/// Type label used in diagnostics.
	const NAME: &'static str;

	/// Convert from an integer source.
	fn from_int_exact(value: i128) -> Option<Self>;

	/// Convert from a single-precision source.
	fn from_f32_exact(value: f32) -> Option<Self>;

	/// Convert from a double-precision source.
	fn from_f64_exact(value: f64) -> Option<Self>;

	/// Dispatch on the source representation.
	fn exact_from(number: Number) -> Option<Self> {
		match number {
			Number::Int(v) => Self::from_int_exact(v),
			Number::F32(v) => Self::from_f32_exact(v),
			Number::F64(v) => Self::from_f64_exact(v),
		}
	}
}

/// Integer value of `value` when it is finite, has no fractional part, and fits `i128`.
fn integral(value: f64) -> Option<i128> {
	if !value.is_finite() || value.fract() != 0.0 || value < I128_LOWER || value >= -I128_LOWER {
		return None;
	}
	Some(value as i128)
}

macro_rules! impl_exact_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl ExactNumber for $ty {
				const NAME: &'static str = stringify!($ty);

				fn from_int_exact(value: i128) -> Option<Self> {
					<$ty>::try_from(value).ok()
				}

				fn from_f32_exact(value: f32) -> Option<Self> {
					Self::from_f64_exact(f64::from(value))
				}

				fn from_f64_exact(value: f64) -> Option<Self> {
					integral(value).and_then(Self::from_int_exact)
				}
			}
		)*
	};
}

impl_exact_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ExactNumber for f32 {
	const NAME: &'static str = "f32";

	fn from_int_exact(value: i128) -> Option<Self> {
		let out = value as f32;
		(integral(f64::from(out)) == Some(value)).then_some(out)
	}

	fn from_f32_exact(value: f32) -> Option<Self> {
		Some(value)
	}

	fn from_f64_exact(value: f64) -> Option<Self> {
		if value.is_nan() {
			return Some(f32::NAN);
		}
		let out = value as f32;
		(f64::from(out) == value).then_some(out)
	}
}

impl ExactNumber for f64 {
	const NAME: &'static str = "f64";

	fn from_int_exact(value: i128) -> Option<Self> {
		let out = value as f64;
		(integral(out) == Some(value)).then_some(out)
	}

	fn from_f32_exact(value: f32) -> Option<Self> {
		Some(f64::from(value))
	}

	fn from_f64_exact(value: f64) -> Option<Self> {
		Some(value)
	}
}
