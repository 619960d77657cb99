use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use bytes::Bytes;
use time::OffsetDateTime;

use crate::coder::{CodingKey, Decode, Decoder, Primitive, Result, Value};

macro_rules! impl_decode_primitive {
	($($ty:ty),* $(,)?) => {
		$(
			impl Decode for $ty {
				fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
					decoder.decode_primitive()
				}

				fn type_label() -> &'static str {
					<$ty as Primitive>::NAME
				}
			}
		)*
	};
}

impl_decode_primitive!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, Bytes, OffsetDateTime);

impl Decode for Value {
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		Ok(decoder.value().clone())
	}

	fn type_label() -> &'static str {
		"value"
	}
}

impl<T: Decode> Decode for Option<T> {
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		if decoder.is_nil(decoder.value()) {
			return Ok(None);
		}
		T::decode(decoder).map(Some)
	}

	fn from_nil() -> Option<Self> {
		Some(None)
	}

	fn type_label() -> &'static str {
		T::type_label()
	}
}

impl<T: Decode> Decode for Box<T> {
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		T::decode(decoder).map(Box::new)
	}

	fn from_nil() -> Option<Self> {
		T::from_nil().map(Box::new)
	}

	fn type_label() -> &'static str {
		T::type_label()
	}
}

impl<T: Decode> Decode for Vec<T> {
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		let mut container = decoder.unkeyed_container()?;
		let mut out = Vec::with_capacity(container.count());
		while !container.is_at_end() {
			out.push(container.decode()?);
		}
		Ok(out)
	}

	fn type_label() -> &'static str {
		"array"
	}
}

impl<K, T> Decode for BTreeMap<K, T>
where
	K: CodingKey + Ord,
	T: Decode,
{
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		let mut container = decoder.keyed_container()?;
		let mut out = BTreeMap::new();
		for key in container.all_keys::<K>() {
			let value = container.decode(&key)?;
			out.insert(key, value);
		}
		Ok(out)
	}

	fn type_label() -> &'static str {
		"dictionary"
	}
}

impl<K, T, S> Decode for HashMap<K, T, S>
where
	K: CodingKey + Eq + Hash,
	T: Decode,
	S: BuildHasher + Default,
{
	fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
		let mut container = decoder.keyed_container()?;
		let mut out = HashMap::with_capacity_and_hasher(container.len(), S::default());
		for key in container.all_keys::<K>() {
			let value = container.decode(&key)?;
			out.insert(key, value);
		}
		Ok(out)
	}

	fn type_label() -> &'static str {
		"dictionary"
	}
}
