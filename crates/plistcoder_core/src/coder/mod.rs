mod coerce;
mod container;
mod decoder;
mod encoder;
mod error;
mod impls;
mod numeric;
mod path;
mod value;

/// Primitive coercion entry points and nil-sentinel default.
pub use coerce::{DEFAULT_NIL_SYMBOL, Primitive, coerce};
/// Keyed, unkeyed, and single-value decoding containers.
pub use container::{KeyedContainer, SingleValueContainer, UnkeyedContainer};
/// Decode contract, per-call decode context, and top-level entry points.
pub use decoder::{Decode, Decoder, ObjectDecoder, from_value};
/// Encode contract and tree builders.
pub use encoder::{DictionaryBuilder, Encode, ObjectEncoder, to_value};
/// Error and result aliases.
pub use error::{DecodeError, ErrorKind, Result};
/// Exact numeric conversion matrix.
pub use numeric::{ExactNumber, Number};
/// Coding path segments, keys, and parser.
pub use path::{CodingKey, CodingPath, ParsePathError, PathSegment, SUPER_KEY};
/// Untyped tree value representation.
pub use value::{Value, ValueKind};
