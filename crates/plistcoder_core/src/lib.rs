//! Exact, path-reporting decoding of property-list value trees into typed data.

/// Value tree, decode/encode engine, coding paths, and errors.
pub mod coder;
/// Key-value store facade, JSON-backed store, and typed per-field accessor.
pub mod defaults;

pub use coder::{Decode, DecodeError, Encode, ObjectDecoder, ObjectEncoder, Value, from_value, to_value};
