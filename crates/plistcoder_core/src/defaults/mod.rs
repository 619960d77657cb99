mod accessor;
mod error;
mod json;
mod store;

/// Typed field descriptors and the store accessor built from them.
pub use accessor::{Field, StoreAccessor};
/// Store error type and result alias.
pub use error::{StoreError, StoreResult};
/// JSON document mapping and the file-backed store.
pub use json::{JsonFileStore, value_from_json, value_to_json};
/// Store trait and the in-memory store.
pub use store::{KeyValueStore, MemoryStore};
