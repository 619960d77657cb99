use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors produced while loading, saving, or mapping a persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Filesystem access failed.
	#[error("store I/O failed for {path}: {source}")]
	Io {
		/// File being read or written.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
	/// Document is not valid JSON.
	#[error("store JSON is invalid in {path}: {source}")]
	Json {
		/// File being parsed or written.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: serde_json::Error,
	},
	/// Document is valid JSON but has no value-tree representation.
	#[error("unsupported value at {location}: {detail}")]
	Unsupported {
		/// JSON-pointer style location of the offending value.
		location: String,
		/// Human-readable reason.
		detail: String,
	},
}

impl StoreError {
	pub(crate) fn unsupported(location: &str, detail: impl Into<String>) -> Self {
		let location = if location.is_empty() { "/" } else { location };
		Self::Unsupported {
			location: location.to_owned(),
			detail: detail.into(),
		}
	}
}
