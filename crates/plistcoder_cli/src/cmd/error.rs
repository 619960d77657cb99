use std::path::PathBuf;

use plistcoder::coder::{DecodeError, ParsePathError};
use plistcoder::defaults::StoreError;
use thiserror::Error;

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input document could not be read.
	#[error("cannot read {path}: {source}")]
	Read {
		/// Input file.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
	/// Input document or argument is not valid JSON.
	#[error("invalid JSON in {origin}: {source}")]
	Json {
		/// File path or argument name.
		origin: String,
		/// Underlying error.
		#[source]
		source: serde_json::Error,
	},
	/// `--path` selects nothing in the document.
	#[error("no value at path {path}")]
	PathNotFound {
		/// Rendered selection path.
		path: String,
	},
	/// Store has no entry under the key.
	#[error("store has no entry for key \"{key}\"")]
	KeyNotFound {
		/// Requested key.
		key: String,
	},
	/// Selection path is malformed.
	#[error(transparent)]
	Path(#[from] ParsePathError),
	/// Typed decode failed.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Store could not be loaded, mapped, or saved.
	#[error(transparent)]
	Store(#[from] StoreError),
}
