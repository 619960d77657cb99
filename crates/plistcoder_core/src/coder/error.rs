use std::fmt;

use thiserror::Error;

use crate::coder::{CodingPath, ValueKind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Category of a [`DecodeError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Keyed lookup of an absent key.
	KeyNotFound,
	/// Value absent or equal to the nil sentinel.
	ValueNotFound,
	/// Value of an incompatible tree kind.
	TypeMismatch,
	/// Value of the right kind that cannot be converted exactly.
	DataCorrupted,
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ErrorKind::KeyNotFound => "key_not_found",
			ErrorKind::ValueNotFound => "value_not_found",
			ErrorKind::TypeMismatch => "type_mismatch",
			ErrorKind::DataCorrupted => "data_corrupted",
		})
	}
}

/// Errors produced while decoding a value tree into typed data.
///
/// Every variant carries the coding path at the point of failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
	/// A keyed container was asked for a key it does not hold.
	#[error("key not found at {path}: no value associated with key \"{key}\"")]
	KeyNotFound {
		/// Missing dictionary key.
		key: String,
		/// Container path plus the missing key.
		path: CodingPath,
	},
	/// Value absent, past the end of an unkeyed container, or the nil sentinel.
	#[error("value not found at {path}: {detail}")]
	ValueNotFound {
		/// Type that was requested.
		expected: &'static str,
		/// Location of the missing value.
		path: CodingPath,
		/// Human-readable explanation.
		detail: String,
	},
	/// Value present but of an incompatible kind.
	#[error("type mismatch at {path}: expected {expected}, found {found}")]
	TypeMismatch {
		/// Requested type or shape.
		expected: &'static str,
		/// Kind actually present in the tree.
		found: ValueKind,
		/// Location of the offending value.
		path: CodingPath,
	},
	/// Value of the right general kind that cannot be represented exactly, or rejected by user validation.
	#[error("data corrupted at {path}: {detail}")]
	DataCorrupted {
		/// Location of the offending value.
		path: CodingPath,
		/// Human-readable explanation.
		detail: String,
	},
}

impl DecodeError {
	/// Coding path at the point of failure.
	pub fn path(&self) -> &CodingPath {
		match self {
			DecodeError::KeyNotFound { path, .. }
			| DecodeError::ValueNotFound { path, .. }
			| DecodeError::TypeMismatch { path, .. }
			| DecodeError::DataCorrupted { path, .. } => path,
		}
	}

	/// Payload-free error category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			DecodeError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
			DecodeError::ValueNotFound { .. } => ErrorKind::ValueNotFound,
			DecodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
			DecodeError::DataCorrupted { .. } => ErrorKind::DataCorrupted,
		}
	}

	pub(crate) fn key_not_found(path: &CodingPath, key: &str) -> Self {
		DecodeError::KeyNotFound {
			key: key.to_owned(),
			path: path.joined(key),
		}
	}

	pub(crate) fn null_found(path: CodingPath, expected: &'static str) -> Self {
		DecodeError::ValueNotFound {
			expected,
			path,
			detail: format!("expected {expected} value but found null instead"),
		}
	}

	pub(crate) fn value_not_found(path: CodingPath, expected: &'static str, detail: impl Into<String>) -> Self {
		DecodeError::ValueNotFound {
			expected,
			path,
			detail: detail.into(),
		}
	}

	pub(crate) fn type_mismatch(path: CodingPath, expected: &'static str, found: ValueKind) -> Self {
		DecodeError::TypeMismatch { expected, found, path }
	}
}
