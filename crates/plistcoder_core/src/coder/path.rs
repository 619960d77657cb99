use std::fmt;

use thiserror::Error;

/// Key used by keyed containers when a super decoder is requested without an explicit key.
pub const SUPER_KEY: &str = "super";

/// One location step inside a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
	/// Dictionary key.
	Key(String),
	/// Zero-based array index.
	Index(usize),
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathSegment::Key(key) if needs_quotes(key) => {
				f.write_str("[\"")?;
				for ch in key.chars() {
					if matches!(ch, '"' | '\\') {
						f.write_str("\\")?;
					}
					write!(f, "{ch}")?;
				}
				f.write_str("\"]")
			}
			PathSegment::Key(key) => f.write_str(key),
			PathSegment::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Keys that would not survive a bare dotted rendering are written as `["..."]`.
fn needs_quotes(key: &str) -> bool {
	key.is_empty() || key == ROOT_LABEL || key.contains(['.', '[', ']'])
}

const ROOT_LABEL: &str = "<root>";

impl From<&str> for PathSegment {
	fn from(value: &str) -> Self {
		PathSegment::Key(value.to_owned())
	}
}

impl From<String> for PathSegment {
	fn from(value: String) -> Self {
		PathSegment::Key(value)
	}
}

impl From<usize> for PathSegment {
	fn from(value: usize) -> Self {
		PathSegment::Index(value)
	}
}

/// Ordered key/index segments locating a position in a value tree.
///
/// Displayed in dotted form, e.g. `servers[1].ports[0]`; the empty path renders as `<root>`.
/// Keys that are empty or contain `.`, `[` or `]` render quoted, e.g. `hosts["db.local"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath {
	segments: Vec<PathSegment>,
}

/// Path expression that could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid coding path: {path}")]
pub struct ParsePathError {
	/// Original input.
	pub path: String,
}

impl CodingPath {
	/// Empty path addressing the root value.
	pub fn root() -> Self {
		Self::default()
	}

	/// Borrow the segments in order.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	/// Number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// True for the root path.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Last segment, if any.
	pub fn last(&self) -> Option<&PathSegment> {
		self.segments.last()
	}

	/// Append one segment.
	pub fn push(&mut self, segment: impl Into<PathSegment>) {
		self.segments.push(segment.into());
	}

	/// Remove the last segment.
	pub fn pop(&mut self) -> Option<PathSegment> {
		self.segments.pop()
	}

	/// Copy of this path with one more segment.
	pub fn joined(&self, segment: impl Into<PathSegment>) -> Self {
		let mut out = self.clone();
		out.push(segment);
		out
	}

	/// Parse dotted key syntax with optional `[index]` selectors.
	///
	/// Bare keys may contain any character except `.`, `[` and `]`. Other keys use the quoted
	/// selector `["..."]`, where `\"` and `\\` are the only escapes. A path may start with a
	/// selector to address into a root array or a quoted root key.
	pub fn parse(input: &str) -> Result<Self, ParsePathError> {
		let invalid = || ParsePathError { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut segments = Vec::new();

		while idx < bytes.len() {
			if bytes[idx] != b'[' {
				let start = idx;
				while idx < bytes.len() && !matches!(bytes[idx], b'.' | b'[' | b']') {
					idx += 1;
				}
				if idx == start {
					return Err(invalid());
				}
				segments.push(PathSegment::Key(input[start..idx].to_owned()));
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				if bytes.get(idx) == Some(&b'"') {
					let (key, next) = parse_quoted(bytes, idx + 1).ok_or_else(invalid)?;
					segments.push(PathSegment::Key(key));
					idx = next;
					continue;
				}

				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}

				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				segments.push(PathSegment::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { segments })
	}
}

/// Read a quoted key body starting after the opening quote, through the closing `"]`.
fn parse_quoted(bytes: &[u8], mut idx: usize) -> Option<(String, usize)> {
	let mut key = Vec::new();
	loop {
		match *bytes.get(idx)? {
			b'"' => break,
			b'\\' => {
				let escaped = *bytes.get(idx + 1)?;
				if !matches!(escaped, b'"' | b'\\') {
					return None;
				}
				key.push(escaped);
				idx += 2;
			}
			byte => {
				key.push(byte);
				idx += 1;
			}
		}
	}
	if bytes.get(idx + 1) != Some(&b']') {
		return None;
	}
	String::from_utf8(key).ok().map(|key| (key, idx + 2))
}

impl fmt::Display for CodingPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.segments.is_empty() {
			return f.write_str(ROOT_LABEL);
		}
		for (idx, segment) in self.segments.iter().enumerate() {
			if idx > 0 && matches!(segment, PathSegment::Key(key) if !needs_quotes(key)) {
				f.write_str(".")?;
			}
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}

impl<S: Into<PathSegment>> FromIterator<S> for CodingPath {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			segments: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// Key type accepted by keyed containers.
///
/// Implemented for `str` and `String`; field-name enums implement it to get typed
/// [`KeyedContainer::all_keys`](crate::coder::KeyedContainer::all_keys).
pub trait CodingKey {
	/// Dictionary key this coding key stands for.
	fn string_value(&self) -> &str;

	/// Convert a dictionary key back into this key type, if it names one.
	fn from_string_value(value: &str) -> Option<Self>
	where
		Self: Sized,
	{
		let _ = value;
		None
	}
}

impl CodingKey for str {
	fn string_value(&self) -> &str {
		self
	}
}

impl CodingKey for String {
	fn string_value(&self) -> &str {
		self
	}

	fn from_string_value(value: &str) -> Option<Self> {
		Some(value.to_owned())
	}
}

#[cfg(test)]
mod tests;
