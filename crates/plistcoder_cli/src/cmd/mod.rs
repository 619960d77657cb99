/// Typed decode command.
pub mod decode;
/// CLI error type.
pub mod error;
/// Value tree printing.
pub mod print;
/// Document tree display command.
pub mod show;
/// Store entry commands.
pub mod store;
/// Shared argument and output helpers.
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CliError, Result};
