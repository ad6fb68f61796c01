//! Option validation errors.

use thiserror::Error;

/// Error raised by option validation, before any traversal starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// The initial offset lies past the end of the input.
    #[error("offset {offset} is past the end of the input ({len} code points)")]
    OffsetPastEnd { offset: usize, len: usize },

    /// A zero timeout would fail every run immediately.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
