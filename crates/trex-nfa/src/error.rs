//! Run-time errors.
//!
//! `NoMatch` is a result, never an error. Errors here are the fatal
//! conditions: option misuse, timeout, and protocol violations (a node
//! or the executor met a message shape it has no contract for — those
//! indicate an engine bug and are never silently recovered).

use std::time::Duration;

use thiserror::Error;

use trex_util::OptionError;

/// Fatal error from an executor run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// The run exceeded its timeout.
    #[error("run timed out after {0:?}")]
    Timeout(Duration),

    /// A node or the executor received an impossible message.
    #[error("protocol error: {0}")]
    Protocol(&'static str),

    /// Bad options, raised before any traversal started.
    #[error(transparent)]
    Option(#[from] OptionError),
}
