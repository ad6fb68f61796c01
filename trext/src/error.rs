//! Error handling for the trext CLI.
//!
//! Structured error types via `thiserror`; the binary maps them onto
//! exit code 2 (exit code 1 is reserved for a clean no-match).

use thiserror::Error;

/// Main error type for the trext CLI.
#[derive(Error, Debug)]
pub enum TrextError {
    /// Configuration file problems.
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad command-line input that clap cannot catch.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Anything the engine rejects: lex, parse, options, runtime.
    #[error(transparent)]
    Engine(#[from] trex::Error),

    /// File system failures.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failures.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using TrextError.
pub type Result<T> = std::result::Result<T, TrextError>;
