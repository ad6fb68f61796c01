//! Lexical errors.
//!
//! Any of these aborts compilation before a token stream is produced;
//! no partial NFA ever comes out of a pattern that fails to lex.

use thiserror::Error;

use trex_uniset::PropertyError;

/// Error raised while tokenising a pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// `\` with nothing after it.
    #[error("lone '\\' at end of pattern")]
    DanglingEscape,

    /// `\c` where `c` is a letter with no assigned meaning.
    #[error("unknown escape '\\{0}'")]
    UnknownEscape(char),

    /// `\xHH` / `\uHHHH` with the wrong number of hex digits.
    #[error("expected {wanted} hex digits after '\\{kind}'")]
    BadHexLength { kind: char, wanted: usize },

    /// A stray closer with no opener: `)`, `]` or `}`.
    #[error("unmatched '{0}'")]
    UnmatchedClose(char),

    /// A class opened with `[` but never closed.
    #[error("unterminated character class")]
    UnclosedClass,

    /// `[` inside a class.
    #[error("nested character class")]
    NestedClass,

    /// `{N}` with N of 0 or 1.
    #[error("repeat count must be at least 2, got {0}")]
    BadRepeat(u32),

    /// `{` not followed by digits and `}`.
    #[error("malformed repeat count")]
    MalformedRepeat,

    /// `\p` not followed by a braced name.
    #[error("malformed property escape")]
    MalformedProperty,

    /// `\p{…` with no closing brace.
    #[error("unterminated property name")]
    UnterminatedProperty,

    /// A property name that resolves to nothing.
    #[error("{0}")]
    Property(#[from] PropertyError),

    /// `(?` followed by something other than `:` or `<`.
    #[error("unsupported group modifier '?{0}'")]
    UnknownGroupModifier(char),

    /// `(?<` with no closing `>`.
    #[error("unterminated group name")]
    UnterminatedGroupName,

    /// `(?<>` with nothing between the brackets.
    #[error("empty group name")]
    EmptyGroupName,

    /// A group-name character outside `[A-Za-z0-9_]`.
    #[error("invalid character '{0}' in group name")]
    InvalidGroupName(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LexError::UnmatchedClose(')').to_string(),
            "unmatched ')'"
        );
        assert_eq!(
            LexError::BadRepeat(1).to_string(),
            "repeat count must be at least 2, got 1"
        );
        assert_eq!(
            LexError::BadHexLength {
                kind: 'x',
                wanted: 2
            }
            .to_string(),
            "expected 2 hex digits after '\\x'"
        );
    }

    #[test]
    fn property_error_converts() {
        let err: LexError = PropertyError::EmptyName.into();
        assert_eq!(err.to_string(), "empty property name");
    }
}
