//! Parse errors.
//!
//! Like lexical errors, these abort compilation outright; there is no
//! error recovery and no partial tree.

use thiserror::Error;

/// Error raised by either parser pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The pattern has no tokens at all.
    #[error("empty pattern")]
    EmptyPattern,

    /// A `|` with nothing on one side.
    #[error("empty alternative")]
    EmptyAlternative,

    /// `()` — a group with no body.
    #[error("empty group")]
    EmptyGroup,

    /// `[]` / `[^]` — a class with no elements.
    #[error("empty character class")]
    EmptyClass,

    /// A class range `c1-c2` with `c1 >= c2`.
    #[error("inverted character range (U+{lo:04X} >= U+{hi:04X})")]
    InvertedRange { lo: u32, hi: u32 },

    /// A `-` with a missing or non-literal endpoint.
    #[error("malformed character range")]
    MalformedRange,

    /// `? + * {n}` with nothing to quantify.
    #[error("quantifier without operand")]
    QuantifierWithoutOperand,

    /// Groups open and close counts disagree.
    #[error("unbalanced groups")]
    UnbalancedGroup,

    /// A token reached a place the grammar cannot put it; indicates a
    /// bug in normalisation rather than bad input.
    #[error("internal parser error: {0}")]
    Internal(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(ParseError::EmptyGroup.to_string(), "empty group");
        assert_eq!(
            ParseError::InvertedRange {
                lo: 'd' as u32,
                hi: 'a' as u32
            }
            .to_string(),
            "inverted character range (U+0064 >= U+0061)"
        );
    }
}
