//! trex-lex - The regex lexer.
//!
//! Transforms regex text into the token stream consumed by the parser.
//! The lexer is a single pass directed by the current character; no
//! regular expression is used to tokenise one.
//!
//! The lexer is lightly contextual: inside a character class most
//! metacharacters lose their meaning (`|`, `(`, `)`, `{`, `}`, `?`,
//! `+`, `*` lex as literals there), `-` becomes a range separator, and
//! `^` negates only immediately after `[`. `.` keeps its `AnyChar`
//! token even inside classes.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;

pub use error::LexError;
pub use lexer::tokenize;
pub use token::{format_tokens, Token};

// The group-name type is shared with the parser and the NFA builder.
pub use trex_util::GroupName;
