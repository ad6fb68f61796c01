//! The token vocabulary.
//!
//! Most tokens come straight out of the lexer. `BeginSeq`, `EndSeq` and
//! `AlternateN` are produced only by the parser's normalisation pass;
//! they share the enum so both passes speak one language.

use std::fmt;

use trex_util::GroupName;

/// A lexical (or normalised) token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal code point.
    Literal(u32),

    /// `.`
    AnyChar,

    /// `?`
    ZeroOne,

    /// `+`
    OneMore,

    /// `*`
    ZeroMore,

    /// `|` as written; rewritten away by normalisation.
    Alternate,

    /// `(`, `(?:` or `(?<name>`.
    BeginGroup(GroupName),

    /// `)`
    EndGroup,

    /// `[`
    BeginClass,

    /// `^` immediately after `[`.
    NegClass,

    /// `]`
    EndClass,

    /// `-` inside a class.
    RangeTo,

    /// `{N}` with `N >= 2`.
    Repeat(u32),

    /// `\p{name}` / `\P{name}` (and the `\d \D \w \W` shortcuts).
    Property { negated: bool, name: String },

    /// Sequence open marker (normalisation only).
    BeginSeq,

    /// Sequence close marker (normalisation only).
    EndSeq,

    /// N-ary alternation (normalisation only); pops `n` operands.
    AlternateN(u32),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(cp) => write!(f, "{}", escape_literal(*cp)),
            Token::AnyChar => write!(f, "."),
            Token::ZeroOne => write!(f, "?"),
            Token::OneMore => write!(f, "+"),
            Token::ZeroMore => write!(f, "*"),
            Token::Alternate => write!(f, "|"),
            Token::BeginGroup(GroupName::Index(_)) => write!(f, "("),
            Token::BeginGroup(GroupName::Named(_, label)) => write!(f, "(?<{label}>"),
            Token::BeginGroup(GroupName::NoCapture) | Token::BeginGroup(GroupName::Search) => {
                write!(f, "(?:")
            }
            Token::EndGroup => write!(f, ")"),
            Token::BeginClass => write!(f, "["),
            Token::NegClass => write!(f, "^"),
            Token::EndClass => write!(f, "]"),
            Token::RangeTo => write!(f, "-"),
            Token::Repeat(n) => write!(f, "{{{n}}}"),
            Token::Property { negated, name } => {
                write!(f, "\\{}{{{name}}}", if *negated { 'P' } else { 'p' })
            }
            // Normalisation markers have no surface syntax.
            Token::BeginSeq | Token::EndSeq | Token::AlternateN(_) => Ok(()),
        }
    }
}

/// Format a token stream back to regex text.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

/// Render a literal code point, escaping metacharacters and using the
/// named escapes for controls. Shared with the AST unparser.
pub fn escape_literal(cp: u32) -> String {
    match cp {
        0x07 => return "\\a".to_string(),
        0x08 => return "\\b".to_string(),
        0x09 => return "\\t".to_string(),
        0x0A => return "\\n".to_string(),
        0x0D => return "\\r".to_string(),
        0x0C => return "\\f".to_string(),
        0x1B => return "\\e".to_string(),
        _ => {}
    }
    match char::from_u32(cp) {
        Some(c) if is_meta(c) => format!("\\{c}"),
        Some(c) if !c.is_control() => c.to_string(),
        _ if cp <= 0xFF => format!("\\x{cp:02X}"),
        _ if cp <= 0xFFFF => format!("\\u{cp:04X}"),
        Some(c) => c.to_string(),
        None => format!("\\u{cp:04X}"),
    }
}

/// Characters that must be escaped to read as themselves.
fn is_meta(c: char) -> bool {
    matches!(
        c,
        '.' | '?' | '+' | '*' | '|' | '(' | ')' | '[' | ']' | '-' | '{' | '}' | '\\'
    )
}
