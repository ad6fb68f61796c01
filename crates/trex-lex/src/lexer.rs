//! The lexer proper.
//!
//! One pass over the pattern, dispatching on the current character.
//! Group ordinals are assigned here, in lex order of the opening
//! parenthesis, so the parser and builder never renumber anything.

use trex_util::GroupName;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::Token;

/// Tokenise a pattern.
///
/// # Example
///
/// ```
/// use trex_lex::{tokenize, Token};
///
/// let tokens = tokenize("a+").unwrap();
/// assert_eq!(tokens, vec![Token::Literal('a' as u32), Token::OneMore]);
/// ```
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(pattern).run()
}

struct Lexer {
    cursor: Cursor,
    tokens: Vec<Token>,
    /// Open-group count; a `)` at zero is a stray closer.
    group_depth: u32,
    /// Next capturing-group ordinal, 1-based.
    next_ordinal: u32,
    /// Inside `[...]`, where most metacharacters are literal.
    in_class: bool,
}

impl Lexer {
    fn new(pattern: &str) -> Self {
        Self {
            cursor: Cursor::new(pattern),
            tokens: Vec::new(),
            group_depth: 0,
            next_ordinal: 1,
            in_class: false,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.bump() {
            if self.in_class {
                self.class_token(c)?;
            } else {
                self.token(c)?;
            }
        }
        if self.in_class {
            return Err(LexError::UnclosedClass);
        }
        Ok(self.tokens)
    }

    /// Dispatch outside a class.
    fn token(&mut self, c: char) -> Result<(), LexError> {
        let token = match c {
            '.' => Token::AnyChar,
            '?' => Token::ZeroOne,
            '+' => Token::OneMore,
            '*' => Token::ZeroMore,
            '|' => Token::Alternate,
            '(' => return self.group_open(),
            ')' => {
                if self.group_depth == 0 {
                    return Err(LexError::UnmatchedClose(')'));
                }
                self.group_depth -= 1;
                Token::EndGroup
            }
            '[' => {
                self.in_class = true;
                self.tokens.push(Token::BeginClass);
                if self.cursor.match_char('^') {
                    Token::NegClass
                } else {
                    return Ok(());
                }
            }
            ']' => return Err(LexError::UnmatchedClose(']')),
            '{' => self.repeat()?,
            '}' => return Err(LexError::UnmatchedClose('}')),
            '\\' => self.escape()?,
            _ => Token::Literal(c as u32),
        };
        self.tokens.push(token);
        Ok(())
    }

    /// Dispatch inside a class. `-` separates ranges, `.` stays
    /// `AnyChar`, escapes work; everything else is literal.
    fn class_token(&mut self, c: char) -> Result<(), LexError> {
        let token = match c {
            ']' => {
                self.in_class = false;
                Token::EndClass
            }
            '[' => return Err(LexError::NestedClass),
            '-' => Token::RangeTo,
            '.' => Token::AnyChar,
            '\\' => self.escape()?,
            _ => Token::Literal(c as u32),
        };
        self.tokens.push(token);
        Ok(())
    }

    /// `(`, `(?:` or `(?<name>`. Capturing forms take the next ordinal.
    fn group_open(&mut self) -> Result<(), LexError> {
        self.group_depth += 1;
        let name = if self.cursor.match_char('?') {
            match self.cursor.bump() {
                Some(':') => GroupName::NoCapture,
                Some('<') => {
                    let label = self.group_label()?;
                    let ordinal = self.next_ordinal;
                    self.next_ordinal += 1;
                    GroupName::Named(ordinal, label)
                }
                Some(other) => return Err(LexError::UnknownGroupModifier(other)),
                None => return Err(LexError::UnterminatedGroupName),
            }
        } else {
            let ordinal = self.next_ordinal;
            self.next_ordinal += 1;
            GroupName::Index(ordinal)
        };
        self.tokens.push(Token::BeginGroup(name));
        Ok(())
    }

    /// The `name` of `(?<name>`, `[A-Za-z0-9_]+` up to `>`.
    fn group_label(&mut self) -> Result<String, LexError> {
        let mut label = String::new();
        loop {
            match self.cursor.bump() {
                Some('>') => break,
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => label.push(c),
                Some(c) => return Err(LexError::InvalidGroupName(c)),
                None => return Err(LexError::UnterminatedGroupName),
            }
        }
        if label.is_empty() {
            return Err(LexError::EmptyGroupName);
        }
        Ok(label)
    }

    /// `{N}` with `N >= 2`.
    fn repeat(&mut self) -> Result<Token, LexError> {
        let mut digits = String::new();
        while let Some(c) = self.cursor.current() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        if digits.is_empty() || !self.cursor.match_char('}') {
            return Err(LexError::MalformedRepeat);
        }
        let count: u32 = digits.parse().map_err(|_| LexError::MalformedRepeat)?;
        if count < 2 {
            return Err(LexError::BadRepeat(count));
        }
        Ok(Token::Repeat(count))
    }

    /// Everything after a `\`.
    fn escape(&mut self) -> Result<Token, LexError> {
        let c = self.cursor.bump().ok_or(LexError::DanglingEscape)?;
        if !c.is_alphabetic() {
            return Ok(Token::Literal(c as u32));
        }
        let token = match c {
            'a' => Token::Literal(0x07),
            'b' => Token::Literal(0x08),
            'e' => Token::Literal(0x1B),
            'f' => Token::Literal(0x0C),
            'n' => Token::Literal(0x0A),
            'r' => Token::Literal(0x0D),
            't' => Token::Literal(0x09),
            'x' => Token::Literal(self.hex('x', 2)?),
            'u' => Token::Literal(self.hex('u', 4)?),
            'p' => self.property(false)?,
            'P' => self.property(true)?,
            'd' => shortcut("Nd", false),
            'D' => shortcut("Nd", true),
            'w' => shortcut("Xwd", false),
            'W' => shortcut("Xwd", true),
            other => return Err(LexError::UnknownEscape(other)),
        };
        Ok(token)
    }

    /// Exactly `wanted` hex digits.
    fn hex(&mut self, kind: char, wanted: usize) -> Result<u32, LexError> {
        let mut value = 0u32;
        for _ in 0..wanted {
            let digit = self
                .cursor
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or(LexError::BadHexLength { kind, wanted })?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    /// `\p{name}` / `\P{name}`. Spaces in the name are replaced with
    /// underscores; the name must resolve or the pattern is rejected
    /// here, before any parsing.
    fn property(&mut self, negated: bool) -> Result<Token, LexError> {
        if !self.cursor.match_char('{') {
            return Err(LexError::MalformedProperty);
        }
        let mut name = String::new();
        loop {
            match self.cursor.bump() {
                Some('}') => break,
                Some(' ') => name.push('_'),
                Some(c) => name.push(c),
                None => return Err(LexError::UnterminatedProperty),
            }
        }
        trex_uniset::resolve(&name)?;
        Ok(Token::Property { negated, name })
    }
}

/// Expansion target of the `\d \D \w \W` shortcuts.
fn shortcut(name: &str, negated: bool) -> Token {
    Token::Property {
        negated,
        name: name.to_string(),
    }
}
