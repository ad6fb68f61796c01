//! AST node definitions.
//!
//! The tree the builder consumes. `Display` renders a node back to
//! pattern text; for the canonical pattern subset, parsing and
//! rendering are inverses.

use std::fmt;

use trex_lex::token::escape_literal;
use trex_util::GroupName;

/// A parsed regex node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ast {
    /// A literal code point.
    Literal(u32),

    /// `.`
    AnyChar,

    /// `\p{name}` / `\P{name}`.
    Property { negated: bool, name: String },

    /// Two or more nodes in order.
    Sequence(Vec<Ast>),

    /// A group; `children` form an implicit sequence.
    Group { name: GroupName, children: Vec<Ast> },

    /// Two or more alternatives, left to right.
    Alternate(Vec<Ast>),

    /// `?`
    ZeroOne(Box<Ast>),

    /// `+`
    OneMore(Box<Ast>),

    /// `*`
    ZeroMore(Box<Ast>),

    /// `{count}` with `count >= 2`.
    Repeat { count: u32, node: Box<Ast> },

    /// `[...]` / `[^...]`.
    Class { negated: bool, elems: Vec<ClassElem> },
}

/// An element of a character class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassElem {
    /// A literal code point.
    Literal(u32),

    /// `lo-hi` with `lo < hi`.
    Range { lo: u32, hi: u32 },

    /// A property, possibly negated.
    Property { negated: bool, name: String },

    /// `.` — always passes in a positive class, always fails in a
    /// negated one.
    AnyChar,
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Literal(cp) => write!(f, "{}", escape_literal(*cp)),
            Ast::AnyChar => write!(f, "."),
            Ast::Property { negated, name } => {
                write!(f, "\\{}{{{name}}}", if *negated { 'P' } else { 'p' })
            }
            Ast::Sequence(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Ast::Group { name, children } => {
                match name {
                    GroupName::Index(_) => write!(f, "(")?,
                    GroupName::Named(_, label) => write!(f, "(?<{label}>")?,
                    GroupName::NoCapture | GroupName::Search => write!(f, "(?:")?,
                }
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
            Ast::Alternate(arms) => {
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{arm}")?;
                }
                Ok(())
            }
            Ast::ZeroOne(node) => write!(f, "{node}?"),
            Ast::OneMore(node) => write!(f, "{node}+"),
            Ast::ZeroMore(node) => write!(f, "{node}*"),
            Ast::Repeat { count, node } => write!(f, "{node}{{{count}}}"),
            Ast::Class { negated, elems } => {
                write!(f, "[")?;
                if *negated {
                    write!(f, "^")?;
                }
                for elem in elems {
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for ClassElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassElem::Literal(cp) => write!(f, "{}", escape_literal(*cp)),
            ClassElem::Range { lo, hi } => {
                write!(f, "{}-{}", escape_literal(*lo), escape_literal(*hi))
            }
            ClassElem::Property { negated, name } => {
                write!(f, "\\{}{{{name}}}", if *negated { 'P' } else { 'p' })
            }
            ClassElem::AnyChar => write!(f, "."),
        }
    }
}
