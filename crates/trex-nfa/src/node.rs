//! NFA node kinds.
//!
//! The eight node kinds live in one sum type stored in the arena. A
//! node's outgoing wiring starts unattached (`None` / empty) and is
//! filled in exactly once by the builder's combinators; an unattached
//! port reached at run time is a protocol error, never a silent stop.

use std::sync::Arc;

use trex_uniset::Uniset;
use trex_util::{define_idx, GroupName};

define_idx!(
    /// Index of a node in the graph arena.
    NodeId
);

/// The fast-path predicate of a matcher.
#[derive(Clone, Debug)]
pub enum Pred {
    /// One code point.
    Lit(u32),
    /// `.` — anything but `\n`, or anything at all under `dotall`.
    Any { dotall: bool },
    /// An inclusive code-point range.
    Range { lo: u32, hi: u32 },
    /// Membership in the carried set (property classes).
    InSet,
}

/// A matcher: predicate, sample set, and its negation flags.
#[derive(Clone, Debug)]
pub struct Matcher {
    pub pred: Pred,
    /// The positive code-point set of this element; drives generation
    /// and `InSet` matching.
    pub set: Arc<Uniset>,
    /// Element-level negation (`\P{…}`): the standalone predicate is the
    /// complement of `pred`/`set`.
    pub negated: bool,
    /// Inside a negated class: the final verdict is flipped once more,
    /// and a hit must not consume input.
    pub invert: bool,
    /// Test without consuming (negated-class members).
    pub peek: bool,
}

impl Matcher {
    /// Does the matcher pass the traversal on for `cp`?
    pub fn accepts(&self, cp: u32) -> bool {
        let raw = match self.pred {
            Pred::Lit(lit) => cp == lit,
            Pred::Any { dotall } => dotall || cp != '\n' as u32,
            Pred::Range { lo, hi } => cp >= lo && cp <= hi,
            Pred::InSet => self.set.contains(cp),
        };
        (raw ^ self.negated) ^ self.invert
    }

    /// The set this element matches standalone, negation applied. Used
    /// by the generator's class accumulator.
    pub fn standalone_set(&self) -> Uniset {
        if self.negated {
            self.set.complement()
        } else {
            (*self.set).clone()
        }
    }
}

/// One NFA node.
#[derive(Clone, Debug)]
pub enum Node {
    /// Entry point; owns the graph and forwards every state.
    Start { next: Option<NodeId> },

    /// Consumes (or peeks at) one code point.
    Match { matcher: Matcher, next: Option<NodeId> },

    /// Broadcasts each incoming state to every out-edge.
    Split { outs: Vec<NodeId> },

    /// Pushes an open-group frame and initialises its capture keys.
    BeginGroup { name: GroupName, next: Option<NodeId> },

    /// Pops the frame and records the capture extent.
    EndGroup { next: Option<NodeId> },

    /// Opens a peek-lookahead bracket (negated classes).
    BeginPeek { next: Option<NodeId> },

    /// Closes the bracket; consumes the peeked code point.
    EndPeek { next: Option<NodeId> },

    /// Terminal; publishes the traversal's outcome to the executor.
    Success,
}

impl Node {
    /// Out-edges, for rendering and debugging.
    pub fn outs(&self) -> Vec<NodeId> {
        match self {
            Node::Start { next }
            | Node::Match { next, .. }
            | Node::BeginGroup { next, .. }
            | Node::EndGroup { next }
            | Node::BeginPeek { next }
            | Node::EndPeek { next } => next.iter().copied().collect(),
            Node::Split { outs } => outs.clone(),
            Node::Success => Vec::new(),
        }
    }

    /// Short label for graph rendering.
    pub fn label(&self) -> String {
        match self {
            Node::Start { .. } => "start".to_string(),
            Node::Match { matcher, .. } => {
                let base = match &matcher.pred {
                    Pred::Lit(cp) => match char::from_u32(*cp) {
                        Some(c) if !c.is_control() => format!("'{c}'"),
                        _ => format!("U+{cp:04X}"),
                    },
                    Pred::Any { dotall: false } => ".".to_string(),
                    Pred::Any { dotall: true } => ".s".to_string(),
                    Pred::Range { lo, hi } => format!("U+{lo:04X}-U+{hi:04X}"),
                    Pred::InSet => format!("set({})", matcher.set.size()),
                };
                let mut label = base;
                if matcher.negated {
                    label = format!("!{label}");
                }
                if matcher.peek {
                    label = format!("peek {label}");
                }
                label
            }
            Node::Split { outs } => format!("split/{}", outs.len()),
            Node::BeginGroup { name, .. } => format!("begin({name})"),
            Node::EndGroup { .. } => "end".to_string(),
            Node::BeginPeek { .. } => "peek[".to_string(),
            Node::EndPeek { .. } => "]peek".to_string(),
            Node::Success => "success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(cp: char) -> Matcher {
        Matcher {
            pred: Pred::Lit(cp as u32),
            set: Arc::new(Uniset::point(cp as u32)),
            negated: false,
            invert: false,
            peek: false,
        }
    }

    #[test]
    fn literal_matcher_accepts_its_code_point() {
        let m = lit('a');
        assert!(m.accepts('a' as u32));
        assert!(!m.accepts('b' as u32));
    }

    #[test]
    fn inverted_matcher_flips_the_verdict() {
        let m = Matcher {
            invert: true,
            peek: true,
            ..lit('a')
        };
        assert!(!m.accepts('a' as u32));
        assert!(m.accepts('b' as u32));
    }

    #[test]
    fn any_matcher_rejects_newline_unless_dotall() {
        let any = Matcher {
            pred: Pred::Any { dotall: false },
            set: Arc::new(Uniset::point('\n' as u32).complement()),
            negated: false,
            invert: false,
            peek: false,
        };
        assert!(any.accepts('x' as u32));
        assert!(!any.accepts('\n' as u32));

        let all = Matcher {
            pred: Pred::Any { dotall: true },
            set: Arc::new(Uniset::all()),
            ..any
        };
        assert!(all.accepts('\n' as u32));
    }

    #[test]
    fn negated_property_standalone_set_is_the_complement() {
        let m = Matcher {
            pred: Pred::InSet,
            set: Arc::new(Uniset::range('a' as u32, 'z' as u32)),
            negated: true,
            invert: false,
            peek: false,
        };
        assert!(m.accepts('A' as u32));
        assert!(!m.accepts('q' as u32));
        let standalone = m.standalone_set();
        assert!(standalone.contains('A' as u32));
        assert!(!standalone.contains('q' as u32));
    }
}
