//! Capture groups: names, keys, and the captures map.
//!
//! A group as written in the pattern has a *name* (its ordinal, an
//! ordinal/label pair, non-capturing, or the search sentinel). A name
//! owns zero or more capture *keys* under which its extent is recorded:
//! a labelled group owns both its ordinal key and its label key.

use std::fmt;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// The name of a group as it appears in the pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupName {
    /// A numbered group `(…)`; ordinals are 1-based in lex order.
    Index(u32),
    /// A labelled group `(?<label>…)`. It keeps its ordinal as well.
    Named(u32, String),
    /// A non-capturing group `(?:…)`.
    NoCapture,
    /// The sentinel group wrapped around a pattern for substring search.
    Search,
}

impl GroupName {
    /// The capture keys owned by this name.
    pub fn keys(&self) -> Vec<CaptureKey> {
        match self {
            GroupName::Index(n) => vec![CaptureKey::Index(*n)],
            GroupName::Named(n, label) => {
                vec![CaptureKey::Index(*n), CaptureKey::Label(label.clone())]
            }
            GroupName::NoCapture => Vec::new(),
            GroupName::Search => vec![CaptureKey::Search],
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupName::Index(n) => write!(f, "{n}"),
            GroupName::Named(n, label) => write!(f, "{n}/{label}"),
            GroupName::NoCapture => write!(f, "nocap"),
            GroupName::Search => write!(f, "search"),
        }
    }
}

/// A key in the captures mapping.
///
/// Key `Index(0)` is reserved for the whole input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaptureKey {
    /// Group ordinal (0 is the whole input).
    Index(u32),
    /// Group label.
    Label(String),
    /// The search sentinel.
    Search,
}

impl fmt::Display for CaptureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureKey::Index(n) => write!(f, "{n}"),
            CaptureKey::Label(label) => write!(f, "{label}"),
            CaptureKey::Search => write!(f, "search"),
        }
    }
}

/// A capture as recorded during traversal: a code-point extent, or the
/// marker for a group that never matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// The group did not participate in the match.
    NoCapture,
    /// Start position and length, in code points.
    Span { pos: usize, len: usize },
}

/// A capture as delivered in a result record, in the payload form the
/// caller asked for (`return: index | binary`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureValue {
    /// The group did not participate in the match.
    NoCapture,
    /// `(pos, len)` extent in code points.
    Index { pos: usize, len: usize },
    /// The matched text itself.
    Text(String),
}

impl fmt::Display for CaptureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureValue::NoCapture => write!(f, "-"),
            CaptureValue::Index { pos, len } => write!(f, "{{{pos},{len}}}"),
            CaptureValue::Text(text) => write!(f, "{text:?}"),
        }
    }
}

type FxBuild = BuildHasherDefault<FxHasher>;

/// The captures carried inside a traversal state.
///
/// Insertion order is kept so result output is stable; equality ignores
/// order, which is what result de-duplication relies on.
pub type CaptureMap = IndexMap<CaptureKey, Capture, FxBuild>;

/// The captures of a finished result.
pub type CaptureValues = IndexMap<CaptureKey, CaptureValue, FxBuild>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_group_owns_both_keys() {
        let name = GroupName::Named(2, "word".to_string());
        assert_eq!(
            name.keys(),
            vec![CaptureKey::Index(2), CaptureKey::Label("word".to_string())]
        );
    }

    #[test]
    fn nocap_owns_no_keys() {
        assert!(GroupName::NoCapture.keys().is_empty());
    }

    #[test]
    fn capture_map_equality_ignores_insertion_order() {
        let mut a = CaptureMap::default();
        a.insert(CaptureKey::Index(1), Capture::Span { pos: 0, len: 1 });
        a.insert(CaptureKey::Index(2), Capture::NoCapture);

        let mut b = CaptureMap::default();
        b.insert(CaptureKey::Index(2), Capture::NoCapture);
        b.insert(CaptureKey::Index(1), Capture::Span { pos: 0, len: 1 });

        assert_eq!(a, b);
    }
}
