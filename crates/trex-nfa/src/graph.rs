//! Graph storage: the arena-backed NFA and the search overlay.
//!
//! A compiled [`Nfa`] owns its nodes in an [`IndexVec`] arena; dropping
//! it is teardown. The executor walks any [`Graph`], which lets a
//! search run splice a wildcard prefix *in front of* a compiled NFA
//! without touching it: the overlay nodes live in a disposable
//! [`Spliced`] holder whose ids extend the base arena's id space.

use trex_util::{CaptureFilter, CaptureKey, IndexVec};

use crate::node::{Node, NodeId};

/// Compile-time facts the executor needs alongside the nodes.
#[derive(Clone, Debug)]
pub struct GraphMeta {
    /// Every capture key owned by the pattern's groups, in lex order.
    pub keys: Vec<CaptureKey>,
    /// Number of capturing-group ordinals (1..=N all exist).
    pub group_count: u32,
    /// Compiled `dotall` flag; also used by the search prefix.
    pub dotall: bool,
    /// Compiled capture filter; runtime filters only restrict further.
    pub capture: CaptureFilter,
}

/// Anything the executor can traverse.
pub trait Graph {
    /// The node behind `id`.
    fn node(&self, id: NodeId) -> &Node;

    /// The entry node.
    fn start(&self) -> NodeId;

    /// Compile-time metadata.
    fn meta(&self) -> &GraphMeta;
}

/// A compiled NFA. Owns every node; dropping the value is teardown.
#[derive(Clone, Debug)]
pub struct Nfa {
    pub(crate) nodes: IndexVec<NodeId, Node>,
    pub(crate) start: NodeId,
    pub(crate) meta: GraphMeta,
}

impl Nfa {
    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate `(id, node)` pairs, for rendering and inspection.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter_enumerated()
    }
}

impl Graph for Nfa {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    fn start(&self) -> NodeId {
        self.start
    }

    fn meta(&self) -> &GraphMeta {
        &self.meta
    }
}

/// A search overlay: a `.*` prefix and the `:search` sentinel group
/// spliced in front of a borrowed base NFA.
///
/// Overlay ids continue where the base arena ends, so edges from the
/// overlay into the base resolve without rewriting anything. The
/// holder is disposable; dropping it leaves the base untouched.
pub struct Spliced<'a> {
    base: &'a Nfa,
    overlay: Vec<Node>,
    start: NodeId,
}

impl<'a> Spliced<'a> {
    pub(crate) fn new(base: &'a Nfa, overlay: Vec<Node>, start: NodeId) -> Self {
        Self {
            base,
            overlay,
            start,
        }
    }

    fn base_len(&self) -> usize {
        self.base.nodes.len()
    }
}

impl Graph for Spliced<'_> {
    fn node(&self, id: NodeId) -> &Node {
        let idx = trex_util::Idx::index(id);
        if idx < self.base_len() {
            self.base.node(id)
        } else {
            &self.overlay[idx - self.base_len()]
        }
    }

    fn start(&self) -> NodeId {
        self.start
    }

    fn meta(&self) -> &GraphMeta {
        self.base.meta()
    }
}
