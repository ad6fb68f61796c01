//! Substring search over a compiled NFA.
//!
//! Search wraps the user graph in a wildcard prefix: a `.*` loop whose
//! bypass runs through a `BeginGroup(:search)` sentinel into the user
//! graph's own start. The sentinel frame never closes; it rides the
//! group stack to Success, which reads the match extent off it. The
//! prefix lives in a disposable [`Spliced`] overlay, so the compiled
//! NFA can be reused for any number of searches and is never modified.
//!
//! Overlapping matches fall out of the prefix fan-out (every input
//! position gets its own sentinel traversal); under `multiple=all`,
//! partial matches additionally restart a traversal at the post-match
//! position (§ executor), and duplicates are folded by the executor.

use std::sync::Arc;

use trex_uniset::Uniset;
use trex_util::{GroupName, Idx, Options, SearchResult};

use crate::error::RunError;
use crate::graph::{Graph, Nfa, Spliced};
use crate::node::{Matcher, Node, NodeId, Pred};

/// Search `input` for substrings matching the compiled graph.
pub fn run_search(nfa: &Nfa, input: &str, opts: &Options) -> Result<SearchResult, RunError> {
    let spliced = splice_prefix(nfa);
    crate::exec::run_search_on(&spliced, input, opts)
}

/// Build the `.*` + sentinel overlay in front of `nfa`.
pub fn splice_prefix(nfa: &Nfa) -> Spliced<'_> {
    let base_len = nfa.node_count();
    let id = |k: usize| NodeId::from_usize(base_len + k);
    let dotall = nfa.meta().dotall;
    let any_set = if dotall {
        Uniset::all()
    } else {
        Uniset::point('\n' as u32).complement()
    };

    let overlay = vec![
        // 0: the overlay's own start
        Node::Start { next: Some(id(1)) },
        // 1: the .* split — consume another code point, or begin a match here
        Node::Split {
            outs: vec![id(2), id(3)],
        },
        // 2: wildcard matcher looping back to the split
        Node::Match {
            matcher: Matcher {
                pred: Pred::Any { dotall },
                set: Arc::new(any_set),
                negated: false,
                invert: false,
                peek: false,
            },
            next: Some(id(1)),
        },
        // 3: the sentinel, wired into the untouched user graph
        Node::BeginGroup {
            name: GroupName::Search,
            next: Some(nfa.start()),
        },
    ];
    Spliced::new(nfa, overlay, id(0))
}
