//! trex-nfa - Graph construction and traversal execution.
//!
//! The back half of the pipeline:
//!
//! ```text
//!   AST ──▶ [builder] ──▶ node arena (Nfa)
//!                              │
//!            [executor] ◀──────┤ match / search traversals
//!            [generator] ◀─────┤ random-string traversal
//!            [dot] ◀───────────┘ graph export
//! ```
//!
//! The graph is a vector of tagged node records addressed by typed
//! indices; builders return fragment handles (entry + open exit ports)
//! and the enclosing combinator does the wiring. Execution is a
//! cooperative scheduler over a FIFO work deque, with node outcomes
//! reported to the executor over a channel (see [`exec`]).

pub mod builder;
pub mod dot;
pub mod error;
pub mod exec;
pub mod graph;
pub mod node;
pub mod search;
pub mod state;

pub use builder::{build, compile, BuildError, CompileError};
pub use error::RunError;
pub use exec::{generate, generate_with_rng, run_match};
pub use graph::{Graph, GraphMeta, Nfa, Spliced};
pub use node::{Matcher, Node, NodeId, Pred};
pub use search::{run_search, splice_prefix};
