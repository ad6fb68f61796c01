//! Traversal state: the payload carried between nodes.
//!
//! The input buffer itself lives in the executor behind an `Arc`; a
//! parse state is just an offset into it plus the group bookkeeping,
//! so fan-out clones stay cheap.

use trex_uniset::Uniset;
use trex_util::{CaptureMap, GroupName};

/// One independent execution path through the graph.
#[derive(Clone, Debug)]
pub enum Traversal {
    /// Matching an input string.
    Parse(ParseState),
    /// Producing a random string.
    Gen(GenState),
}

/// State of a matching traversal.
#[derive(Clone, Debug)]
pub struct ParseState {
    /// Code points consumed from the original input.
    pub pos: usize,
    /// Open-group frames, LIFO: `(name, start_pos)`.
    pub stack: Vec<(GroupName, usize)>,
    /// Captures recorded so far.
    pub caps: CaptureMap,
}

impl ParseState {
    /// A fresh traversal starting at `pos`.
    pub fn at(pos: usize) -> Self {
        Self {
            pos,
            stack: Vec::new(),
            caps: CaptureMap::default(),
        }
    }
}

/// State of a generating traversal.
#[derive(Clone, Debug)]
pub struct GenState {
    /// The string produced so far.
    pub out: String,
    /// Uniset accumulator, live between `BeginPeek` and `EndPeek`.
    pub acc: Option<Uniset>,
}

impl GenState {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            acc: None,
        }
    }
}

impl Default for GenState {
    fn default() -> Self {
        Self::new()
    }
}
