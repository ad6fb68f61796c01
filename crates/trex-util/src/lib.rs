//! trex-util - Foundation types shared by every engine crate.
//!
//! This crate holds the small, dependency-light types the rest of the
//! pipeline is built on:
//!
//! - [`IndexVec`] and the [`define_idx!`] macro: typed indices into the
//!   NFA node arena, so a node id cannot be confused with any other
//!   integer.
//! - [`InputText`]: the immutable, code-point indexed input buffer.
//!   Traversal states carry a position into a shared buffer rather than
//!   cloned suffixes.
//! - Capture keys, capture values and the captures map.
//! - [`Options`]: the closed option record consumed by compile and the
//!   executor, with validation.
//! - [`MatchResult`] / [`SearchResult`]: the result records returned to
//!   clients.

pub mod capture;
pub mod error;
pub mod index_vec;
pub mod input;
pub mod options;
pub mod result;

pub use capture::{Capture, CaptureKey, CaptureMap, CaptureValue, CaptureValues, GroupName};
pub use error::OptionError;
pub use index_vec::{Idx, IndexVec};
pub use input::InputText;
pub use options::{CaptureFilter, Multiple, Options, ReturnForm};
pub use result::{Extent, MatchResult, SearchResult};

// Re-export commonly used hash collections.
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
