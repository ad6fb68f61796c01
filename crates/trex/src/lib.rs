//! trex - A regular expression engine built on concurrent NFA
//! traversals.
//!
//! The pipeline:
//!
//! ```text
//!   pattern text
//!        │
//!        ▼
//!   [trex-lex]  ──▶ token stream
//!        │
//!        ▼
//!   [trex-par]  ──▶ AST (two-pass shunting yard)
//!        │
//!        ▼
//!   [trex-nfa]  ──▶ node arena (Thompson construction)
//!        │
//!        ▼
//!   executor    ──▶ MatchResult / SearchResult / generated string
//! ```
//!
//! There is no backtracking: every quantifier and alternation explores
//! all branches as independent traversals, which is what makes
//! exhaustive enumeration (`multiple=all`) and overlapping search
//! results possible.
//!
//! # Examples
//!
//! ```
//! use trex::{match_once, Options};
//!
//! let result = match_once("(ab)|(cd)", "cd", &Options::default()).unwrap();
//! assert!(result.is_match());
//! ```

use thiserror::Error;

pub use trex_lex::LexError;
pub use trex_nfa::{BuildError, Nfa, RunError};
pub use trex_par::{Ast, ParseError};
pub use trex_util::{
    Capture, CaptureFilter, CaptureKey, CaptureValue, CaptureValues, Extent, GroupName,
    MatchResult, Multiple, OptionError, Options, ReturnForm, SearchResult,
};

/// Any failure the engine can surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The pattern failed to tokenise.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token stream failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The AST failed to lower to a graph.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A run failed (timeout, bad options, protocol violation).
    #[error(transparent)]
    Run(#[from] RunError),

    /// Bad options caught before a run.
    #[error(transparent)]
    Option(#[from] OptionError),
}

impl From<trex_nfa::CompileError> for Error {
    fn from(err: trex_nfa::CompileError) -> Self {
        match err {
            trex_nfa::CompileError::Lex(e) => Error::Lex(e),
            trex_nfa::CompileError::Parse(e) => Error::Parse(e),
            trex_nfa::CompileError::Build(e) => Error::Build(e),
        }
    }
}

/// A compiled pattern: the batch handle of the engine.
///
/// Compile once, run any number of matches and searches against it;
/// dropping the value (or calling [`teardown`]) destroys the graph.
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    nfa: Nfa,
}

impl Regex {
    /// Compile `pattern` under `opts` (`dotall` and `capture` are
    /// baked into the graph).
    pub fn compile(pattern: &str, opts: &Options) -> Result<Self, Error> {
        let nfa = trex_nfa::compile(pattern, opts)?;
        Ok(Self {
            pattern: pattern.to_string(),
            nfa,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled graph.
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// Match `input` against the whole pattern.
    pub fn match_text(&self, input: &str, opts: &Options) -> Result<MatchResult, Error> {
        Ok(trex_nfa::run_match(&self.nfa, input, opts)?)
    }

    /// Search `input` for matching substrings. The compiled graph is
    /// reused untouched; the wildcard prefix lives in a disposable
    /// overlay.
    pub fn search(&self, input: &str, opts: &Options) -> Result<SearchResult, Error> {
        Ok(trex_nfa::run_search(&self.nfa, input, opts)?)
    }

    /// Produce a random string this pattern matches.
    pub fn generate(&self, opts: &Options) -> Result<String, Error> {
        Ok(trex_nfa::generate(&self.nfa, opts)?)
    }

    /// Render the graph as DOT text (the `graph_name` export hook).
    pub fn to_dot(&self, name: &str) -> String {
        trex_nfa::dot::render(&self.nfa, name)
    }
}

/// Destroy a compiled pattern. Equivalent to dropping it.
pub fn teardown(regex: Regex) {
    drop(regex);
}

/// One-shot match: compile, run, tear down.
pub fn match_once(pattern: &str, input: &str, opts: &Options) -> Result<MatchResult, Error> {
    let regex = Regex::compile(pattern, opts)?;
    let result = regex.match_text(input, opts);
    teardown(regex);
    result
}

/// One-shot generate: compile, sample, tear down.
pub fn generate(pattern: &str, opts: &Options) -> Result<String, Error> {
    let regex = Regex::compile(pattern, opts)?;
    let result = regex.generate(opts);
    teardown(regex);
    result
}

/// One-shot search, by textual rewrite.
///
/// The pattern is wrapped into `.*(RE).*` and run in match mode;
/// group 1 of each result is the match extent and every other ordinal
/// shifts down by one. Batch search on a compiled [`Regex`] gives the
/// same results without recompiling.
pub fn search_once(pattern: &str, input: &str, opts: &Options) -> Result<SearchResult, Error> {
    let wrapped = format!(".*({pattern}).*");
    // Run with full index captures; payload form and capture filters
    // are applied after the shift, against the caller's key space.
    let raw_opts = Options {
        return_form: ReturnForm::Index,
        capture: CaptureFilter::All,
        ..opts.clone()
    };
    let regex = Regex::compile(&wrapped, &raw_opts)?;
    let result = regex.match_text(input, &raw_opts);
    teardown(regex);

    let input_buf = trex_util::InputText::new(input);
    let convert = |caps: &CaptureValues| -> Option<(Extent, CaptureValues)> {
        let extent = match caps.get(&CaptureKey::Index(1))? {
            CaptureValue::Index { pos, len } => Extent::new(*pos, *len),
            _ => return None,
        };
        let mut shifted = CaptureValues::default();
        for (key, value) in caps {
            let key = match key {
                CaptureKey::Index(0) => CaptureKey::Index(0),
                CaptureKey::Index(1) => continue,
                CaptureKey::Index(n) => CaptureKey::Index(n - 1),
                other => other.clone(),
            };
            if !opts.capture.admits(&key) {
                continue;
            }
            let value = match (value, opts.return_form) {
                (CaptureValue::Index { pos, len }, ReturnForm::Binary) => {
                    CaptureValue::Text(input_buf.slice(*pos, *len))
                }
                (other, _) => other.clone(),
            };
            shifted.insert(key, value);
        }
        Some((extent, shifted))
    };

    Ok(match result? {
        MatchResult::NoMatch(echo) => SearchResult::NoMatch(echo),
        MatchResult::Match(caps) => match convert(&caps) {
            Some((extent, shifted)) => SearchResult::Search(extent, shifted),
            None => return Err(Error::Run(RunError::Protocol(
                "search wrapper lost its extent group",
            ))),
        },
        MatchResult::Matches(results) => {
            let mut hits: Vec<(Extent, CaptureValues)> = Vec::new();
            for caps in &results {
                match convert(caps) {
                    Some(hit) => {
                        if !hits.contains(&hit) {
                            hits.push(hit);
                        }
                    }
                    None => {
                        return Err(Error::Run(RunError::Protocol(
                            "search wrapper lost its extent group",
                        )))
                    }
                }
            }
            hits.sort_by_key(|(extent, _)| *extent);
            SearchResult::Searches(hits)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_and_reuse_a_handle() {
        let regex = Regex::compile("a+b", &Options::default()).unwrap();
        assert_eq!(regex.pattern(), "a+b");
        assert!(regex
            .match_text("aab", &Options::default())
            .unwrap()
            .is_match());
        assert!(!regex
            .match_text("b", &Options::default())
            .unwrap()
            .is_match());
        teardown(regex);
    }

    #[test]
    fn compile_errors_surface_their_phase() {
        assert!(matches!(
            Regex::compile("a{1}", &Options::default()),
            Err(Error::Lex(_))
        ));
        assert!(matches!(
            Regex::compile("(a", &Options::default()),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn dot_export_names_the_graph() {
        let regex = Regex::compile("ab", &Options::default()).unwrap();
        assert!(regex.to_dot("re").starts_with("digraph re {"));
    }
}
