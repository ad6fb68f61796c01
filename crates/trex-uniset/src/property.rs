//! Property-name resolution.
//!
//! `\p{name}` resolves, in order, against: the literal general-category
//! table (case-sensitive), the extension categories `Xan`/`Xwd`/`Xsp`,
//! named Unicode blocks, and finally scripts. `Any` is an alias of the
//! full set. Category and script ranges come from the `regex-syntax`
//! Unicode tables; block ranges come from `unicode-blocks`.
//!
//! Resolution walks Unicode tables and is not free, so resolved sets
//! are cached process-wide behind an `Arc`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex_syntax::hir::{Class, HirKind};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{Run, Uniset, MAX_CP, SURROGATE_FIRST, SURROGATE_LAST};

/// Error from property resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// The property name is empty.
    #[error("empty property name")]
    EmptyName,

    /// The name matched no category, extension, block or script.
    #[error("unknown property name: {0}")]
    Unknown(String),
}

/// The literal general-category table: the seven groups and their
/// two-letter members. Checked case-sensitively, before anything else.
const CATEGORIES: &[&str] = &[
    "C", "Cc", "Cf", "Cn", "Co", "Cs", "L", "Ll", "Lm", "Lo", "Lt", "Lu", "M", "Mc", "Me", "Mn",
    "N", "Nd", "Nl", "No", "P", "Pc", "Pd", "Pe", "Pf", "Pi", "Po", "Ps", "S", "Sc", "Sk", "Sm",
    "So", "Z", "Zl", "Zp", "Zs",
];

static CACHE: Lazy<Mutex<FxHashMap<String, Arc<Uniset>>>> =
    Lazy::new(|| Mutex::new(FxHashMap::default()));

/// Resolve a property name to its code-point set.
///
/// # Example
///
/// ```
/// let lu = trex_uniset::resolve("Lu").unwrap();
/// assert!(lu.contains('A' as u32));
/// assert!(!lu.contains('a' as u32));
/// ```
pub fn resolve(name: &str) -> Result<Arc<Uniset>, PropertyError> {
    if name.is_empty() {
        return Err(PropertyError::EmptyName);
    }
    if let Some(set) = CACHE.lock().get(name) {
        return Ok(Arc::clone(set));
    }
    let set = Arc::new(resolve_uncached(name)?);
    CACHE.lock().insert(name.to_string(), Arc::clone(&set));
    Ok(set)
}

fn resolve_uncached(name: &str) -> Result<Uniset, PropertyError> {
    if name == "Any" {
        return Ok(Uniset::all());
    }
    if CATEGORIES.contains(&name) {
        return category(name).ok_or_else(|| PropertyError::Unknown(name.to_string()));
    }
    match name {
        "Xan" => return Ok(alnum()),
        "Xwd" => return Ok(alnum().union(&Uniset::point('_' as u32))),
        "Xsp" => return Ok(space()),
        _ => {}
    }
    if let Some(set) = block(name) {
        return Ok(set);
    }
    syntax_class(name).ok_or_else(|| PropertyError::Unknown(name.to_string()))
}

/// Ranges of a general category.
fn category(name: &str) -> Option<Uniset> {
    // The surrogate category is not expressible as a `char` class; its
    // range is known outright.
    if name == "Cs" {
        return Some(Uniset::range(SURROGATE_FIRST, SURROGATE_LAST));
    }
    syntax_class(name)
}

/// `Xan`: alphanumeric, composed from the base categories L and N.
fn alnum() -> Uniset {
    let letters = category("L").unwrap_or_else(Uniset::none);
    let numbers = category("N").unwrap_or_else(Uniset::none);
    letters.union(&numbers)
}

/// `Xsp`: separators plus the literal whitespace characters.
fn space() -> Uniset {
    let separators = category("Z").unwrap_or_else(Uniset::none);
    let literal = Uniset::from_points([0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20]);
    separators.union(&literal)
}

/// Ranges of `\p{name}` according to the `regex-syntax` Unicode tables
/// (categories by short or long name, scripts, and a few binary
/// properties).
fn syntax_class(name: &str) -> Option<Uniset> {
    let pattern = format!(r"\p{{{name}}}");
    let hir = regex_syntax::parse(&pattern).ok()?;
    match hir.into_kind() {
        HirKind::Class(Class::Unicode(class)) => {
            let runs = class
                .iter()
                .map(|r| {
                    let start = r.start() as u32;
                    let end = r.end() as u32;
                    Run::new(start, end - start + 1)
                })
                .collect();
            Some(Uniset::from_runs(runs))
        }
        _ => None,
    }
}

/// Ranges of the named Unicode block, if any.
///
/// Block names are compared case-folded with spaces, underscores and
/// hyphens removed, so `Basic_Latin`, `basic latin` and `BasicLatin`
/// all resolve. The scan collects member code points into runs; a
/// block is contiguous, so the result is a single run.
fn block(name: &str) -> Option<Uniset> {
    let wanted = fold_name(name);
    if wanted.is_empty() {
        return None;
    }
    let mut runs: Vec<Run> = Vec::new();
    let mut cp = 0u32;
    while cp <= MAX_CP {
        let hit = char::from_u32(cp)
            .and_then(unicode_blocks::find_unicode_block)
            .map_or(false, |b| fold_name(b.name()) == wanted);
        if hit {
            match runs.last_mut() {
                Some(run) if run.start + run.len == cp => run.len += 1,
                _ => runs.push(Run::new(cp, 1)),
            }
        }
        cp += 1;
    }
    if runs.is_empty() {
        None
    } else {
        Some(Uniset::from_runs(runs))
    }
}

/// Case-fold a block name and drop separators.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
