//! Cross-cutting laws checked over a fixed ensemble of patterns.

use trex::{generate, match_once, search_once, MatchResult, Multiple, Options, Regex, SearchResult};

fn opts() -> Options {
    Options::default()
}

fn all() -> Options {
    Options {
        multiple: Multiple::All,
        ..Options::default()
    }
}

/// Every generated string matches the pattern it was generated from.
#[test]
fn generate_is_a_subset_of_match() {
    let patterns = [
        "ab",
        "a|bc",
        "(a?)(a*)b",
        "[a-d]+e?",
        "[^x]y",
        r"\d\p{Lu}",
        "(?<w>x|y){3}",
    ];
    for pattern in patterns {
        for _ in 0..8 {
            let s = generate(pattern, &opts()).unwrap();
            let result = match_once(pattern, &s, &opts()).unwrap();
            assert!(
                result.is_match(),
                "{pattern}: generated {s:?} does not match"
            );
        }
    }
}

/// The `one` result is an element of the `all` result set, which holds
/// no duplicates.
#[test]
fn multiplicity_sanity() {
    let cases = [
        ("(a?)(a*)", "aa"),
        ("(a|ab)(c|bc)", "abc"),
        ("a*b?", ""),
        ("(x+)(x*)", "xxx"),
    ];
    for (pattern, input) in cases {
        let one = match match_once(pattern, input, &opts()).unwrap() {
            MatchResult::Match(caps) => caps,
            MatchResult::NoMatch(_) => continue,
            other => panic!("{pattern}: unexpected {other:?}"),
        };
        let everything = match match_once(pattern, input, &all()).unwrap() {
            MatchResult::Matches(results) => results,
            other => panic!("{pattern}: expected matches, got {other:?}"),
        };
        assert!(
            everything.contains(&one),
            "{pattern}: one-result missing from all-results"
        );
        for (i, a) in everything.iter().enumerate() {
            for b in &everything[i + 1..] {
                assert_ne!(a, b, "{pattern}: duplicate in all-results");
            }
        }
    }
}

/// Batch search (prefix splice over a compiled graph) and one-shot
/// search (textual `.*(RE).*` rewrite) agree exactly.
#[test]
fn spliced_search_equals_wrapped_match() {
    let cases = [
        ("ana", "banana"),
        ("Z", "aZnZs"),
        ("a+", "caat"),
        ("(b|n)a", "banana"),
        ("(?<x>an)a", "banana"),
        ("zz", "banana"),
    ];
    for (pattern, input) in cases {
        let batch = Regex::compile(pattern, &opts())
            .unwrap()
            .search(input, &all())
            .unwrap();
        let rewritten = search_once(pattern, input, &all()).unwrap();
        assert_eq!(batch, rewritten, "{pattern} on {input}");
    }
}

/// The search index is the extent of the wrapper's group 1.
#[test]
fn search_index_is_group_one_of_the_wrapped_match() {
    match search_once("an", "band", &opts()).unwrap() {
        SearchResult::Search(extent, _) => {
            assert_eq!((extent.pos, extent.len), (1, 2));
        }
        other => panic!("expected search, got {other:?}"),
    }
}
