//! Lex round-trip: formatting the token stream of a canonical pattern
//! reproduces the pattern exactly.

use proptest::prelude::*;

use trex_lex::{format_tokens, tokenize};

/// Strategy over a canonical pattern subset: no redundant escapes, no
/// whitespace tricks, ranges in order, repeat counts in `{2..=5}`.
fn canonical_regex() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z0-9]",
        Just(".".to_string()),
        "[a-f]".prop_map(|c| format!("[{c}-z]")),
        "[a-c]".prop_map(|c| format!("[^{c}x]")),
        Just("\\p{Lu}".to_string()),
        Just("\\P{Nd}".to_string()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(|parts| parts.concat()),
            (inner.clone(), prop_oneof![Just("?"), Just("+"), Just("*")])
                .prop_map(|(body, q)| format!("({body}){q}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
            ("[a-z]{1,4}", inner.clone()).prop_map(|(label, body)| format!("(?<{label}>{body})")),
            (inner.clone(), "[2-5]").prop_map(|(body, n)| format!("(?:{body}){{{n}}}")),
        ]
    })
}

proptest! {
    #[test]
    fn format_of_lex_is_identity(pattern in canonical_regex()) {
        let tokens = tokenize(&pattern).unwrap();
        prop_assert_eq!(format_tokens(&tokens), pattern);
    }
}
