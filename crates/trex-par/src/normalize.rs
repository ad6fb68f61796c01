//! Pass 1: postfix normalisation of alternation.
//!
//! The stream is wrapped in an implicit outer sequence. Each `|` closes
//! the current sequence and opens the next, recording its group depth
//! on an alternation stack. A group closer pops every entry recorded at
//! its own depth and folds them into one n-ary `AlternateN`. A group
//! opener injects a `BeginSeq` only when a lookahead finds a `|` at its
//! depth, so alternation-free groups stay unwrapped.
//!
//! Class contents travel through untouched; the lexer already reduced
//! everything inside `[...]` to class-only tokens.

use trex_lex::Token;

use crate::error::ParseError;

/// Rewrite a lexed token stream into the postfix form pass 2 consumes.
pub fn normalize(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::with_capacity(tokens.len() + 8);
    let mut depth: u32 = 0;
    let mut alt_depths: Vec<u32> = Vec::new();
    let mut in_class = false;

    out.push(Token::BeginSeq);
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::BeginClass => {
                in_class = true;
                out.push(token.clone());
            }
            Token::EndClass => {
                in_class = false;
                out.push(token.clone());
            }
            _ if in_class => out.push(token.clone()),
            Token::Alternate => {
                out.push(Token::EndSeq);
                out.push(Token::BeginSeq);
                alt_depths.push(depth);
            }
            Token::BeginGroup(_) => {
                depth += 1;
                out.push(token.clone());
                if has_alternation(&tokens[i + 1..]) {
                    out.push(Token::BeginSeq);
                }
            }
            Token::EndGroup => {
                if depth == 0 {
                    return Err(ParseError::UnbalancedGroup);
                }
                let mut arms: u32 = 0;
                while alt_depths.last() == Some(&depth) {
                    alt_depths.pop();
                    arms += 1;
                }
                if arms > 0 {
                    out.push(Token::EndSeq);
                    out.push(Token::AlternateN(arms + 1));
                }
                depth -= 1;
                out.push(Token::EndGroup);
            }
            _ => out.push(token.clone()),
        }
    }
    if depth > 0 {
        return Err(ParseError::UnbalancedGroup);
    }

    out.push(Token::EndSeq);
    // Whatever is left on the alternation stack belongs to depth 0.
    let arms = alt_depths.len() as u32;
    if arms > 0 {
        out.push(Token::AlternateN(arms + 1));
    }
    Ok(out)
}

/// Lookahead from just inside a group: is there a `|` before the
/// matching closer?
fn has_alternation(rest: &[Token]) -> bool {
    let mut rel: u32 = 1;
    let mut in_class = false;
    for token in rest {
        match token {
            Token::BeginClass => in_class = true,
            Token::EndClass => in_class = false,
            _ if in_class => {}
            Token::BeginGroup(_) => rel += 1,
            Token::EndGroup => {
                rel -= 1;
                if rel == 0 {
                    return false;
                }
            }
            Token::Alternate if rel == 1 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use trex_lex::tokenize;
    use trex_util::GroupName;

    fn normalized(pattern: &str) -> Vec<Token> {
        normalize(tokenize(pattern).unwrap()).unwrap()
    }

    #[test]
    fn plain_sequence_is_wrapped_once() {
        let tokens = normalized("ab");
        assert_eq!(tokens.first(), Some(&Token::BeginSeq));
        assert_eq!(tokens.last(), Some(&Token::EndSeq));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn outer_alternation_folds_at_end() {
        let tokens = normalized("a|b|c");
        assert_eq!(tokens.last(), Some(&Token::AlternateN(3)));
        let seams = tokens
            .iter()
            .filter(|t| matches!(t, Token::BeginSeq))
            .count();
        assert_eq!(seams, 3);
    }

    #[test]
    fn group_alternation_folds_before_the_closer() {
        let tokens = normalized("(a|b)");
        let close_at = tokens
            .iter()
            .position(|t| matches!(t, Token::EndGroup))
            .unwrap();
        assert_eq!(tokens[close_at - 1], Token::AlternateN(2));
    }

    #[test]
    fn group_without_alternation_gets_no_seq() {
        let tokens = normalized("(ab)");
        assert_eq!(
            tokens,
            vec![
                Token::BeginSeq,
                Token::BeginGroup(GroupName::Index(1)),
                Token::Literal('a' as u32),
                Token::Literal('b' as u32),
                Token::EndGroup,
                Token::EndSeq,
            ]
        );
    }

    #[test]
    fn inner_and_outer_alternation_fold_independently() {
        let tokens = normalized("(a|b)|c");
        assert_eq!(tokens.last(), Some(&Token::AlternateN(2)));
        let inner = tokens
            .iter()
            .filter(|t| matches!(t, Token::AlternateN(2)))
            .count();
        assert_eq!(inner, 2);
    }

    #[test]
    fn class_contents_pass_through() {
        let tokens = normalized("[a|b]");
        // The '|' inside the class is a literal and must not split the
        // sequence.
        assert!(!tokens.iter().any(|t| matches!(t, Token::AlternateN(_))));
    }

    #[test]
    fn unclosed_group_errors() {
        assert_eq!(
            normalize(tokenize("(a").unwrap()),
            Err(ParseError::UnbalancedGroup)
        );
    }
}
