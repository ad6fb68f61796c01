//! trex-par - The two-pass shunting-yard parser.
//!
//! Pass 1 ([`normalize`]) rewrites the infix token stream into a
//! postfix form: the input is wrapped in an implicit outer sequence,
//! every `|` becomes an `EndSeq, BeginSeq` boundary, and group closers
//! fold the recorded alternation arms into a single n-ary
//! `AlternateN` token.
//!
//! Pass 2 ([`build`]) runs left to right over the normalised stream
//! with a work stack: leaves push, quantifiers pop one operand,
//! `EndSeq`/`EndGroup` pop back to their matching marker, `AlternateN`
//! pops exactly n operands. Character classes use a restricted
//! sub-parser between `BeginClass` and `EndClass`.

pub mod ast;
pub mod error;
pub mod normalize;
pub mod tree;

pub use ast::{Ast, ClassElem};
pub use error::ParseError;
pub use normalize::normalize;
pub use tree::build;

use trex_lex::Token;

/// Parse a token stream into an AST.
///
/// # Example
///
/// ```
/// use trex_lex::tokenize;
/// use trex_par::{parse, Ast};
///
/// let ast = parse(tokenize("a|b").unwrap()).unwrap();
/// assert!(matches!(ast, Ast::Alternate(_)));
/// ```
pub fn parse(tokens: Vec<Token>) -> Result<Ast, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyPattern);
    }
    let normalized = normalize(tokens)?;
    build(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trex_lex::tokenize;
    use trex_util::GroupName;

    fn parsed(pattern: &str) -> Ast {
        parse(tokenize(pattern).unwrap()).unwrap()
    }

    #[test]
    fn single_literal_is_not_wrapped() {
        assert_eq!(parsed("a"), Ast::Literal('a' as u32));
    }

    #[test]
    fn two_literals_make_a_sequence() {
        assert_eq!(
            parsed("ab"),
            Ast::Sequence(vec![Ast::Literal('a' as u32), Ast::Literal('b' as u32)])
        );
    }

    #[test]
    fn top_level_alternation() {
        assert_eq!(
            parsed("a|b"),
            Ast::Alternate(vec![Ast::Literal('a' as u32), Ast::Literal('b' as u32)])
        );
    }

    #[test]
    fn alternation_is_nary_and_ordered() {
        match parsed("a|b|c") {
            Ast::Alternate(arms) => {
                assert_eq!(
                    arms,
                    vec![
                        Ast::Literal('a' as u32),
                        Ast::Literal('b' as u32),
                        Ast::Literal('c' as u32)
                    ]
                );
            }
            other => panic!("expected alternation, got {other:?}"),
        }
    }

    #[test]
    fn group_with_alternation() {
        let ast = parsed("x(a|b)y");
        match ast {
            Ast::Sequence(parts) => {
                assert_eq!(parts.len(), 3);
                match &parts[1] {
                    Ast::Group { name, children } => {
                        assert_eq!(*name, GroupName::Index(1));
                        assert!(matches!(children[0], Ast::Alternate(_)));
                    }
                    other => panic!("expected group, got {other:?}"),
                }
            }
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn group_without_alternation_keeps_flat_children() {
        match parsed("(ab)") {
            Ast::Group { children, .. } => assert_eq!(children.len(), 2),
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn quantifiers_bind_to_the_previous_node() {
        assert_eq!(
            parsed("ab*"),
            Ast::Sequence(vec![
                Ast::Literal('a' as u32),
                Ast::ZeroMore(Box::new(Ast::Literal('b' as u32)))
            ])
        );
    }

    #[test]
    fn repeat_quantifier() {
        assert_eq!(
            parsed("a{3}"),
            Ast::Repeat {
                count: 3,
                node: Box::new(Ast::Literal('a' as u32))
            }
        );
    }

    #[test]
    fn nested_alternation() {
        match parsed("(a|b)|c") {
            Ast::Alternate(arms) => {
                assert_eq!(arms.len(), 2);
                assert!(matches!(arms[0], Ast::Group { .. }));
            }
            other => panic!("expected alternation, got {other:?}"),
        }
    }

    #[test]
    fn class_elements() {
        assert_eq!(
            parsed("[a-dZ]"),
            Ast::Class {
                negated: false,
                elems: vec![
                    ClassElem::Range {
                        lo: 'a' as u32,
                        hi: 'd' as u32
                    },
                    ClassElem::Literal('Z' as u32)
                ]
            }
        );
    }

    #[test]
    fn negated_class() {
        match parsed("[^0-9p]") {
            Ast::Class { negated, elems } => {
                assert!(negated);
                assert_eq!(elems.len(), 2);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(parse(Vec::new()), Err(ParseError::EmptyPattern));
    }

    #[test]
    fn empty_alternative_is_rejected() {
        assert_eq!(
            parse(tokenize("a|").unwrap()),
            Err(ParseError::EmptyAlternative)
        );
        assert_eq!(
            parse(tokenize("(|a)").unwrap()),
            Err(ParseError::EmptyAlternative)
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        assert_eq!(parse(tokenize("()").unwrap()), Err(ParseError::EmptyGroup));
    }

    #[test]
    fn empty_class_is_rejected() {
        assert_eq!(parse(tokenize("[]").unwrap()), Err(ParseError::EmptyClass));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            parse(tokenize("[d-a]").unwrap()),
            Err(ParseError::InvertedRange {
                lo: 'd' as u32,
                hi: 'a' as u32
            })
        );
        assert_eq!(
            parse(tokenize("[a-a]").unwrap()),
            Err(ParseError::InvertedRange {
                lo: 'a' as u32,
                hi: 'a' as u32
            })
        );
    }

    #[test]
    fn dangling_range_is_rejected() {
        assert_eq!(
            parse(tokenize("[a-]").unwrap()),
            Err(ParseError::MalformedRange)
        );
        assert_eq!(
            parse(tokenize("[-a]").unwrap()),
            Err(ParseError::MalformedRange)
        );
    }

    #[test]
    fn quantifier_without_operand_is_rejected() {
        assert_eq!(
            parse(tokenize("*a").unwrap()),
            Err(ParseError::QuantifierWithoutOperand)
        );
        assert_eq!(
            parse(tokenize("(|*)").unwrap()),
            Err(ParseError::EmptyAlternative)
        );
        assert_eq!(
            parse(tokenize("(*a)").unwrap()),
            Err(ParseError::QuantifierWithoutOperand)
        );
    }

    #[test]
    fn unclosed_group_is_rejected() {
        assert_eq!(
            parse(tokenize("(ab").unwrap()),
            Err(ParseError::UnbalancedGroup)
        );
    }

    #[test]
    fn dot_inside_class_stays_anychar() {
        match parsed("[.a]") {
            Ast::Class { elems, .. } => {
                assert_eq!(elems[0], ClassElem::AnyChar);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }
}
