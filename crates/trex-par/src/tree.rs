//! Pass 2: tree construction over the normalised stream.

use trex_lex::Token;
use trex_util::GroupName;

use crate::ast::{Ast, ClassElem};
use crate::error::ParseError;

/// A work-stack entry: a finished node or an open marker.
enum Item {
    Node(Ast),
    SeqMark,
    GroupMark(GroupName),
}

/// Build the AST from a normalised token stream.
pub fn build(tokens: Vec<Token>) -> Result<Ast, ParseError> {
    let mut stack: Vec<Item> = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Literal(cp) => stack.push(Item::Node(Ast::Literal(cp))),
            Token::AnyChar => stack.push(Item::Node(Ast::AnyChar)),
            Token::Property { negated, name } => {
                stack.push(Item::Node(Ast::Property { negated, name }))
            }
            Token::BeginSeq => stack.push(Item::SeqMark),
            Token::BeginGroup(name) => stack.push(Item::GroupMark(name)),
            Token::BeginClass => {
                let class = class_body(&mut iter)?;
                stack.push(Item::Node(class));
            }
            Token::ZeroOne => quantify(&mut stack, |n| Ast::ZeroOne(Box::new(n)))?,
            Token::OneMore => quantify(&mut stack, |n| Ast::OneMore(Box::new(n)))?,
            Token::ZeroMore => quantify(&mut stack, |n| Ast::ZeroMore(Box::new(n)))?,
            Token::Repeat(count) => quantify(&mut stack, |n| Ast::Repeat {
                count,
                node: Box::new(n),
            })?,
            Token::EndSeq => {
                let nodes = pop_nodes_until(&mut stack, |item| matches!(item, Item::SeqMark))?;
                stack.pop(); // the SeqMark itself
                if nodes.is_empty() {
                    return Err(ParseError::EmptyAlternative);
                }
                stack.push(Item::Node(flatten_sequence(nodes)));
            }
            Token::EndGroup => {
                let nodes =
                    pop_nodes_until(&mut stack, |item| matches!(item, Item::GroupMark(_)))?;
                let name = match stack.pop() {
                    Some(Item::GroupMark(name)) => name,
                    _ => return Err(ParseError::Internal("group closer without marker")),
                };
                if nodes.is_empty() {
                    return Err(ParseError::EmptyGroup);
                }
                stack.push(Item::Node(Ast::Group {
                    name,
                    children: nodes,
                }));
            }
            Token::AlternateN(n) => {
                let mut arms = Vec::with_capacity(n as usize);
                for _ in 0..n {
                    match stack.pop() {
                        Some(Item::Node(node)) => arms.push(node),
                        _ => return Err(ParseError::Internal("alternation arity mismatch")),
                    }
                }
                arms.reverse();
                stack.push(Item::Node(Ast::Alternate(arms)));
            }
            Token::Alternate | Token::NegClass | Token::EndClass | Token::RangeTo => {
                return Err(ParseError::Internal("unnormalised token in pass 2"))
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(Item::Node(root)), true) => Ok(root),
        _ => Err(ParseError::Internal("parse stack not reduced to a root")),
    }
}

/// Pop the top run of finished nodes down to (not including) the first
/// marker accepted by `is_mark`, restoring source order. The marker is
/// left on the stack for the caller.
fn pop_nodes_until(
    stack: &mut Vec<Item>,
    is_mark: impl Fn(&Item) -> bool,
) -> Result<Vec<Ast>, ParseError> {
    let mut nodes = Vec::new();
    loop {
        match stack.last() {
            Some(Item::Node(_)) => {
                if let Some(Item::Node(node)) = stack.pop() {
                    nodes.push(node);
                }
            }
            Some(item) if is_mark(item) => break,
            _ => return Err(ParseError::Internal("marker mismatch on parse stack")),
        }
    }
    nodes.reverse();
    Ok(nodes)
}

/// A one-node sequence is just that node.
fn flatten_sequence(mut nodes: Vec<Ast>) -> Ast {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        Ast::Sequence(nodes)
    }
}

/// Pop one operand and push the quantified node.
fn quantify(stack: &mut Vec<Item>, wrap: impl FnOnce(Ast) -> Ast) -> Result<(), ParseError> {
    match stack.pop() {
        Some(Item::Node(node)) => {
            stack.push(Item::Node(wrap(node)));
            Ok(())
        }
        Some(other) => {
            stack.push(other);
            Err(ParseError::QuantifierWithoutOperand)
        }
        None => Err(ParseError::QuantifierWithoutOperand),
    }
}

/// The restricted class sub-parser, from just after `BeginClass` to
/// `EndClass`: literals, `lo-hi` ranges with `lo < hi`, properties and
/// the `.` oddity. Nothing else.
fn class_body(
    iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
) -> Result<Ast, ParseError> {
    let negated = matches!(iter.peek(), Some(Token::NegClass));
    if negated {
        iter.next();
    }
    let mut elems = Vec::new();
    loop {
        match iter.next() {
            Some(Token::EndClass) => break,
            Some(Token::Literal(lo)) => {
                if matches!(iter.peek(), Some(Token::RangeTo)) {
                    iter.next();
                    match iter.next() {
                        Some(Token::Literal(hi)) => {
                            if lo >= hi {
                                return Err(ParseError::InvertedRange { lo, hi });
                            }
                            elems.push(ClassElem::Range { lo, hi });
                        }
                        _ => return Err(ParseError::MalformedRange),
                    }
                } else {
                    elems.push(ClassElem::Literal(lo));
                }
            }
            Some(Token::Property { negated, name }) => {
                elems.push(ClassElem::Property { negated, name })
            }
            Some(Token::AnyChar) => elems.push(ClassElem::AnyChar),
            Some(Token::RangeTo) => return Err(ParseError::MalformedRange),
            Some(_) => return Err(ParseError::Internal("foreign token inside class")),
            None => return Err(ParseError::Internal("class not closed by the lexer")),
        }
    }
    if elems.is_empty() {
        return Err(ParseError::EmptyClass);
    }
    Ok(Ast::Class { negated, elems })
}
