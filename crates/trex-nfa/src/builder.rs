//! The Thompson builder: AST → graph, one combinator per node kind.
//!
//! Every AST node becomes a fragment with one entry and one or more
//! exit ports. Ports are left unattached until the enclosing combinator
//! wires them; the quantifier combinators also wire exits *backwards*
//! to their own split, which is what makes the graph cyclic.

use std::sync::Arc;

use thiserror::Error;

use trex_par::{Ast, ClassElem};
use trex_uniset::{PropertyError, Uniset};
use trex_util::{CaptureKey, GroupName, IndexVec, Options};

use crate::graph::{GraphMeta, Nfa};
use crate::node::{Matcher, Node, NodeId, Pred};

/// Error while lowering an AST to a graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A property leaf failed to resolve. The lexer validates names, so
    /// reaching this means the AST was built by hand.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// A subgraph under construction: its entry node and the ports still
/// waiting for a downstream.
struct Frag {
    entry: NodeId,
    exits: Vec<NodeId>,
}

/// Compile an AST into an owned graph.
pub fn build(ast: &Ast, opts: &Options) -> Result<Nfa, BuildError> {
    let mut builder = Builder {
        nodes: IndexVec::new(),
        dotall: opts.dotall,
    };
    let start = builder.nodes.push(Node::Start { next: None });
    let frag = builder.frag(ast)?;
    let success = builder.nodes.push(Node::Success);
    builder.attach(start, frag.entry);
    builder.attach_all(&frag.exits, success);

    let mut keys = Vec::new();
    let mut group_count = 0;
    collect_keys(ast, &mut keys, &mut group_count);

    Ok(Nfa {
        nodes: builder.nodes,
        start,
        meta: GraphMeta {
            keys,
            group_count,
            dotall: opts.dotall,
            capture: opts.capture.clone(),
        },
    })
}

struct Builder {
    nodes: IndexVec<NodeId, Node>,
    dotall: bool,
}

impl Builder {
    /// Fill one outgoing port of `port` with `target`.
    fn attach(&mut self, port: NodeId, target: NodeId) {
        match &mut self.nodes[port] {
            Node::Start { next }
            | Node::Match { next, .. }
            | Node::BeginGroup { next, .. }
            | Node::EndGroup { next }
            | Node::BeginPeek { next }
            | Node::EndPeek { next } => {
                debug_assert!(next.is_none(), "port wired twice");
                *next = Some(target);
            }
            Node::Split { outs } => outs.push(target),
            Node::Success => unreachable!("success has no outgoing ports"),
        }
    }

    fn attach_all(&mut self, ports: &[NodeId], target: NodeId) {
        for &port in ports {
            self.attach(port, target);
        }
    }

    /// Lower one AST node to a fragment.
    fn frag(&mut self, ast: &Ast) -> Result<Frag, BuildError> {
        match ast {
            Ast::Literal(cp) => Ok(self.matcher_frag(literal_matcher(*cp, false))),
            Ast::AnyChar => Ok(self.matcher_frag(self.any_matcher(false))),
            Ast::Property { negated, name } => {
                Ok(self.matcher_frag(property_matcher(name, *negated, false)?))
            }
            Ast::Sequence(parts) => self.sequence(parts),
            Ast::Group { name, children } => match name {
                GroupName::NoCapture => self.sequence(children),
                _ => {
                    let begin = self.nodes.push(Node::BeginGroup {
                        name: name.clone(),
                        next: None,
                    });
                    let body = self.sequence(children)?;
                    let end = self.nodes.push(Node::EndGroup { next: None });
                    self.attach(begin, body.entry);
                    self.attach_all(&body.exits, end);
                    Ok(Frag {
                        entry: begin,
                        exits: vec![end],
                    })
                }
            },
            Ast::Alternate(arms) => {
                let split = self.nodes.push(Node::Split { outs: Vec::new() });
                let mut exits = Vec::new();
                for arm in arms {
                    let frag = self.frag(arm)?;
                    self.attach(split, frag.entry);
                    exits.extend(frag.exits);
                }
                Ok(Frag {
                    entry: split,
                    exits,
                })
            }
            Ast::ZeroOne(node) => {
                let split = self.nodes.push(Node::Split { outs: Vec::new() });
                let body = self.frag(node)?;
                self.attach(split, body.entry);
                let mut exits = vec![split];
                exits.extend(body.exits);
                Ok(Frag {
                    entry: split,
                    exits,
                })
            }
            Ast::OneMore(node) => {
                let body = self.frag(node)?;
                let split = self.nodes.push(Node::Split { outs: Vec::new() });
                self.attach(split, body.entry);
                self.attach_all(&body.exits, split);
                Ok(Frag {
                    entry: body.entry,
                    exits: vec![split],
                })
            }
            Ast::ZeroMore(node) => {
                let split = self.nodes.push(Node::Split { outs: Vec::new() });
                let body = self.frag(node)?;
                self.attach(split, body.entry);
                self.attach_all(&body.exits, split);
                Ok(Frag {
                    entry: split,
                    exits: vec![split],
                })
            }
            Ast::Repeat { count, node } => {
                let copies: Vec<Ast> = std::iter::repeat((**node).clone())
                    .take(*count as usize)
                    .collect();
                self.sequence(&copies)
            }
            Ast::Class { negated, elems } => self.class(*negated, elems),
        }
    }

    /// Chain fragments left to right.
    fn sequence(&mut self, parts: &[Ast]) -> Result<Frag, BuildError> {
        debug_assert!(!parts.is_empty(), "parser rejects empty sequences");
        let mut iter = parts.iter();
        let first = self.frag(iter.next().expect("non-empty sequence"))?;
        let entry = first.entry;
        let mut exits = first.exits;
        for part in iter {
            let next = self.frag(part)?;
            self.attach_all(&exits, next.entry);
            exits = next.exits;
        }
        Ok(Frag { entry, exits })
    }

    /// A character class: an alternation of matchers when positive, a
    /// peek bracket over inverted matchers when negated.
    fn class(&mut self, negated: bool, elems: &[ClassElem]) -> Result<Frag, BuildError> {
        let matchers: Vec<Matcher> = elems
            .iter()
            .map(|elem| self.elem_matcher(elem, negated))
            .collect::<Result<_, _>>()?;

        if !negated {
            let split = self.nodes.push(Node::Split { outs: Vec::new() });
            let mut exits = Vec::new();
            for matcher in matchers {
                let frag = self.matcher_frag(matcher);
                self.attach(split, frag.entry);
                exits.extend(frag.exits);
            }
            return Ok(Frag {
                entry: split,
                exits,
            });
        }

        // Negated: every member must fail on the same unconsumed code
        // point; EndPeek then advances the input once.
        let begin = self.nodes.push(Node::BeginPeek { next: None });
        let mut tail = begin;
        for matcher in matchers {
            let node = self.nodes.push(Node::Match {
                matcher,
                next: None,
            });
            self.attach(tail, node);
            tail = node;
        }
        let end = self.nodes.push(Node::EndPeek { next: None });
        self.attach(tail, end);
        Ok(Frag {
            entry: begin,
            exits: vec![end],
        })
    }

    /// The matcher of one class element. `in_negated_class` turns it
    /// into a non-consuming, verdict-inverted peeker.
    fn elem_matcher(
        &self,
        elem: &ClassElem,
        in_negated_class: bool,
    ) -> Result<Matcher, BuildError> {
        let matcher = match elem {
            ClassElem::Literal(cp) => literal_matcher(*cp, in_negated_class),
            ClassElem::Range { lo, hi } => Matcher {
                pred: Pred::Range { lo: *lo, hi: *hi },
                set: Arc::new(Uniset::range(*lo, *hi)),
                negated: false,
                invert: in_negated_class,
                peek: in_negated_class,
            },
            ClassElem::Property { negated, name } => {
                property_matcher(name, *negated, in_negated_class)?
            }
            ClassElem::AnyChar => self.any_matcher(in_negated_class),
        };
        Ok(matcher)
    }

    /// `.` — with the dotall flag this graph was compiled under.
    fn any_matcher(&self, in_negated_class: bool) -> Matcher {
        let set = if self.dotall {
            Uniset::all()
        } else {
            Uniset::point('\n' as u32).complement()
        };
        Matcher {
            pred: Pred::Any {
                dotall: self.dotall,
            },
            set: Arc::new(set),
            negated: false,
            invert: in_negated_class,
            peek: in_negated_class,
        }
    }

    /// Push a single-matcher fragment.
    fn matcher_frag(&mut self, matcher: Matcher) -> Frag {
        let id = self.nodes.push(Node::Match {
            matcher,
            next: None,
        });
        Frag {
            entry: id,
            exits: vec![id],
        }
    }
}

fn literal_matcher(cp: u32, in_negated_class: bool) -> Matcher {
    Matcher {
        pred: Pred::Lit(cp),
        set: Arc::new(Uniset::point(cp)),
        negated: false,
        invert: in_negated_class,
        peek: in_negated_class,
    }
}

fn property_matcher(
    name: &str,
    negated: bool,
    in_negated_class: bool,
) -> Result<Matcher, BuildError> {
    let set = trex_uniset::resolve(name)?;
    Ok(Matcher {
        pred: Pred::InSet,
        set,
        negated,
        invert: negated ^ in_negated_class,
        peek: in_negated_class,
    })
}

/// Gather the capture keys of every group, in lex (preorder) order,
/// and the highest ordinal.
fn collect_keys(ast: &Ast, keys: &mut Vec<CaptureKey>, group_count: &mut u32) {
    match ast {
        Ast::Group { name, children } => {
            match name {
                GroupName::Index(n) | GroupName::Named(n, _) => {
                    *group_count = (*group_count).max(*n);
                }
                _ => {}
            }
            keys.extend(name.keys());
            for child in children {
                collect_keys(child, keys, group_count);
            }
        }
        Ast::Sequence(parts) | Ast::Alternate(parts) => {
            for part in parts {
                collect_keys(part, keys, group_count);
            }
        }
        Ast::ZeroOne(node) | Ast::OneMore(node) | Ast::ZeroMore(node) => {
            collect_keys(node, keys, group_count)
        }
        Ast::Repeat { node, .. } => collect_keys(node, keys, group_count),
        _ => {}
    }
}

/// Convenience: lex, parse and build in one call.
pub fn compile(pattern: &str, opts: &Options) -> Result<Nfa, CompileError> {
    let tokens = trex_lex::tokenize(pattern)?;
    let ast = trex_par::parse(tokens)?;
    Ok(build(&ast, opts)?)
}

/// Error from the full compile pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The pattern failed to tokenise.
    #[error(transparent)]
    Lex(#[from] trex_lex::LexError),

    /// The token stream failed to parse.
    #[error(transparent)]
    Parse(#[from] trex_par::ParseError),

    /// The AST failed to lower.
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(pattern: &str) -> Nfa {
        compile(pattern, &Options::default()).unwrap()
    }

    #[test]
    fn literal_chain_has_start_matchers_success() {
        let nfa = compiled("ab");
        // start, two matchers, success
        assert_eq!(nfa.node_count(), 4);
    }

    #[test]
    fn every_port_is_attached() {
        for pattern in ["ab", "a|b", "(a?)(a*)", "[^0-9p]+", "a{3}", "(?<x>a|bc)*"] {
            let nfa = compiled(pattern);
            for (id, node) in nfa.iter_nodes() {
                match node {
                    Node::Success => {}
                    Node::Split { outs } => {
                        assert!(!outs.is_empty(), "{pattern}: empty split at {id:?}")
                    }
                    other => assert!(
                        !other.outs().is_empty(),
                        "{pattern}: unattached port at {id:?}"
                    ),
                }
            }
        }
    }

    #[test]
    fn zero_more_loops_back_to_its_split() {
        let nfa = compiled("a*");
        let split_id = nfa
            .iter_nodes()
            .find_map(|(id, node)| matches!(node, Node::Split { .. }).then_some(id))
            .unwrap();
        let matcher_outs = nfa
            .iter_nodes()
            .find_map(|(_, node)| match node {
                Node::Match { next, .. } => *next,
                _ => None,
            })
            .unwrap();
        assert_eq!(matcher_outs, split_id);
    }

    #[test]
    fn repeat_builds_independent_copies() {
        let with_repeat = compiled("a{3}");
        let spelled_out = compiled("aaa");
        assert_eq!(with_repeat.node_count(), spelled_out.node_count());
    }

    #[test]
    fn group_count_and_keys() {
        let nfa = compiled("(a)(?<word>b)(?:c)");
        assert_eq!(nfa.meta.group_count, 2);
        assert_eq!(
            nfa.meta.keys,
            vec![
                CaptureKey::Index(1),
                CaptureKey::Index(2),
                CaptureKey::Label("word".to_string()),
            ]
        );
    }

    #[test]
    fn negated_class_builds_a_peek_chain() {
        let nfa = compiled("[^ab]");
        let peeks = nfa
            .iter_nodes()
            .filter(|(_, node)| matches!(node, Node::Match { matcher, .. } if matcher.peek))
            .count();
        assert_eq!(peeks, 2);
        assert!(nfa
            .iter_nodes()
            .any(|(_, node)| matches!(node, Node::BeginPeek { .. })));
        assert!(nfa
            .iter_nodes()
            .any(|(_, node)| matches!(node, Node::EndPeek { .. })));
    }
}
