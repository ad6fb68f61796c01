//! DOT rendering of a compiled graph.
//!
//! The export hook behind the `graph_name` option. Produces plain DOT
//! text; turning it into an image is the caller's business.

use std::fmt::Write;

use crate::graph::Nfa;
use crate::node::Node;

/// Render the graph as a DOT digraph named `name`.
pub fn render(nfa: &Nfa, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", sanitize(name));
    let _ = writeln!(out, "    rankdir=LR;");
    for (id, node) in nfa.iter_nodes() {
        let shape = match node {
            Node::Start { .. } | Node::Success => "doublecircle",
            Node::Split { .. } => "diamond",
            Node::Match { .. } => "box",
            _ => "ellipse",
        };
        let _ = writeln!(
            out,
            "    n{} [label=\"{}\", shape={}];",
            id.0,
            node.label().replace('"', "\\\""),
            shape
        );
        for target in node.outs() {
            let _ = writeln!(out, "    n{} -> n{};", id.0, target.0);
        }
    }
    out.push_str("}\n");
    out
}

/// DOT identifiers: alphanumerics and underscores only.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() || cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("g{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::compile;
    use trex_util::Options;

    #[test]
    fn renders_nodes_and_edges() {
        let nfa = compile("a|b", &Options::default()).unwrap();
        let dot = render(&nfa, "re");
        assert!(dot.starts_with("digraph re {"));
        assert!(dot.contains("shape=diamond"));
        assert!(dot.contains("->"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn graph_names_are_sanitised() {
        let nfa = compile("a", &Options::default()).unwrap();
        let dot = render(&nfa, "1 bad name");
        assert!(dot.starts_with("digraph g1_bad_name {"));
    }
}
