// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! DOT reader behavior on realistic graph exports.
#![allow(clippy::unwrap_used)]

use atlas_graph::Link;

#[test]
fn reads_weighted_digraph_with_node_attributes() {
    let text = r#"
        digraph reddit {
            // communities
            "AskReddit" [size=1200];
            funny -> AskReddit [weight=12];
            funny -> pics [weight=40];
            pics -> AskReddit [weight=3.5]
        }
    "#;
    let g = atlas_dot::parse(text).unwrap();

    assert!(g.is_directed());
    let ids: Vec<_> = g.nodes().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["AskReddit", "funny", "pics"]);
    assert_eq!(g.link_count(), 3);
    assert_eq!(
        g.node("AskReddit").unwrap().data().get("size").map(String::as_str),
        Some("1200")
    );
    assert!((g.link("pics", "AskReddit").unwrap().weight() - 3.5).abs() < f64::EPSILON);
    let out: Vec<_> = g.outgoing("funny").map(Link::to).collect();
    assert_eq!(out, vec!["AskReddit", "pics"]);
}

#[test]
fn undirected_edges_are_stored_from_left_to_right() {
    let g = atlas_dot::parse("graph { a -- b -- c }").unwrap();
    assert!(!g.is_directed());
    assert!(g.has_link("a", "b"));
    assert!(g.has_link("b", "c"));
    assert!(!g.has_link("b", "a"));
}

#[test]
fn subgraph_operands_expand_to_every_pair() {
    let g = atlas_dot::parse("digraph { a -> { b c } -> subgraph s { d } }").unwrap();
    for (from, to) in [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")] {
        assert!(g.has_link(from, to), "missing {from} -> {to}");
    }
    assert_eq!(g.link_count(), 4);
}

#[test]
fn defaults_apply_to_later_statements_within_scope() {
    let text = "digraph {
        edge [weight=2];
        a -> b;
        { edge [weight=7]; c -> d }
        e -> f [weight=9];
        g -> h
    }";
    let g = atlas_dot::parse(text).unwrap();
    let weight = |from: &str, to: &str| g.link(from, to).unwrap().weight();
    assert!((weight("a", "b") - 2.0).abs() < f64::EPSILON);
    assert!((weight("c", "d") - 7.0).abs() < f64::EPSILON);
    assert!((weight("e", "f") - 9.0).abs() < f64::EPSILON);
    assert!((weight("g", "h") - 2.0).abs() < f64::EPSILON);
}

#[test]
fn quoted_ids_concatenate_and_ports_are_dropped() {
    let text = r#"strict digraph "g" { "3d" + "printing" -> "news":n:ne; rankdir = LR }"#;
    let g = atlas_dot::parse(text).unwrap();
    assert!(g.has_link("3dprinting", "news"));
    assert_eq!(g.node_count(), 2);
}

#[test]
fn repeated_edges_keep_last_data() {
    let g = atlas_dot::parse("digraph { a -> b [weight=1]; a -> b [weight=5] }").unwrap();
    assert_eq!(g.link_count(), 1);
    assert!((g.link("a", "b").unwrap().weight() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn missing_weight_reads_as_zero() {
    let g = atlas_dot::parse("digraph { a -> b }").unwrap();
    assert!(g.link("a", "b").unwrap().weight().abs() < f64::EPSILON);
}

#[test]
fn errors_carry_line_and_column() {
    let err = atlas_dot::parse("digraph {\n  a -> b\n  c -> [x=1]\n}").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 8);
    assert_eq!(err.to_string(), "line 3, column 8: expected node id");
}
