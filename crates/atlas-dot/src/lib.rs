// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graphviz DOT reader for atlas graphs.
//!
//! Supports the subset of DOT that graph exports actually use: `strict`,
//! `graph`/`digraph`, node/edge/attribute statements, chained edges,
//! anonymous and named subgraphs as edge operands, quoted and HTML ids,
//! ports (ignored) and all three comment styles.
//!
//! Undirected edges `a -- b` are stored as the link `a -> b`. The `weight`
//! attribute of an edge becomes the link weight.
#![forbid(unsafe_code)]

mod error;
mod lexer;
mod parser;

pub use error::DotError;

use atlas_graph::Graph;

/// Parses a single DOT graph.
pub fn parse(text: &str) -> Result<Graph, DotError> {
    let tokens = lexer::tokenize(text)?;
    parser::Parser::new(tokens).parse_graph()
}
