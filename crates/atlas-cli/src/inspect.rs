// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read back and summarize written artifacts.

use std::fs;

use anyhow::{bail, Context, Result};
use atlas_codec::{decode, digest, parse_node_table};
use comfy_table::{presets::ASCII_MARKDOWN, Table};
use serde::Serialize;

use crate::config::BuildConfig;

/// One row of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    /// 1-based id as written in the stream.
    pub id: usize,
    /// Node name from the table.
    pub name: String,
    /// Outgoing links written for the node.
    pub out_links: usize,
}

/// Verified summary of a node table and adjacency stream pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Node count.
    pub nodes: usize,
    /// Total outgoing links.
    pub links: usize,
    /// BLAKE3 digest of the node table.
    pub node_table_digest: String,
    /// BLAKE3 digest of the adjacency stream.
    pub adjacency_digest: String,
    /// The first nodes in rank order.
    pub top: Vec<NodeSummary>,
}

/// Decodes both artifacts and checks that they describe the same nodes.
pub fn inspect(config: &BuildConfig, top: usize) -> Result<Summary> {
    let table_path = config.node_table_path();
    let table_text = fs::read_to_string(&table_path)
        .with_context(|| format!("failed to read {}", table_path.display()))?;
    let links_path = config.adjacency_path();
    let stream = fs::read(&links_path)
        .with_context(|| format!("failed to read {}", links_path.display()))?;

    let names = parse_node_table(&table_text);
    let blocks = decode(&stream)
        .with_context(|| format!("{} is not an adjacency stream", links_path.display()))?;
    if names.len() != blocks.len() {
        bail!(
            "{} lists {} nodes but {} holds {} blocks",
            table_path.display(),
            names.len(),
            links_path.display(),
            blocks.len()
        );
    }

    let top = blocks
        .iter()
        .zip(&names)
        .take(top)
        .map(|(block, name)| NodeSummary {
            id: block.node + 1,
            name: name.clone(),
            out_links: block.neighbors.len(),
        })
        .collect();

    Ok(Summary {
        nodes: blocks.len(),
        links: blocks.iter().map(|b| b.neighbors.len()).sum(),
        node_table_digest: digest(table_text.as_bytes()),
        adjacency_digest: digest(&stream),
        top,
    })
}

/// Human-readable rendering of a [`Summary`].
pub fn render(summary: &Summary) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec!["id", "node", "out links"]);
    for row in &summary.top {
        table.add_row(vec![
            row.id.to_string(),
            row.name.clone(),
            row.out_links.to_string(),
        ]);
    }
    format!(
        "nodes: {}\nlinks: {}\nnode table: {}\nadjacency: {}\n\n{table}",
        summary.nodes, summary.links, summary.node_table_digest, summary.adjacency_digest
    )
}
