// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end build: merge, extract, reconcile, rank, encode, write.

use std::fs;
use std::path::{Path, PathBuf};

use atlas_codec::{digest, encode, render_node_table};
use atlas_graph::{merge_into, rank, reconcile, Graph, MergeStats, RankTable, Reconciliation};
use atlas_svg::{extract_from_svg, Extraction};
use tracing::info;

use crate::config::BuildConfig;
use crate::error::BuildError;

/// In-memory result of a build, ready to be written.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Graph after merging and pruning.
    pub graph: Graph,
    /// Final node order.
    pub rank: RankTable,
    /// What merging added, summed over all augmentations.
    pub merged: MergeStats,
    /// Node markers recovered from the map.
    pub extraction: Extraction,
    /// Mismatches between graph and map.
    pub reconciliation: Reconciliation,
    /// Encoded adjacency stream.
    pub adjacency: Vec<u8>,
    /// Rendered node-id table.
    pub node_table: String,
}

/// Location and digest of one written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where it was written.
    pub path: PathBuf,
    /// Size in bytes.
    pub len: usize,
    /// BLAKE3 hex digest of the contents.
    pub digest: String,
}

fn read_input(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn read_graph(path: &Path) -> Result<Graph, BuildError> {
    let text = read_input(path)?;
    atlas_dot::parse(&text).map_err(|source| BuildError::MalformedGraphText {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs every stage in memory. Nothing touches the output directory.
pub fn build(config: &BuildConfig) -> Result<BuildOutcome, BuildError> {
    info!("Reading the main graph file {}", config.graph.display());
    let mut graph = read_graph(&config.graph)?;
    info!(
        "Found {} nodes and {} edges",
        graph.node_count(),
        graph.link_count()
    );

    let mut merged = MergeStats::default();
    for path in &config.augmentations {
        info!("Augmenting graph from {}...", path.display());
        let augmentation = read_graph(path)?;
        let stats = merge_into(&mut graph, &augmentation);
        info!(
            "Added {} links and {} nodes to the main graph",
            stats.links_added, stats.nodes_added
        );
        merged += stats;
    }

    info!("Parsing svg file {}", config.svg.display());
    let svg = read_input(&config.svg)?;
    let extraction = extract_from_svg(&svg).map_err(|source| BuildError::MalformedGeometry {
        path: config.svg.clone(),
        source,
    })?;
    info!("Found {} svg nodes", extraction.nodes.len());

    info!("Checking svg nodes have neighbors...");
    let (graph, reconciliation) = reconcile(graph, &extraction.nodes);
    let rank = rank(&graph);

    info!("Preparing to save graph to binary...");
    let node_table = render_node_table(&rank)?;
    let adjacency = encode(&graph, &rank)?;

    Ok(BuildOutcome {
        graph,
        rank,
        merged,
        extraction,
        reconciliation,
        adjacency,
        node_table,
    })
}

fn write_artifact(path: PathBuf, bytes: &[u8]) -> Result<Artifact, BuildError> {
    fs::write(&path, bytes).map_err(|source| BuildError::Output {
        path: path.clone(),
        source,
    })?;
    Ok(Artifact {
        len: bytes.len(),
        digest: digest(bytes),
        path,
    })
}

/// Writes the node table, then the adjacency stream.
///
/// Returns `(node_table, adjacency)` artifacts.
pub fn write_outputs(
    config: &BuildConfig,
    outcome: &BuildOutcome,
) -> Result<(Artifact, Artifact), BuildError> {
    fs::create_dir_all(&config.out_dir).map_err(|source| BuildError::Output {
        path: config.out_dir.clone(),
        source,
    })?;

    let table_path = config.node_table_path();
    info!("Saving nodes into {}", table_path.display());
    let table = write_artifact(table_path, outcome.node_table.as_bytes())?;

    let links_path = config.adjacency_path();
    info!("Saving links into {}", links_path.display());
    let links = write_artifact(links_path, &outcome.adjacency)?;

    Ok((table, links))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn circle(id: &str) -> String {
        format!(r#"<circle id="{id}" cx="1" cy="1" r="1"/>"#)
    }

    fn fixture(
        svg_ids: &[&str],
        dot: &str,
        augmentation: Option<&str>,
    ) -> (tempfile::TempDir, BuildConfig) {
        let dir = tempfile::tempdir().unwrap();
        let circles: String = svg_ids.iter().map(|id| circle(id)).collect();
        fs::write(dir.path().join("map.svg"), format!("<svg>{circles}</svg>")).unwrap();
        fs::write(dir.path().join("main.dot"), dot).unwrap();
        let mut augmentations = Vec::new();
        if let Some(text) = augmentation {
            fs::write(dir.path().join("extra.dot"), text).unwrap();
            augmentations.push(dir.path().join("extra.dot"));
        }
        let config = BuildConfig {
            svg: dir.path().join("map.svg"),
            graph: dir.path().join("main.dot"),
            augmentations,
            out_dir: dir.path().join("dist"),
            ..BuildConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn builds_scenario_graph() {
        let (_dir, config) = fixture(
            &["A", "B", "_C"],
            "digraph { A -> B [weight=5]; A -> C [weight=1] }",
            None,
        );
        let outcome = build(&config).unwrap();
        assert_eq!(outcome.node_table, "A\nB\nC");
        assert_eq!(outcome.adjacency.len(), 4 * 5);
        assert!(outcome.reconciliation.warnings.is_empty());
    }

    #[test]
    fn augmentation_feeds_reconciliation() {
        let (_dir, config) = fixture(
            &["a", "b", "c"],
            "digraph { a -> b }",
            Some("digraph { b -> c [weight=2]; x -> a }"),
        );
        let outcome = build(&config).unwrap();
        assert_eq!(outcome.merged.nodes_added, 2);
        assert_eq!(outcome.merged.links_added, 2);
        assert_eq!(outcome.reconciliation.orphans(), 1);
        assert!(!outcome.graph.has_node("x"));
        assert_eq!(outcome.rank.ids(), ["b", "a", "c"]);
    }

    #[test]
    fn write_outputs_creates_directory_and_reports_digests() {
        let (_dir, config) = fixture(&["a", "b"], "digraph { a -> b }", None);
        let outcome = build(&config).unwrap();
        let (table, links) = write_outputs(&config, &outcome).unwrap();
        assert_eq!(fs::read_to_string(&table.path).unwrap(), "a\nb");
        assert_eq!(fs::read(&links.path).unwrap(), outcome.adjacency);
        assert_eq!(links.digest, digest(&outcome.adjacency));
        assert_eq!(table.len, 3);
    }

    #[test]
    fn unreadable_augmentation_is_input_not_found() {
        let (dir, mut config) = fixture(&["a"], "digraph { a }", None);
        config.augmentations = vec![dir.path().join("missing.dot")];
        assert!(matches!(
            build(&config),
            Err(BuildError::InputNotFound { .. })
        ));
    }

    #[test]
    fn broken_dot_is_malformed_graph_text() {
        let (_dir, config) = fixture(&["a"], "digraph { a -> }", None);
        assert!(matches!(
            build(&config),
            Err(BuildError::MalformedGraphText { .. })
        ));
    }
}
