// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-check of the merged graph against the drawn node set.
use std::fmt;

use tracing::{info, warn};

use crate::graph::Graph;
use crate::vector_set::VectorNodeSet;

/// Non-fatal mismatch between the graph and the vector image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileWarning {
    /// A node marker is drawn but the graph has no such node.
    DanglingVisualNode {
        /// Id recovered from the marker.
        id: String,
    },
    /// A graph node is not drawn; it is pruned.
    OrphanGraphNode {
        /// Graph node id.
        id: String,
    },
}

impl ReconcileWarning {
    /// Node id the warning is about.
    pub fn id(&self) -> &str {
        match self {
            Self::DanglingVisualNode { id } | Self::OrphanGraphNode { id } => id,
        }
    }
}

impl fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingVisualNode { id } => write!(f, "node is missing in the graph: {id}"),
            Self::OrphanGraphNode { id } => {
                write!(f, "{id} is present in the graph but missing in the SVG")
            }
        }
    }
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Dangling warnings (vector-set order) followed by orphan warnings (graph order).
    pub warnings: Vec<ReconcileWarning>,
    /// Number of graph nodes removed.
    pub pruned: usize,
}

impl Reconciliation {
    /// Count of drawn ids with no graph data.
    pub fn dangling(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ReconcileWarning::DanglingVisualNode { .. }))
            .count()
    }

    /// Count of graph nodes that were not drawn.
    pub fn orphans(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ReconcileWarning::OrphanGraphNode { .. }))
            .count()
    }
}

/// Prunes every node the vector image does not draw.
///
/// Dangling ids are reported first, then orphans; the dangling case leaves the
/// graph untouched. Afterwards every node id in the graph is a member of
/// `drawn`.
pub fn reconcile(mut graph: Graph, drawn: &VectorNodeSet) -> (Graph, Reconciliation) {
    let mut outcome = Reconciliation::default();

    for id in drawn.iter() {
        if !graph.has_node(id) {
            let warning = ReconcileWarning::DanglingVisualNode { id: id.to_owned() };
            warn!("{warning}");
            outcome.warnings.push(warning);
        }
    }

    let doomed: Vec<String> = graph
        .nodes()
        .filter(|node| !drawn.contains(node.id()))
        .map(|node| node.id().to_owned())
        .collect();

    for id in &doomed {
        let warning = ReconcileWarning::OrphanGraphNode { id: id.clone() };
        warn!("{warning}. It will be deleted");
        outcome.warnings.push(warning);
    }

    for id in &doomed {
        if graph.remove_node(id) {
            outcome.pruned += 1;
        }
    }
    if outcome.pruned > 0 {
        info!(
            "Pruned {} nodes from the graph (they are missing in the SVG)",
            outcome.pruned
        );
    }

    (graph, outcome)
}
