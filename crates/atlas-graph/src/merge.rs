// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Additive merge of augmentation graphs into a primary graph.
use std::ops::AddAssign;

use tracing::debug;

use crate::graph::Graph;

/// Counts of what a merge added to the primary graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Nodes that were missing from the primary graph.
    pub nodes_added: usize,
    /// Directed links that were missing from the primary graph.
    pub links_added: usize,
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes_added += rhs.nodes_added;
        self.links_added += rhs.links_added;
    }
}

/// Folds `augmentation` into `primary` in place.
///
/// Walks the augmentation's links in order. Missing endpoints are added with
/// the augmentation's node data; missing `(from, to)` links are added with the
/// augmentation's link data. Nothing already in `primary` is removed or
/// updated, so when two augmentations introduce the same node the first one
/// applied wins. Augmentation nodes without links are not carried over.
pub fn merge_into(primary: &mut Graph, augmentation: &Graph) -> MergeStats {
    let mut stats = MergeStats::default();
    for link in augmentation.links() {
        for endpoint in [link.from(), link.to()] {
            if !primary.has_node(endpoint) {
                let data = augmentation
                    .node(endpoint)
                    .map(|node| node.data().clone())
                    .unwrap_or_default();
                primary.add_node(endpoint, data);
                stats.nodes_added += 1;
            }
        }
        if !primary.has_link(link.from(), link.to()) {
            primary.add_link(link.from(), link.to(), link.data().clone());
            stats.links_added += 1;
        }
    }
    debug!(
        nodes_added = stats.nodes_added,
        links_added = stats.links_added,
        "merged augmentation graph"
    );
    stats
}

/// Merges one augmentation graph, handing the primary graph back.
pub fn merge(mut primary: Graph, augmentation: &Graph) -> (Graph, MergeStats) {
    let stats = merge_into(&mut primary, augmentation);
    (primary, stats)
}

/// Merges augmentation graphs in the given order and sums their stats.
pub fn merge_all<'a, I>(mut primary: Graph, augmentations: I) -> (Graph, MergeStats)
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut total = MergeStats::default();
    for augmentation in augmentations {
        total += merge_into(&mut primary, augmentation);
    }
    (primary, total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{Attributes, WEIGHT_ATTRIBUTE};

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn adds_missing_nodes_and_links_with_augmentation_data() {
        let mut primary = Graph::new();
        primary.add_link("a", "b", attrs(&[(WEIGHT_ATTRIBUTE, "1")]));

        let mut aug = Graph::new();
        aug.add_node("c", attrs(&[("label", "Cee")]));
        aug.add_link("b", "c", attrs(&[(WEIGHT_ATTRIBUTE, "4")]));

        let (merged, stats) = merge(primary, &aug);
        assert_eq!(
            stats,
            MergeStats {
                nodes_added: 1,
                links_added: 1
            }
        );
        assert_eq!(
            merged.node("c").unwrap().data().get("label").map(String::as_str),
            Some("Cee")
        );
        assert!((merged.link("b", "c").unwrap().weight() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn never_overwrites_existing_node_or_link_data() {
        let mut primary = Graph::new();
        primary.add_node("a", attrs(&[("label", "primary")]));
        primary.add_link("a", "b", attrs(&[(WEIGHT_ATTRIBUTE, "1")]));

        let mut aug = Graph::new();
        aug.add_node("a", attrs(&[("label", "augmented")]));
        aug.add_link("a", "b", attrs(&[(WEIGHT_ATTRIBUTE, "99")]));

        let (merged, stats) = merge(primary, &aug);
        assert_eq!(stats, MergeStats::default());
        assert_eq!(
            merged.node("a").unwrap().data().get("label").map(String::as_str),
            Some("primary")
        );
        assert!((merged.link("a", "b").unwrap().weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn isolated_augmentation_nodes_are_not_carried_over() {
        let primary = Graph::new();
        let mut aug = Graph::new();
        aug.add_node("lonely", Attributes::new());
        let (merged, stats) = merge(primary, &aug);
        assert_eq!(merged.node_count(), 0);
        assert_eq!(stats.nodes_added, 0);
    }

    #[test]
    fn first_augmentation_wins_for_shared_new_node() {
        let mut first = Graph::new();
        first.add_node("n", attrs(&[("label", "first")]));
        first.add_link("n", "x", Attributes::new());
        let mut second = Graph::new();
        second.add_node("n", attrs(&[("label", "second")]));
        second.add_link("n", "y", Attributes::new());

        let (merged, stats) = merge_all(Graph::new(), [&first, &second]);
        assert_eq!(
            merged.node("n").unwrap().data().get("label").map(String::as_str),
            Some("first")
        );
        assert_eq!(stats.nodes_added, 3);
        assert_eq!(stats.links_added, 2);
    }
}
