// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dense node numbering by descending connectivity.
use std::cmp::Reverse;

use rustc_hash::FxHashMap;

use crate::graph::Graph;

/// Canonical node-id table: position is the node's dense 0-based id.
///
/// Bijective with the node set of the graph it was built from and
/// non-increasing by link count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    ids: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl RankTable {
    /// Node ids in rank order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of ranked nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 0-based rank of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Iterates `(rank, id)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ids.iter().map(String::as_str).enumerate()
    }
}

/// Orders all nodes by non-increasing link count (both directions).
///
/// Ties keep the graph's insertion order. Ranks are never renumbered later.
pub fn rank(graph: &Graph) -> RankTable {
    let mut present: Vec<(&str, usize)> = graph
        .degrees()
        .map(|(node, degree)| (node.id(), degree))
        .collect();
    present.sort_by_key(|&(_, degree)| Reverse(degree));

    let ids: Vec<String> = present.into_iter().map(|(id, _)| id.to_owned()).collect();
    let positions = ids
        .iter()
        .enumerate()
        .map(|(rank, id)| (id.clone(), rank))
        .collect();
    RankTable { ids, positions }
}
