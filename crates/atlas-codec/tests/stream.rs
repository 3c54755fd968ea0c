// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Adjacency stream layout over ranked graphs.
#![allow(clippy::unwrap_used)]

use atlas_codec::{decode, digest, encode, parse_node_table, render_node_table, WORD_SIZE};
use atlas_graph::{rank, reconcile, Attributes, Graph, VectorNodeSet, WEIGHT_ATTRIBUTE};
use proptest::prelude::*;

fn weighted(w: u32) -> Attributes {
    Attributes::from([(WEIGHT_ATTRIBUTE.to_owned(), w.to_string())])
}

fn scenario() -> Graph {
    let mut g = Graph::new();
    g.add_link("A", "B", weighted(5));
    g.add_link("A", "C", weighted(1));
    g
}

#[test]
fn heaviest_neighbor_comes_first() {
    let g = scenario();
    let table = rank(&g);
    assert_eq!(table.ids(), ["A", "B", "C"]);

    let bytes = encode(&g, &table).unwrap();
    let expected: Vec<u8> = [-1i32, 2, 3, -2, -3]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();
    assert_eq!(bytes, expected);
    assert_eq!(render_node_table(&table).unwrap(), "A\nB\nC");
}

#[test]
fn pruned_neighbor_disappears_from_stream() {
    let vector: VectorNodeSet = ["A", "B"].into_iter().collect();
    let (g, _) = reconcile(scenario(), &vector);
    let table = rank(&g);
    let blocks = decode(&encode(&g, &table).unwrap()).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].neighbors, vec![1]);
    assert!(blocks[1].neighbors.is_empty());
}

#[test]
fn digest_is_stable_across_runs() {
    let g = scenario();
    let first = encode(&g, &rank(&g)).unwrap();
    let second = encode(&g, &rank(&g)).unwrap();
    assert_eq!(digest(&first), digest(&second));
    assert_eq!(digest(&first).len(), 64);
    assert_ne!(digest(&first), digest(&[]));
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    let id = prop::sample::select(vec!["n0", "n1", "n2", "n3", "n4", "n5", "n6"]);
    prop::collection::vec((id.clone(), id, 0u32..6), 0..24).prop_map(|links| {
        let mut g = Graph::new();
        for (from, to, w) in links {
            g.add_link(from, to, weighted(w));
        }
        g
    })
}

proptest! {
    #[test]
    fn decoding_recovers_rank_and_sorted_neighbors(g in graph_strategy()) {
        let table = rank(&g);
        let bytes = encode(&g, &table).unwrap();
        prop_assert_eq!(bytes.len(), WORD_SIZE * (g.node_count() + g.link_count()));

        let blocks = decode(&bytes).unwrap();
        prop_assert_eq!(blocks.len(), table.len());
        let total: usize = blocks.iter().map(|b| 1 + b.neighbors.len()).sum();
        prop_assert_eq!(total, g.node_count() + g.link_count());

        for (index, block) in blocks.iter().enumerate() {
            prop_assert_eq!(block.node, index);
            let id = &table.ids()[index];
            let weights: Vec<f64> = block
                .neighbors
                .iter()
                .map(|&n| g.link(id, &table.ids()[n]).unwrap().weight())
                .collect();
            prop_assert!(weights.windows(2).all(|w| w[0] >= w[1]));
            prop_assert_eq!(block.neighbors.len(), g.outgoing(id).count());
        }

        let text = render_node_table(&table).unwrap();
        prop_assert_eq!(parse_node_table(&text), table.ids().to_vec());
    }
}
