// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sentinel-delimited adjacency stream.
use atlas_graph::{Graph, RankTable};

use crate::error::{DecodeError, EncodeError};
use crate::wire::{Reader, Writer, WORD_SIZE};

/// One decoded node block, in 0-based rank terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyBlock {
    /// Rank of the node opening the block.
    pub node: usize,
    /// Ranks of its outgoing neighbors, heaviest link first.
    pub neighbors: Vec<usize>,
}

/// Encodes `graph` in `rank` order.
///
/// Only outgoing links are written. Neighbors are sorted by non-increasing
/// weight; equal weights keep the node's link order.
///
/// # Errors
/// - [`EncodeError::TooManyNodes`] when a 1-based rank exceeds `i32::MAX`.
/// - [`EncodeError::MissingNode`] when `rank` names a node not in `graph`.
/// - [`EncodeError::UnrankedNeighbor`] when a link leads outside `rank`.
pub fn encode(graph: &Graph, rank: &RankTable) -> Result<Vec<u8>, EncodeError> {
    let count = rank.len();
    let word = |index: usize| {
        i32::try_from(index + 1).map_err(|_| EncodeError::TooManyNodes { count })
    };
    word(count.saturating_sub(1))?;

    let mut writer = Writer::with_capacity(count + graph.link_count());
    let mut neighbors = Vec::new();
    for (index, id) in rank.iter() {
        if !graph.has_node(id) {
            return Err(EncodeError::MissingNode { id: id.to_owned() });
        }
        writer.write_i32_le(-word(index)?);

        neighbors.clear();
        for link in graph.outgoing(id) {
            let position = rank
                .position(link.to())
                .ok_or_else(|| EncodeError::UnrankedNeighbor {
                    from: id.to_owned(),
                    to: link.to().to_owned(),
                })?;
            neighbors.push((position, link.weight()));
        }
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1));
        for &(position, _) in &neighbors {
            writer.write_i32_le(word(position)?);
        }
    }
    Ok(writer.into_vec())
}

/// Splits an adjacency stream back into node blocks.
///
/// Block `i` must open with sentinel `-(i + 1)` and every neighbor must name
/// an existing block.
///
/// # Errors
/// See [`DecodeError`].
pub fn decode(bytes: &[u8]) -> Result<Vec<AdjacencyBlock>, DecodeError> {
    let mut reader = Reader::new(bytes)?;
    let mut blocks: Vec<AdjacencyBlock> = Vec::with_capacity(bytes.len() / WORD_SIZE);
    loop {
        let offset = reader.offset();
        let Some(value) = reader.read_i32_le() else {
            break;
        };
        let magnitude = usize::try_from(value.unsigned_abs()).unwrap_or(usize::MAX);
        match value.signum() {
            0 => return Err(DecodeError::ZeroWord { offset }),
            -1 => {
                let expected = blocks.len() + 1;
                if magnitude != expected {
                    return Err(DecodeError::SentinelOutOfOrder {
                        expected,
                        found: magnitude,
                    });
                }
                blocks.push(AdjacencyBlock {
                    node: magnitude - 1,
                    neighbors: Vec::new(),
                });
            }
            _ => match blocks.last_mut() {
                Some(block) => block.neighbors.push(magnitude - 1),
                None => return Err(DecodeError::MissingSentinel),
            },
        }
    }

    let count = blocks.len();
    for block in &blocks {
        if let Some(&neighbor) = block.neighbors.iter().find(|&&n| n >= count) {
            return Err(DecodeError::NeighborOutOfRange {
                node: block.node + 1,
                neighbor: neighbor + 1,
                count,
            });
        }
    }
    Ok(blocks)
}
