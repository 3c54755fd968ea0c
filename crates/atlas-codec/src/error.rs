// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors produced while encoding a ranked graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A 1-based rank would not fit in an `i32` word.
    #[error("{count} nodes cannot be addressed by 32-bit ids")]
    TooManyNodes {
        /// Number of ranked nodes.
        count: usize,
    },
    /// The rank table names a node the graph does not hold.
    #[error("ranked node {id} is missing from the graph")]
    MissingNode {
        /// Offending id.
        id: String,
    },
    /// A link points at a node the rank table does not list.
    #[error("link {from} -> {to} points at an unranked node")]
    UnrankedNeighbor {
        /// Link source.
        from: String,
        /// Link target.
        to: String,
    },
    /// The id cannot be written as one line of the node table.
    #[error("node id {id:?} contains a line break")]
    UnrepresentableId {
        /// Offending id.
        id: String,
    },
}

/// Errors produced while decoding an adjacency stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ends inside a word.
    #[error("stream length {len} is not a multiple of 4")]
    Truncated {
        /// Stream length in bytes.
        len: usize,
    },
    /// The first word is not a sentinel.
    #[error("stream does not start with a sentinel")]
    MissingSentinel,
    /// A zero word, which is neither a sentinel nor a neighbor.
    #[error("zero word at byte offset {offset}")]
    ZeroWord {
        /// Byte offset of the word.
        offset: usize,
    },
    /// Sentinels must count up from `-1` one block at a time.
    #[error("expected sentinel -{expected}, found -{found}")]
    SentinelOutOfOrder {
        /// Expected 1-based id.
        expected: usize,
        /// 1-based id found.
        found: usize,
    },
    /// A neighbor id has no block of its own.
    #[error("node {node} lists neighbor {neighbor} but only {count} nodes exist")]
    NeighborOutOfRange {
        /// 1-based id of the listing node.
        node: usize,
        /// 1-based neighbor id.
        neighbor: usize,
        /// Number of blocks in the stream.
        count: usize,
    },
}
