// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Binary adjacency-list encoding for atlas renderers.
//!
//! The adjacency stream is a flat run of little-endian `i32` words with no
//! header or framing. Each ranked node opens a block with its negated 1-based
//! rank, followed by the 1-based ranks of its outgoing neighbors in
//! non-increasing weight order:
//!
//! ```text
//! -1  2  3  -2  -3
//! └ A ┘     └B┘ └C┘
//! ```
//!
//! The node-id table is the rank order as newline-joined text, so line `i`
//! names the node written as `i + 1` in the stream.
#![forbid(unsafe_code)]

mod adjacency;
mod error;
mod table;
mod wire;

pub use adjacency::{decode, encode, AdjacencyBlock};
pub use error::{DecodeError, EncodeError};
pub use table::{parse_node_table, render_node_table};
pub use wire::{Reader, Writer, WORD_SIZE};

/// BLAKE3 content hash of an artifact, lowercase hex.
pub fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
