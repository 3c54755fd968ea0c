// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Streaming SVG shape reader and node-marker extraction.
//!
//! [`ShapeReader`] walks the markup once, lazily, yielding one [`Shape`] per
//! start tag without building a document tree. [`NodeExtractor`] consumes
//! those shapes:
//!
//! - `circle` elements are node markers. `cx`, `cy` and `r` must be finite
//!   numbers; the `id` attribute (minus one leading `_` escape) names the node.
//! - `path` elements are region borders. Their path data and fill must parse;
//!   nothing else is kept.
//! - everything else is ignored.
#![forbid(unsafe_code)]

mod border;
mod error;
mod extract;
mod shape;

pub use border::{validate_border, Border, Fill};
pub use error::ShapeError;
pub use extract::{
    extract_from_svg, extract_nodes, node_marker, parse_leading_number, unescape_id, Extraction,
    NodeExtractor, NodeMarker, BORDER_SHAPE, ID_ESCAPE, NODE_SHAPE,
};
pub use shape::{Shape, ShapeReader};
