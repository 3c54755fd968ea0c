// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Failure while reading or interpreting vector shapes.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The markup itself is not well-formed XML.
    #[error("malformed markup: {0}")]
    MalformedMarkup(#[from] xmlparser::Error),
    /// The markup ends inside a start tag or before an element is closed.
    #[error("malformed markup: input ends before <{element}> is closed")]
    UnexpectedEof {
        /// Innermost unfinished element.
        element: String,
    },
    /// A node marker or border carries an attribute that cannot be trusted.
    #[error("element {kind} has a malformed {attribute} attribute: {reason}")]
    MalformedGeometry {
        /// Tag name of the offending element.
        kind: String,
        /// Attribute that failed to parse.
        attribute: &'static str,
        /// Parser detail.
        reason: String,
    },
}

impl ShapeError {
    pub(crate) fn geometry(kind: &str, attribute: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            kind: kind.to_owned(),
            attribute,
            reason: reason.into(),
        }
    }
}
