// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fatal build failures.

use std::path::PathBuf;

use atlas_codec::EncodeError;
use atlas_dot::DotError;
use atlas_svg::ShapeError;
use thiserror::Error;

/// Any condition that aborts a build. Nothing is written once one occurs.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required input cannot be read.
    #[error("cannot read {}: {source}", .path.display())]
    InputNotFound {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A graph description does not parse.
    #[error("graph {} does not parse: {source}", .path.display())]
    MalformedGraphText {
        /// Graph path.
        path: PathBuf,
        /// Parser detail.
        source: DotError,
    },
    /// A node marker or border in the map cannot be trusted.
    #[error("map {}: {source}", .path.display())]
    MalformedGeometry {
        /// Map path.
        path: PathBuf,
        /// Shape detail.
        source: ShapeError,
    },
    /// The ranked graph cannot be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// An artifact cannot be written.
    #[error("cannot write {}: {source}", .path.display())]
    Output {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
