// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node/link graph model shared by the atlas map builder.
//!
//! A [`Graph`] is threaded by value through the build stages:
//!
//! 1. [`merge`] folds augmentation graphs into the primary graph (additive only).
//! 2. [`reconcile`] prunes every node the vector image does not draw.
//! 3. [`rank`] orders the survivors by connectivity into a [`RankTable`].
//!
//! Encoding the ranked graph lives in `atlas-codec`.
#![forbid(unsafe_code)]

mod graph;
mod merge;
mod rank;
mod reconcile;
mod vector_set;

pub use graph::{weight_of, Attributes, Graph, Link, Node, WEIGHT_ATTRIBUTE};
pub use merge::{merge, merge_all, merge_into, MergeStats};
pub use rank::{rank, RankTable};
pub use reconcile::{reconcile, ReconcileWarning, Reconciliation};
pub use vector_set::VectorNodeSet;
