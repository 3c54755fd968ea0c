// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Set of node ids drawn by the vector image.
use rustc_hash::FxHashSet;

/// Node ids recovered from node markers, in first-seen order.
///
/// Authoritative for which graph nodes need data: anything not in here is
/// pruned during reconciliation. Duplicate inserts collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorNodeSet {
    order: Vec<String>,
    members: FxHashSet<String>,
}

impl VectorNodeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    /// Returns `true` if `id` is drawn.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no ids were recovered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates ids in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VectorNodeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for VectorNodeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}
