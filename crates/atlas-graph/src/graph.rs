// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Insertion-ordered in-memory graph store.
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

/// Attribute list attached to a node or link (DOT `key=value` pairs).
pub type Attributes = BTreeMap<String, String>;

/// Link attribute that carries the ordering weight.
pub const WEIGHT_ATTRIBUTE: &str = "weight";

/// Reads the ordering weight from a link's attributes.
///
/// Missing, unparseable or non-finite weights read as `0.0`. Negative zero
/// reads as `0.0` so it ties with zero under a total order.
pub fn weight_of(data: &Attributes) -> f64 {
    data.get(WEIGHT_ATTRIBUTE)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .map_or(0.0, |w| w + 0.0)
}

/// Graph vertex identified by an opaque string id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    data: Attributes,
}

impl Node {
    /// Node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Associated attributes, copied verbatim on merge.
    pub fn data(&self) -> &Attributes {
        &self.data
    }
}

/// Directed link `from -> to` carrying a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    from: String,
    to: String,
    data: Attributes,
    weight: f64,
}

impl Link {
    /// Source node id.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination node id.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Link attributes.
    pub fn data(&self) -> &Attributes {
        &self.data
    }

    /// Ordering weight derived from [`WEIGHT_ATTRIBUTE`].
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns `true` when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone)]
struct NodeSlot {
    node: Node,
    /// Incident link slots in the order they touched this node.
    incident: Vec<usize>,
}

#[derive(Debug, Clone)]
struct LinkSlot {
    link: Link,
    from: usize,
    to: usize,
}

/// Node/link graph keyed by string id.
///
/// Nodes and links iterate in insertion order. Removed entries leave a
/// tombstone so the relative order of survivors never changes; slot indices
/// are never reused.
///
/// Invariant: every link's endpoints exist as nodes in the same graph.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    nodes: Vec<Option<NodeSlot>>,
    node_index: FxHashMap<String, usize>,
    links: Vec<Option<LinkSlot>>,
    link_index: FxHashMap<(usize, usize), usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        Self::with_direction(true)
    }

    /// Creates an empty graph, recording whether its source declared it directed.
    #[must_use]
    pub fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            links: Vec::new(),
            link_index: FxHashMap::default(),
        }
    }

    /// Whether the source description declared a directed graph.
    ///
    /// Links are stored as `from -> to` either way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Number of live links.
    pub fn link_count(&self) -> usize {
        self.link_index.len()
    }

    /// Returns `true` if a node with `id` exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Returns the node with `id`, if present.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.slot(id).map(|slot| &slot.node)
    }

    /// Adds a node, or merges `data` into an existing node's attributes.
    ///
    /// Returns `true` when a new node was created.
    pub fn add_node(&mut self, id: impl Into<String>, data: Attributes) -> bool {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            if let Some(slot) = self.nodes.get_mut(ix).and_then(Option::as_mut) {
                slot.node.data.extend(data);
            }
            return false;
        }
        self.insert_node(id, data);
        true
    }

    fn insert_node(&mut self, id: String, data: Attributes) -> usize {
        let ix = self.nodes.len();
        self.node_index.insert(id.clone(), ix);
        self.nodes.push(Some(NodeSlot {
            node: Node { id, data },
            incident: Vec::new(),
        }));
        ix
    }

    fn ensure_node(&mut self, id: &str) -> usize {
        match self.node_index.get(id) {
            Some(&ix) => ix,
            None => self.insert_node(id.to_owned(), Attributes::new()),
        }
    }

    /// Returns `true` if the directed link `from -> to` exists.
    pub fn has_link(&self, from: &str, to: &str) -> bool {
        self.link_slot_index(from, to).is_some()
    }

    /// Returns the directed link `from -> to`, if present.
    pub fn link(&self, from: &str, to: &str) -> Option<&Link> {
        self.link_slot_index(from, to)
            .and_then(|ix| self.links.get(ix))
            .and_then(Option::as_ref)
            .map(|slot| &slot.link)
    }

    fn link_slot_index(&self, from: &str, to: &str) -> Option<usize> {
        let from = *self.node_index.get(from)?;
        let to = *self.node_index.get(to)?;
        self.link_index.get(&(from, to)).copied()
    }

    /// Adds the directed link `from -> to`, creating missing endpoints with
    /// empty attributes.
    ///
    /// A repeated `(from, to)` pair replaces the existing link's data in place
    /// and keeps its position. Returns `true` when a new link was created.
    pub fn add_link(&mut self, from: &str, to: &str, data: Attributes) -> bool {
        let from_ix = self.ensure_node(from);
        let to_ix = self.ensure_node(to);
        let weight = weight_of(&data);

        if let Some(&existing) = self.link_index.get(&(from_ix, to_ix)) {
            if let Some(slot) = self.links.get_mut(existing).and_then(Option::as_mut) {
                slot.link.data = data;
                slot.link.weight = weight;
            }
            return false;
        }

        let link_ix = self.links.len();
        self.links.push(Some(LinkSlot {
            link: Link {
                from: from.to_owned(),
                to: to.to_owned(),
                data,
                weight,
            },
            from: from_ix,
            to: to_ix,
        }));
        self.link_index.insert((from_ix, to_ix), link_ix);
        self.push_incident(from_ix, link_ix);
        if from_ix != to_ix {
            self.push_incident(to_ix, link_ix);
        }
        true
    }

    fn push_incident(&mut self, node_ix: usize, link_ix: usize) {
        if let Some(slot) = self.nodes.get_mut(node_ix).and_then(Option::as_mut) {
            slot.incident.push(link_ix);
        }
    }

    /// Removes a node and every link touching it.
    ///
    /// Returns `false` if the node was not present.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(node_ix) = self.node_index.remove(id) else {
            return false;
        };
        let Some(removed) = self.nodes.get_mut(node_ix).and_then(Option::take) else {
            debug_assert!(false, "node index referenced an empty slot for {id}");
            return false;
        };

        for link_ix in removed.incident {
            let Some(link) = self.links.get_mut(link_ix).and_then(Option::take) else {
                continue;
            };
            self.link_index.remove(&(link.from, link.to));
            let other = if link.from == node_ix { link.to } else { link.from };
            if other != node_ix {
                if let Some(slot) = self.nodes.get_mut(other).and_then(Option::as_mut) {
                    slot.incident.retain(|&ix| ix != link_ix);
                }
            }
        }
        true
    }

    /// Iterates live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten().map(|slot| &slot.node)
    }

    /// Iterates live nodes with their link count, in insertion order.
    pub fn degrees(&self) -> impl Iterator<Item = (&Node, usize)> {
        self.nodes
            .iter()
            .flatten()
            .map(|slot| (&slot.node, slot.incident.len()))
    }

    /// Iterates live links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().flatten().map(|slot| &slot.link)
    }

    /// Number of distinct links touching `id` in either direction.
    ///
    /// A self-loop counts once. Unknown ids have degree zero.
    pub fn degree(&self, id: &str) -> usize {
        self.slot(id).map_or(0, |slot| slot.incident.len())
    }

    /// Links leaving `id`, in the order they were first attached to the node.
    pub fn outgoing<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Link> + 'a {
        let node_ix = self.node_index.get(id).copied();
        let slot = node_ix.and_then(|ix| self.nodes.get(ix)).and_then(Option::as_ref);
        slot.into_iter().flat_map(move |slot| {
            slot.incident
                .iter()
                .filter_map(move |&ix| self.links.get(ix).and_then(Option::as_ref))
                .filter(move |link| Some(link.from) == node_ix)
                .map(|link| &link.link)
        })
    }

    fn slot(&self, id: &str) -> Option<&NodeSlot> {
        let ix = *self.node_index.get(id)?;
        self.nodes.get(ix).and_then(Option::as_ref)
    }
}

impl PartialEq for Graph {
    /// Graphs are equal when they hold the same nodes and links in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.nodes().eq(other.nodes())
            && self.links().eq(other.links())
    }
}
