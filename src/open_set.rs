//! The A* open set: discovered nodes waiting to be expanded, ordered by `f_score`.
//!
//! A binary heap cannot change the priority of a member it already holds, and A*
//! lowers the `f_score` of open nodes whenever it finds a cheaper route to them.
//! The open set is therefore an ordered tree keyed by `(f_score, insertion
//! sequence)` plus a side table from node to key, which makes removing an
//! arbitrary member logarithmic.
//!
//! # Tie-breaking
//! Members with equal `f_score` leave the set in insertion order (first in, first
//! out). A node that is removed and pushed again counts as newly inserted. `NaN`
//! scores sort after every number.
use std::collections::{BTreeSet, HashMap};

use ordered_float::OrderedFloat;

use crate::node::{NodeId, SearchNodeStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    f_score: OrderedFloat<f64>,
    sequence: u64,
}

/// Priority structure over nodes owned by a [`SearchNodeStore`].
///
/// The open set never owns nodes; it orders their ids and keeps each node's
/// `in_open_set` flag in sync with membership.
///
/// # Examples
/// ```
/// use astar_pathfinding::node::SearchNodeStore;
/// use astar_pathfinding::open_set::OpenSet;
///
/// let mut store = SearchNodeStore::new();
/// let mut open = OpenSet::new();
/// let a = store.insert_start('a', 2.0);
/// let b = store.insert_start('b', 1.0);
/// open.push(&mut store, a);
/// open.push(&mut store, b);
///
/// assert_eq!(open.pop_min(&mut store), Some(b));
/// assert!(!store[b].in_open_set);
/// assert_eq!(open.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct OpenSet {
    ordered: BTreeSet<(OpenKey, NodeId)>,
    keys: HashMap<NodeId, OpenKey>,
    next_sequence: u64,
}

impl OpenSet {
    /// Creates an empty open set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` using its current `f_score` and marks it as open.
    ///
    /// Pushing a node that is already a member is a logic error; the engine always
    /// removes a member before changing its score and pushing it again.
    pub fn push<N>(&mut self, store: &mut SearchNodeStore<N>, id: NodeId) {
        let node = &mut store[id];
        debug_assert!(!node.in_open_set, "node pushed twice into the open set");
        node.in_open_set = true;

        let key = OpenKey {
            f_score: OrderedFloat(node.f_score),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.ordered.insert((key, id));
        self.keys.insert(id, key);
    }

    /// Removes and returns the member with the smallest `f_score`, marking it as no longer open.
    ///
    /// # Returns
    /// `None` if the open set is empty.
    pub fn pop_min<N>(&mut self, store: &mut SearchNodeStore<N>) -> Option<NodeId> {
        let (_, id) = self.ordered.pop_first()?;
        self.keys.remove(&id);
        store[id].in_open_set = false;
        Some(id)
    }

    /// Removes a specific member so its score can be changed.
    ///
    /// # Returns
    /// `true` if `id` was a member.
    pub fn remove<N>(&mut self, store: &mut SearchNodeStore<N>, id: NodeId) -> bool {
        match self.keys.remove(&id) {
            Some(key) => {
                self.ordered.remove(&(key, id));
                store[id].in_open_set = false;
                true
            }
            None => false,
        }
    }

    /// Whether `id` is currently a member.
    pub fn contains(&self, id: NodeId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }
}
