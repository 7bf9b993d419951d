//! Per-node search bookkeeping.
//!
//! This module defines:
//! - `NodeId`: A stable index of a search node inside one `SearchNodeStore`.
//! - `SearchNode`: The metadata A* keeps for one problem-domain node (best known
//!   cost from the start, estimated total cost, open/closed flags and the parent link).
//! - `SearchNodeStore`: Owns every `SearchNode` created during one search and maps
//!   node identities to their `NodeId`, creating entries lazily on first reference.
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::{Index, IndexMut};

use crate::engine::PathOrder;

/// Index of a [`SearchNode`] inside the [`SearchNodeStore`] that created it.
///
/// Ids are only meaningful for the store that handed them out. Parent links and
/// the open set refer to nodes through these ids, so no search node ever owns
/// another one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in its store.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Search metadata for one node identity.
///
/// A fresh node is "undiscovered": both scores are `+inf`, it is neither open
/// nor closed and it has no parent. The start node is the only node with a
/// `g_score` of `0.0` and no parent.
#[derive(Clone, Debug)]
pub struct SearchNode<N> {
    /// The problem-domain identity of the node.
    pub data: N,
    /// Best known cost from the start node.
    pub g_score: f64,
    /// `g_score` plus the heuristic estimate to the goal. Orders the open set.
    pub f_score: f64,
    /// Set once the node has been expanded. A closed node is never relaxed again.
    pub closed: bool,
    /// Whether the node currently sits in the open set.
    pub in_open_set: bool,
    /// Parent on the best known route from the start.
    pub came_from: Option<NodeId>,
}

impl<N> SearchNode<N> {
    /// Creates an undiscovered node for `data`.
    pub fn new(data: N) -> Self {
        SearchNode {
            data,
            g_score: f64::INFINITY,
            f_score: f64::INFINITY,
            closed: false,
            in_open_set: false,
            came_from: None,
        }
    }
}

/// Owns every [`SearchNode`] referenced during a single search.
///
/// Exactly one node exists per distinct identity. Entries are never removed; the
/// whole store is dropped when the search returns.
///
/// # Examples
/// ```
/// use astar_pathfinding::node::SearchNodeStore;
///
/// let mut store = SearchNodeStore::new();
/// let a = store.get_or_create("a");
/// let again = store.get_or_create("a");
/// assert_eq!(a, again);
/// assert_eq!(store.len(), 1);
/// assert!(store[a].g_score.is_infinite());
/// ```
#[derive(Debug)]
pub struct SearchNodeStore<N> {
    nodes: Vec<SearchNode<N>>,
    ids: HashMap<N, NodeId>,
}

impl<N> Default for SearchNodeStore<N> {
    fn default() -> Self {
        SearchNodeStore {
            nodes: Vec::new(),
            ids: HashMap::new(),
        }
    }
}

impl<N> SearchNodeStore<N>
where
    N: Clone + Eq + Hash,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the node for `data`, creating an undiscovered node on first access.
    ///
    /// # Arguments
    /// * `data`: The node identity. It is moved into the store when the node is new.
    ///
    /// # Returns
    /// The `NodeId` of the one search node that exists for this identity.
    pub fn get_or_create(&mut self, data: N) -> NodeId {
        if let Some(&id) = self.ids.get(&data) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.ids.insert(data.clone(), id);
        self.nodes.push(SearchNode::new(data));
        id
    }

    /// Creates (or fetches) the start node and gives it a `g_score` of `0.0`.
    ///
    /// # Arguments
    /// * `data`: Identity of the start node.
    /// * `heuristic`: Estimated cost from the start node to the goal, used as its `f_score`.
    pub fn insert_start(&mut self, data: N, heuristic: f64) -> NodeId {
        let id = self.get_or_create(data);
        let node = &mut self.nodes[id.0];
        node.g_score = 0.0;
        node.f_score = heuristic;
        node.came_from = None;
        id
    }

    /// Records a cheaper route to `id` through `parent`.
    ///
    /// The caller has already checked that `g_score` beats the node's current
    /// `g_score` and that the node is not closed, and has taken it out of the open
    /// set if it was there.
    ///
    /// # Panics
    /// In debug builds, panics if the relaxation would raise the node's `g_score`
    /// or touch a closed node.
    pub fn relax(&mut self, id: NodeId, parent: NodeId, g_score: f64, f_score: f64) {
        let node = &mut self.nodes[id.0];
        debug_assert!(
            g_score < node.g_score,
            "g_score may only decrease: {} -> {}",
            node.g_score,
            g_score
        );
        debug_assert!(!node.closed, "closed nodes are never relaxed");
        node.came_from = Some(parent);
        node.g_score = g_score;
        node.f_score = f_score;
    }

    /// Walks parent links from `last` back to the node without a parent.
    ///
    /// # Returns
    /// The identities along the way, start first for `PathOrder::Forward` or
    /// `last` first for `PathOrder::Reversed`.
    pub fn path_to(&self, last: NodeId, order: PathOrder) -> Vec<N> {
        let mut path = Vec::new();
        let mut current = Some(last);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            path.push(node.data.clone());
            current = node.came_from;
        }
        if order == PathOrder::Forward {
            path.reverse();
        }
        path
    }

    /// Number of distinct nodes referenced so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N> Index<NodeId> for SearchNodeStore<N> {
    type Output = SearchNode<N>;

    fn index(&self, id: NodeId) -> &SearchNode<N> {
        &self.nodes[id.0]
    }
}

impl<N> IndexMut<NodeId> for SearchNodeStore<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode<N> {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_lazy_and_unique() {
        let mut store = SearchNodeStore::new();
        assert!(store.is_empty());

        let a = store.get_or_create((0, 0));
        let b = store.get_or_create((0, 1));
        let a_again = store.get_or_create((0, 0));

        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store[b].data, (0, 1));
    }

    #[test]
    fn test_new_node_is_undiscovered() {
        let mut store = SearchNodeStore::new();
        let id = store.get_or_create('x');
        let node = &store[id];
        assert_eq!(node.data, 'x');
        assert_eq!(node.g_score, f64::INFINITY);
        assert_eq!(node.f_score, f64::INFINITY);
        assert!(!node.closed);
        assert!(!node.in_open_set);
        assert!(node.came_from.is_none());
    }

    #[test]
    fn test_insert_start() {
        let mut store = SearchNodeStore::new();
        let start = store.insert_start("s", 3.5);
        assert_eq!(store[start].g_score, 0.0);
        assert_eq!(store[start].f_score, 3.5);
        assert!(store[start].came_from.is_none());
    }

    #[test]
    fn test_relax_and_path_reconstruction() {
        let mut store = SearchNodeStore::new();
        let s = store.insert_start(1, 0.0);
        let m = store.get_or_create(2);
        let g = store.get_or_create(3);

        store.relax(m, s, 1.0, 1.0);
        store.relax(g, m, 2.0, 2.0);

        assert_eq!(store.path_to(g, PathOrder::Forward), vec![1, 2, 3]);
        assert_eq!(store.path_to(g, PathOrder::Reversed), vec![3, 2, 1]);
        assert_eq!(store.path_to(s, PathOrder::Forward), vec![1]);
    }

    #[test]
    fn test_relax_keeps_g_monotonic() {
        let mut store = SearchNodeStore::new();
        let s = store.insert_start("s", 0.0);
        let other = store.get_or_create("t");
        let n = store.get_or_create("n");

        store.relax(n, s, 5.0, 6.0);
        store.relax(n, other, 4.0, 5.0);
        assert_eq!(store[n].g_score, 4.0);
        assert_eq!(store[n].came_from, Some(other));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "g_score may only decrease")]
    fn test_relax_rejects_increase() {
        let mut store = SearchNodeStore::new();
        let s = store.insert_start("s", 0.0);
        let n = store.get_or_create("n");
        store.relax(n, s, 2.0, 2.0);
        store.relax(n, s, 3.0, 3.0);
    }
}
