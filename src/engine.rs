//! Core A* search engine.
//!
//! This module defines the capability traits a problem domain implements and the
//! search loop that drives them:
//! - `AStar`: Infallible capabilities (heuristic, step cost, neighbors, goal test)
//!   plus the provided `astar` / `astar_with_order` entry points.
//! - `TryAStar`: The same capabilities returning `Result`, for domains whose
//!   functions can fail. Every `AStar` is a `TryAStar` with `Error = Infallible`.
//! - `Path`: A found path together with its cost and the number of expanded nodes.
//! - `PathOrder`: Whether a path is returned start-to-goal or goal-to-start.
//!
//! The engine is single-threaded and keeps no state between calls: every search
//! builds its own [`SearchNodeStore`] and [`OpenSet`] and drops them on return.
use std::convert::Infallible;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::node::SearchNodeStore;
use crate::open_set::OpenSet;

/// Order of the nodes in a returned [`Path`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathOrder {
    /// Start node first, goal node last.
    #[default]
    Forward,
    /// Goal node first, start node last. This is the order in which parent links
    /// are walked, so no reversal is performed.
    Reversed,
}

/// A path found by the engine.
///
/// A path is never empty: it holds both endpoints, which coincide when the start
/// already satisfies the goal test.
#[derive(Clone, Debug, PartialEq)]
pub struct Path<N> {
    nodes: Vec<N>,
    cost: f64,
    expanded: usize,
    order: PathOrder,
}

impl<N> Path<N> {
    /// The nodes of the path in the requested order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Consumes the path and returns its nodes.
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// Total step cost from start to goal (the `g_score` of the goal node).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes expanded before the goal was popped from the open set.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The order the nodes were returned in.
    pub fn order(&self) -> PathOrder {
        self.order
    }

    /// Number of nodes on the path, both endpoints included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first node: the start, or the goal for [`PathOrder::Reversed`].
    pub fn first(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// The last node: the goal, or the start for [`PathOrder::Reversed`].
    pub fn last(&self) -> Option<&N> {
        self.nodes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }
}

impl<N> IntoIterator for Path<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a Path<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Capabilities of a search problem whose functions cannot fail.
///
/// Implement the three required methods (and optionally `is_goal_reached`), then
/// call [`AStar::astar`].
///
/// For the returned path to be optimal the heuristic must never overestimate the
/// remaining cost, and closed nodes are never re-opened, so it should also be
/// consistent: `h(a) <= distance_between(a, b) + h(b)` for every neighbor `b`
/// of `a`. The engine does not check either property.
///
/// # Examples
/// ```
/// use astar_pathfinding::engine::AStar;
///
/// /// Walk along the integers, one step at a time.
/// struct NumberLine;
///
/// impl AStar for NumberLine {
///     type Node = i32;
///
///     fn heuristic_cost_estimate(&self, current: &i32, goal: &i32) -> f64 {
///         (goal - current).abs() as f64
///     }
///
///     fn distance_between(&self, _n1: &i32, _n2: &i32) -> f64 {
///         1.0
///     }
///
///     fn neighbors(&self, node: &i32) -> impl IntoIterator<Item = i32> {
///         [node - 1, node + 1]
///     }
/// }
///
/// let path = NumberLine.astar(0, 3).expect("the number line is connected");
/// assert_eq!(path.nodes(), &[0, 1, 2, 3]);
/// assert_eq!(path.cost(), 3.0);
/// ```
pub trait AStar {
    /// Identity of one position in the search space.
    type Node: Clone + Eq + Hash;

    /// Estimated cost from `current` to `goal`. The second argument is always the goal.
    fn heuristic_cost_estimate(&self, current: &Self::Node, goal: &Self::Node) -> f64;

    /// Real cost of the step from `n1` to `n2`.
    ///
    /// `n2` is always one of the nodes returned by `neighbors(n1)`.
    fn distance_between(&self, n1: &Self::Node, n2: &Self::Node) -> f64;

    /// Nodes reachable from `node` in one step.
    ///
    /// Neighbors are requested lazily, once per expanded node, so the search space
    /// does not need to exist up front and may be unbounded.
    fn neighbors(&self, node: &Self::Node) -> impl IntoIterator<Item = Self::Node>;

    /// Whether `current` counts as the goal. Defaults to `current == goal`.
    fn is_goal_reached(&self, current: &Self::Node, goal: &Self::Node) -> bool {
        current == goal
    }

    /// Finds a cheapest path from `start` to `goal`, start first.
    ///
    /// # Returns
    /// * `Some(Path)` holding both endpoints.
    /// * `None` if the goal cannot be reached from `start`.
    fn astar(&self, start: Self::Node, goal: Self::Node) -> Option<Path<Self::Node>>
    where
        Self: Sized,
    {
        self.astar_with_order(start, goal, PathOrder::Forward)
    }

    /// Same as [`AStar::astar`], with the order of the returned nodes chosen by `order`.
    fn astar_with_order(
        &self,
        start: Self::Node,
        goal: Self::Node,
        order: PathOrder,
    ) -> Option<Path<Self::Node>>
    where
        Self: Sized,
    {
        match search(self, start, &goal, order) {
            Ok(path) => path,
            Err(never) => match never {},
        }
    }
}

/// Capabilities of a search problem whose functions may fail.
///
/// The first error raised by any capability stops the search and is returned
/// as is; the engine never retries or swallows it. Reaching no goal is not an
/// error and is reported as `Ok(None)`.
pub trait TryAStar {
    type Node: Clone + Eq + Hash;
    type Error;

    fn try_heuristic_cost_estimate(
        &self,
        current: &Self::Node,
        goal: &Self::Node,
    ) -> Result<f64, Self::Error>;

    fn try_distance_between(&self, n1: &Self::Node, n2: &Self::Node) -> Result<f64, Self::Error>;

    fn try_neighbors(
        &self,
        node: &Self::Node,
    ) -> Result<impl IntoIterator<Item = Self::Node>, Self::Error>;

    fn try_is_goal_reached(
        &self,
        current: &Self::Node,
        goal: &Self::Node,
    ) -> Result<bool, Self::Error> {
        Ok(current == goal)
    }

    /// Finds a cheapest path from `start` to `goal`, start first.
    fn try_astar(
        &self,
        start: Self::Node,
        goal: Self::Node,
    ) -> Result<Option<Path<Self::Node>>, Self::Error>
    where
        Self: Sized,
    {
        search(self, start, &goal, PathOrder::Forward)
    }

    fn try_astar_with_order(
        &self,
        start: Self::Node,
        goal: Self::Node,
        order: PathOrder,
    ) -> Result<Option<Path<Self::Node>>, Self::Error>
    where
        Self: Sized,
    {
        search(self, start, &goal, order)
    }
}

impl<A: AStar> TryAStar for A {
    type Node = A::Node;
    type Error = Infallible;

    fn try_heuristic_cost_estimate(
        &self,
        current: &Self::Node,
        goal: &Self::Node,
    ) -> Result<f64, Infallible> {
        Ok(self.heuristic_cost_estimate(current, goal))
    }

    fn try_distance_between(&self, n1: &Self::Node, n2: &Self::Node) -> Result<f64, Infallible> {
        Ok(self.distance_between(n1, n2))
    }

    fn try_neighbors(
        &self,
        node: &Self::Node,
    ) -> Result<impl IntoIterator<Item = Self::Node>, Infallible> {
        Ok(self.neighbors(node))
    }

    fn try_is_goal_reached(
        &self,
        current: &Self::Node,
        goal: &Self::Node,
    ) -> Result<bool, Infallible> {
        Ok(self.is_goal_reached(current, goal))
    }
}

/// Runs A* from `start` towards `goal`.
///
/// Ties between open nodes with equal `f_score` are resolved first-in first-out
/// (see [`crate::open_set`]). A neighbor is only relaxed when the new route is
/// strictly cheaper, so a tied alternate parent is never adopted. Closed nodes
/// are never re-opened.
pub fn search<C>(
    capabilities: &C,
    start: C::Node,
    goal: &C::Node,
    order: PathOrder,
) -> Result<Option<Path<C::Node>>, C::Error>
where
    C: TryAStar,
{
    if capabilities.try_is_goal_reached(&start, goal)? {
        debug!("start node already satisfies the goal");
        return Ok(Some(Path {
            nodes: vec![start],
            cost: 0.0,
            expanded: 0,
            order,
        }));
    }

    let mut store = SearchNodeStore::new();
    let mut open_set = OpenSet::new();

    let start_estimate = capabilities.try_heuristic_cost_estimate(&start, goal)?;
    let start_id = store.insert_start(start, start_estimate);
    open_set.push(&mut store, start_id);

    let mut expanded = 0;

    while let Some(current) = open_set.pop_min(&mut store) {
        let current_data = store[current].data.clone();

        if capabilities.try_is_goal_reached(&current_data, goal)? {
            let cost = store[current].g_score;
            debug!(
                cost,
                expanded,
                discovered = store.len(),
                "path found"
            );
            return Ok(Some(Path {
                nodes: store.path_to(current, order),
                cost,
                expanded,
                order,
            }));
        }

        store[current].closed = true;
        expanded += 1;
        let current_g = store[current].g_score;
        trace!(
            node = current.index(),
            g_score = current_g,
            f_score = store[current].f_score,
            "expanding"
        );

        for neighbor_data in capabilities.try_neighbors(&current_data)? {
            let neighbor = store.get_or_create(neighbor_data);
            if store[neighbor].closed {
                continue;
            }

            let tentative_g = current_g
                + capabilities.try_distance_between(&current_data, &store[neighbor].data)?;
            if tentative_g >= store[neighbor].g_score {
                continue;
            }

            if store[neighbor].in_open_set {
                debug_assert!(open_set.contains(neighbor), "open flag out of sync");
                open_set.remove(&mut store, neighbor);
            }

            let estimate = capabilities.try_heuristic_cost_estimate(&store[neighbor].data, goal)?;
            store.relax(neighbor, current, tentative_g, tentative_g + estimate);
            open_set.push(&mut store, neighbor);
        }
    }

    debug!(expanded, discovered = store.len(), "open set exhausted without reaching the goal");
    Ok(None)
}
