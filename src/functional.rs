//! Closure-based entry points for searches that do not warrant a named type.
//!
//! [`FindPath`] binds plain closures to the [`AStar`] capabilities, [`TryFindPath`]
//! does the same for closures returning `Result`. Both fall back to a zero
//! heuristic (uniform-cost search), unit step costs, equality as the goal test and
//! start-to-goal ordering for whatever is not supplied.
use std::hash::Hash;
use std::marker::PhantomData;

use crate::engine::{search, AStar, Path, PathOrder, TryAStar};

/// Signature of the default heuristic, step cost and goal test of [`FindPath`].
pub type NodePairFn<N, R> = fn(&N, &N) -> R;

fn zero_estimate<N>(_: &N, _: &N) -> f64 {
    0.0
}

fn unit_distance<N>(_: &N, _: &N) -> f64 {
    1.0
}

fn same_node<N: PartialEq>(current: &N, goal: &N) -> bool {
    current == goal
}

/// One-shot search problem assembled from closures.
///
/// # Examples
/// ```
/// use astar_pathfinding::functional::FindPath;
///
/// // Integers reachable by doubling or adding one.
/// let path = FindPath::new(|n: &u32| [n + 1, n * 2])
///     .search(1, 10)
///     .expect("10 is reachable from 1");
///
/// assert_eq!(path.nodes(), &[1, 2, 4, 5, 10]);
/// assert_eq!(path.cost(), 4.0);
/// ```
pub struct FindPath<N, Nb, H = NodePairFn<N, f64>, D = NodePairFn<N, f64>, G = NodePairFn<N, bool>>
{
    neighbors: Nb,
    heuristic: H,
    distance: D,
    goal_reached: G,
    order: PathOrder,
    _node: PhantomData<fn(&N)>,
}

impl<N, Nb, I> FindPath<N, Nb>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> I,
    I: IntoIterator<Item = N>,
{
    /// Starts a search problem from its neighbor function alone.
    pub fn new(neighbors: Nb) -> Self {
        FindPath {
            neighbors,
            heuristic: zero_estimate::<N>,
            distance: unit_distance::<N>,
            goal_reached: same_node::<N>,
            order: PathOrder::Forward,
            _node: PhantomData,
        }
    }
}

impl<N, Nb, H, D, G> FindPath<N, Nb, H, D, G> {
    /// Replaces the heuristic. `heuristic(current, goal)` should never overestimate.
    pub fn heuristic<H2>(self, heuristic: H2) -> FindPath<N, Nb, H2, D, G>
    where
        H2: Fn(&N, &N) -> f64,
    {
        FindPath {
            neighbors: self.neighbors,
            heuristic,
            distance: self.distance,
            goal_reached: self.goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    /// Replaces the step cost between two adjacent nodes.
    pub fn distance<D2>(self, distance: D2) -> FindPath<N, Nb, H, D2, G>
    where
        D2: Fn(&N, &N) -> f64,
    {
        FindPath {
            neighbors: self.neighbors,
            heuristic: self.heuristic,
            distance,
            goal_reached: self.goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    /// Replaces the goal test.
    pub fn goal_reached<G2>(self, goal_reached: G2) -> FindPath<N, Nb, H, D, G2>
    where
        G2: Fn(&N, &N) -> bool,
    {
        FindPath {
            neighbors: self.neighbors,
            heuristic: self.heuristic,
            distance: self.distance,
            goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    pub fn order(mut self, order: PathOrder) -> Self {
        self.order = order;
        self
    }
}

impl<N, Nb, I, H, D, G> FindPath<N, Nb, H, D, G>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> I,
    I: IntoIterator<Item = N>,
    H: Fn(&N, &N) -> f64,
    D: Fn(&N, &N) -> f64,
    G: Fn(&N, &N) -> bool,
{
    /// Runs the search. Returns `None` when `goal` is unreachable.
    pub fn search(&self, start: N, goal: N) -> Option<Path<N>> {
        self.astar_with_order(start, goal, self.order)
    }
}

impl<N, Nb, I, H, D, G> AStar for FindPath<N, Nb, H, D, G>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> I,
    I: IntoIterator<Item = N>,
    H: Fn(&N, &N) -> f64,
    D: Fn(&N, &N) -> f64,
    G: Fn(&N, &N) -> bool,
{
    type Node = N;

    fn heuristic_cost_estimate(&self, current: &N, goal: &N) -> f64 {
        (self.heuristic)(current, goal)
    }

    fn distance_between(&self, n1: &N, n2: &N) -> f64 {
        (self.distance)(n1, n2)
    }

    fn neighbors(&self, node: &N) -> impl IntoIterator<Item = N> {
        (self.neighbors)(node)
    }

    fn is_goal_reached(&self, current: &N, goal: &N) -> bool {
        (self.goal_reached)(current, goal)
    }
}

/// Shortest path by number of steps from `start` to `goal`.
///
/// # Examples
/// ```
/// use astar_pathfinding::functional::find_path;
///
/// let path = find_path(0i32, 3, |n: &i32| vec![n - 1, n + 1]).unwrap();
/// assert_eq!(path.into_nodes(), vec![0, 1, 2, 3]);
/// ```
pub fn find_path<N, Nb, I>(start: N, goal: N, neighbors: Nb) -> Option<Path<N>>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> I,
    I: IntoIterator<Item = N>,
{
    FindPath::new(neighbors).search(start, goal)
}

fn ok_zero_estimate<N, E>(_: &N, _: &N) -> Result<f64, E> {
    Ok(0.0)
}

fn ok_unit_distance<N, E>(_: &N, _: &N) -> Result<f64, E> {
    Ok(1.0)
}

fn ok_same_node<N: PartialEq, E>(current: &N, goal: &N) -> Result<bool, E> {
    Ok(current == goal)
}

/// Fallible twin of [`FindPath`]: every closure returns `Result<_, E>` and the first
/// error ends the search.
///
/// # Examples
/// ```
/// use astar_pathfinding::functional::TryFindPath;
///
/// let finder = TryFindPath::new(|n: &u8| n.checked_add(1).map(|next| [next]).ok_or("overflow"));
///
/// assert_eq!(finder.search(250, 252).unwrap().map(|p| p.len()), Some(3));
/// assert_eq!(finder.search(250, 0).unwrap_err(), "overflow");
/// ```
pub struct TryFindPath<
    N,
    E,
    Nb,
    H = NodePairFn<N, Result<f64, E>>,
    D = NodePairFn<N, Result<f64, E>>,
    G = NodePairFn<N, Result<bool, E>>,
> {
    neighbors: Nb,
    heuristic: H,
    distance: D,
    goal_reached: G,
    order: PathOrder,
    _node: PhantomData<fn(&N) -> E>,
}

impl<N, E, Nb, I> TryFindPath<N, E, Nb>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> Result<I, E>,
    I: IntoIterator<Item = N>,
{
    pub fn new(neighbors: Nb) -> Self {
        TryFindPath {
            neighbors,
            heuristic: ok_zero_estimate::<N, E>,
            distance: ok_unit_distance::<N, E>,
            goal_reached: ok_same_node::<N, E>,
            order: PathOrder::Forward,
            _node: PhantomData,
        }
    }
}

impl<N, E, Nb, H, D, G> TryFindPath<N, E, Nb, H, D, G> {
    pub fn heuristic<H2>(self, heuristic: H2) -> TryFindPath<N, E, Nb, H2, D, G>
    where
        H2: Fn(&N, &N) -> Result<f64, E>,
    {
        TryFindPath {
            neighbors: self.neighbors,
            heuristic,
            distance: self.distance,
            goal_reached: self.goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    pub fn distance<D2>(self, distance: D2) -> TryFindPath<N, E, Nb, H, D2, G>
    where
        D2: Fn(&N, &N) -> Result<f64, E>,
    {
        TryFindPath {
            neighbors: self.neighbors,
            heuristic: self.heuristic,
            distance,
            goal_reached: self.goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    pub fn goal_reached<G2>(self, goal_reached: G2) -> TryFindPath<N, E, Nb, H, D, G2>
    where
        G2: Fn(&N, &N) -> Result<bool, E>,
    {
        TryFindPath {
            neighbors: self.neighbors,
            heuristic: self.heuristic,
            distance: self.distance,
            goal_reached,
            order: self.order,
            _node: PhantomData,
        }
    }

    pub fn order(mut self, order: PathOrder) -> Self {
        self.order = order;
        self
    }
}

impl<N, E, Nb, I, H, D, G> TryFindPath<N, E, Nb, H, D, G>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> Result<I, E>,
    I: IntoIterator<Item = N>,
    H: Fn(&N, &N) -> Result<f64, E>,
    D: Fn(&N, &N) -> Result<f64, E>,
    G: Fn(&N, &N) -> Result<bool, E>,
{
    /// Runs the search. `Ok(None)` means the goal is unreachable.
    pub fn search(&self, start: N, goal: N) -> Result<Option<Path<N>>, E> {
        search(self, start, &goal, self.order)
    }
}

impl<N, E, Nb, I, H, D, G> TryAStar for TryFindPath<N, E, Nb, H, D, G>
where
    N: Clone + Eq + Hash,
    Nb: Fn(&N) -> Result<I, E>,
    I: IntoIterator<Item = N>,
    H: Fn(&N, &N) -> Result<f64, E>,
    D: Fn(&N, &N) -> Result<f64, E>,
    G: Fn(&N, &N) -> Result<bool, E>,
{
    type Node = N;
    type Error = E;

    fn try_heuristic_cost_estimate(&self, current: &N, goal: &N) -> Result<f64, E> {
        (self.heuristic)(current, goal)
    }

    fn try_distance_between(&self, n1: &N, n2: &N) -> Result<f64, E> {
        (self.distance)(n1, n2)
    }

    fn try_neighbors(&self, node: &N) -> Result<impl IntoIterator<Item = N>, E> {
        (self.neighbors)(node)
    }

    fn try_is_goal_reached(&self, current: &N, goal: &N) -> Result<bool, E> {
        (self.goal_reached)(current, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn grid_neighbors(size: i32) -> impl Fn(&(i32, i32)) -> Vec<(i32, i32)> {
        move |&(x, y)| {
            [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
                .into_iter()
                .filter(|&(nx, ny)| (0..size).contains(&nx) && (0..size).contains(&ny))
                .collect()
        }
    }

    #[test]
    fn test_defaults_give_uniform_cost_search() {
        let path = FindPath::new(grid_neighbors(5)).search((0, 0), (4, 3)).unwrap();
        assert_eq!(path.cost(), 7.0);
        assert_eq!(path.len(), 8);
        assert_eq!(path.order(), PathOrder::Forward);
    }

    #[test]
    fn test_builder_overrides() {
        let finder = FindPath::new(grid_neighbors(5))
            .heuristic(|a: &(i32, i32), b: &(i32, i32)| ((b.0 - a.0).abs() + (b.1 - a.1).abs()) as f64)
            .distance(|_: &(i32, i32), _: &(i32, i32)| 2.0)
            .order(PathOrder::Reversed);

        let path = finder.search((0, 0), (2, 2)).unwrap();
        assert_eq!(path.cost(), 8.0);
        assert_eq!(path.first(), Some(&(2, 2)));
        assert_eq!(path.last(), Some(&(0, 0)));
    }

    #[test]
    fn test_heuristic_reduces_expansions() {
        let blind = FindPath::new(grid_neighbors(20)).search((0, 0), (19, 0)).unwrap();
        let informed = FindPath::new(grid_neighbors(20))
            .heuristic(|a: &(i32, i32), b: &(i32, i32)| ((b.0 - a.0).abs() + (b.1 - a.1).abs()) as f64)
            .search((0, 0), (19, 0))
            .unwrap();

        assert_eq!(blind.cost(), informed.cost());
        assert!(informed.expanded() < blind.expanded());
    }

    #[test]
    fn test_regional_goal() {
        let path = FindPath::new(grid_neighbors(10))
            .goal_reached(|current: &(i32, i32), _: &(i32, i32)| current.0 >= 3)
            .search((0, 5), (9, 9))
            .unwrap();
        assert_eq!(path.last(), Some(&(3, 5)));
        assert_eq!(path.cost(), 3.0);
    }

    #[test]
    fn test_trivial_search_skips_neighbors() {
        let calls = Cell::new(0);
        let path = find_path(7, 7, |n: &i32| {
            calls.set(calls.get() + 1);
            [n + 1]
        })
        .unwrap();
        assert_eq!(path.nodes(), &[7]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unreachable_goal() {
        assert!(find_path((0, 0), (9, 9), grid_neighbors(3)).is_none());
    }

    #[test]
    fn test_try_find_path_propagates_errors() {
        #[derive(Debug, PartialEq)]
        enum Failure {
            Heuristic,
        }

        let finder = TryFindPath::new(|n: &i32| Ok::<_, Failure>([n + 1]))
            .heuristic(|current: &i32, _: &i32| {
                if *current > 2 {
                    Err(Failure::Heuristic)
                } else {
                    Ok(0.0)
                }
            });

        assert_eq!(finder.search(0, 2).unwrap().map(|p| p.into_nodes()), Some(vec![0, 1, 2]));
        assert_eq!(finder.search(0, 5), Err(Failure::Heuristic));
    }
}
