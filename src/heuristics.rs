use crate::error::ParseError;
use crate::grid::Point;
use std::fmt;
use std::str::FromStr;

/// Calculates the Manhattan (taxicab) distance between two points.
///
/// Exact on an empty 4-connected grid with unit steps, and therefore admissible
/// there. It overestimates on 8-connected grids.
///
/// # Examples
/// ```
/// use astar_pathfinding::grid::Point;
/// use astar_pathfinding::heuristics::manhattan_distance;
/// assert_eq!(manhattan_distance(Point::new(0, 0), Point::new(3, -4)), 7.0);
/// ```
pub fn manhattan_distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).abs() + (b.y - a.y).abs()) as f64
}

/// Calculates the straight-line distance between two points.
///
/// Admissible for both 4- and 8-connected grids with unit orthogonal steps and
/// `√2` diagonal steps.
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x) as f64).hypot((b.y - a.y) as f64)
}

/// Calculates the octile distance between two points.
///
/// This is the exact cost of crossing an empty 8-connected grid where orthogonal
/// steps cost `1` and diagonal steps cost `√2`: move diagonally while both axes
/// still differ, then straight.
///
/// # Examples
/// ```
/// use astar_pathfinding::grid::Point;
/// use astar_pathfinding::heuristics::octile_distance;
/// let d = octile_distance(Point::new(0, 0), Point::new(4, 4));
/// assert!((d - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
pub fn octile_distance(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x).abs() as f64;
    let dy = (b.y - a.y).abs() as f64;
    let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
    short * std::f64::consts::SQRT_2 + (long - short)
}

/// Calculates the Chebyshev distance (number of king moves) between two points.
pub fn chebyshev_distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).abs().max((b.y - a.y).abs()) as f64
}

/// The distance estimates available to grid searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Always `0.0`: the search degrades to uniform-cost search.
    Zero,
    Manhattan,
    /// Straight-line distance; admissible for every grid connectivity.
    #[default]
    Euclidean,
    Octile,
    Chebyshev,
}

impl Heuristic {
    /// Every heuristic, in the order they are listed on the command line.
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Zero,
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Octile,
        Heuristic::Chebyshev,
    ];

    /// Estimates the remaining cost from `current` to `goal`.
    pub fn estimate(self, current: Point, goal: Point) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => manhattan_distance(current, goal),
            Heuristic::Euclidean => euclidean_distance(current, goal),
            Heuristic::Octile => octile_distance(current, goal),
            Heuristic::Chebyshev => chebyshev_distance(current, goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Octile => "octile",
            Heuristic::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownHeuristic(s.to_string()))
    }
}
