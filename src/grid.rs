//! Bounded 2-D grids of free and blocked cells, and an [`AStar`] problem over them.
//!
//! Cells are addressed by [`Point`]s with `x` growing to the right and `y` growing
//! downwards, matching the row/column order of ASCII art. Obstacles may be added
//! and removed between searches, which is how moving obstacles (other players,
//! vehicles, ...) are modelled: every search sees the grid as it is at call time.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

use crate::engine::{AStar, Path};
use crate::error::{GridError, ParseError};
use crate::heuristics::Heuristic;

/// Integer coordinates of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// The point moved by `(dx, dy)`.
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Whether `other` differs from `self` on both axes.
    pub fn is_diagonal_to(self, other: Point) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Parses `"x,y"`, with optional surrounding parentheses and whitespace.
impl FromStr for Point {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPoint(s.to_string());
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Point::new(x, y))
    }
}

/// Which cells count as adjacent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// North, south, east and west.
    Four,
    /// The four orthogonal cells plus the four diagonal ones.
    #[default]
    Eight,
}

impl Connectivity {
    const ORTHOGONAL: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    const DIAGONAL: [(i64, i64); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

    /// Offsets to the adjacent cells, orthogonal ones first.
    pub fn offsets(self) -> impl Iterator<Item = (i64, i64)> {
        let diagonal: &'static [(i64, i64)] = match self {
            Connectivity::Four => &[],
            Connectivity::Eight => &Self::DIAGONAL,
        };
        Self::ORTHOGONAL.into_iter().chain(diagonal.iter().copied())
    }
}

impl FromStr for Connectivity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "four" => Ok(Connectivity::Four),
            "8" | "eight" => Ok(Connectivity::Eight),
            _ => Err(ParseError::UnknownConnectivity(s.to_string())),
        }
    }
}

/// A rectangular grid of free and blocked cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl Grid {
    /// Creates a grid of `width` x `height` free cells.
    ///
    /// # Examples
    /// ```
    /// use astar_pathfinding::grid::{Grid, Point};
    /// let mut grid = Grid::new(3, 2);
    /// assert!(!grid.is_blocked(Point::new(2, 1)));
    /// grid.block(Point::new(2, 1));
    /// assert!(grid.is_blocked(Point::new(2, 1)));
    /// // Outside the grid counts as blocked.
    /// assert!(grid.is_blocked(Point::new(3, 0)));
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            blocked: vec![false; width * height],
        }
    }

    /// Creates a grid whose cells are blocked independently with probability `density`.
    ///
    /// The same seed always yields the same grid. A `density` outside `0.0..=1.0`
    /// is clamped, and a non-finite one (such as `NaN`) gives an empty grid.
    pub fn random(width: usize, height: usize, density: f64, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let density = if density.is_finite() {
            density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Grid {
            width,
            height,
            blocked: (0..width * height).map(|_| rng.gen_bool(density)).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    /// Whether `p` is blocked. Points outside the grid are blocked.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.index(p).map_or(true, |i| self.blocked[i])
    }

    /// Blocks or frees `p`.
    ///
    /// # Returns
    /// `false` if `p` lies outside the grid, in which case nothing changes.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> bool {
        match self.index(p) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    pub fn block(&mut self, p: Point) -> bool {
        self.set_blocked(p, true)
    }

    pub fn unblock(&mut self, p: Point) -> bool {
        self.set_blocked(p, false)
    }

    /// Free cells adjacent to `p`.
    pub fn neighbors(&self, p: Point, connectivity: Connectivity) -> impl Iterator<Item = Point> + '_ {
        connectivity
            .offsets()
            .map(move |(dx, dy)| p.offset(dx, dy))
            .filter(move |&n| !self.is_blocked(n))
    }

    /// Checks that `p` is a free cell of this grid.
    pub fn check_free(&self, p: Point) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        if self.is_blocked(p) {
            return Err(GridError::Blocked { x: p.x, y: p.y });
        }
        Ok(())
    }

    /// Renders the grid as rows of `#` (blocked) and `.` (free).
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height as i64)
            .map(|y| {
                (0..self.width as i64)
                    .map(|x| if self.is_blocked(Point::new(x, y)) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Shortest paths between free cells of a [`Grid`].
///
/// Orthogonal steps cost `1`, diagonal steps cost `√2`. Diagonal steps only
/// require the destination cell to be free.
///
/// # Examples
/// ```
/// use astar_pathfinding::grid::{Connectivity, Grid, GridPathfinder, Point};
/// use astar_pathfinding::heuristics::Heuristic;
///
/// let grid = Grid::new(5, 5);
/// let finder = GridPathfinder::new(&grid, Connectivity::Four, Heuristic::Manhattan);
/// let path = finder.find(Point::new(0, 0), Point::new(4, 2)).unwrap().unwrap();
/// assert_eq!(path.cost(), 6.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GridPathfinder<'a> {
    grid: &'a Grid,
    connectivity: Connectivity,
    heuristic: Heuristic,
}

impl<'a> GridPathfinder<'a> {
    pub fn new(grid: &'a Grid, connectivity: Connectivity, heuristic: Heuristic) -> Self {
        GridPathfinder {
            grid,
            connectivity,
            heuristic,
        }
    }

    /// Validates both endpoints, then searches.
    ///
    /// # Returns
    /// * `Ok(Some(path))` with the cheapest path.
    /// * `Ok(None)` if `goal` cannot be reached.
    /// * `Err(GridError)` if either endpoint is outside the grid or blocked.
    pub fn find(&self, start: Point, goal: Point) -> Result<Option<Path<Point>>, GridError> {
        self.grid.check_free(start)?;
        self.grid.check_free(goal)?;
        Ok(self.astar(start, goal))
    }
}

impl AStar for GridPathfinder<'_> {
    type Node = Point;

    fn heuristic_cost_estimate(&self, current: &Point, goal: &Point) -> f64 {
        self.heuristic.estimate(*current, *goal)
    }

    fn distance_between(&self, n1: &Point, n2: &Point) -> f64 {
        if n1.is_diagonal_to(*n2) {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }

    fn neighbors(&self, node: &Point) -> impl IntoIterator<Item = Point> {
        self.grid.neighbors(*node, self.connectivity)
    }
}
