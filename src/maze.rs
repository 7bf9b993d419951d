//! ASCII mazes and a 4-connected solver for them.
//!
//! A maze of `w` x `h` cells is drawn with `+--` corner/wall segments and `|  `
//! cell rows, giving `3w + 1` columns and `2h + 1` rows of text. Every character
//! that is a space is walkable; the solver walks from the top-left cell to the
//! bottom-right one.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::debug;

use crate::engine::{AStar, Path};
use crate::error::GridError;
use crate::grid::Point;
use crate::utils::draw_path;

const OPEN: char = ' ';

/// A rectangular block of maze text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Maze {
    rows: Vec<Vec<char>>,
}

impl Maze {
    /// Carves a perfect maze of `cells_w` x `cells_h` cells by randomized
    /// depth-first search.
    ///
    /// # Returns
    /// `Err(GridError::InvalidDimensions)` if either dimension is zero.
    pub fn generate<R: Rng + ?Sized>(
        cells_w: usize,
        cells_h: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if cells_w == 0 || cells_h == 0 {
            return Err(GridError::InvalidDimensions {
                width: cells_w,
                height: cells_h,
            });
        }

        // hor[y][x] is the wall above cell (x, y); ver[y][x] the wall to its left.
        let mut hor: Vec<Vec<&str>> = (0..=cells_h)
            .map(|_| {
                let mut row = vec!["+--"; cells_w];
                row.push("+");
                row
            })
            .collect();
        let mut ver: Vec<Vec<&str>> = (0..cells_h)
            .map(|_| {
                let mut row = vec!["|  "; cells_w];
                row.push("|");
                row
            })
            .collect();

        let mut visited = vec![false; cells_w * cells_h];
        let first = (rng.gen_range(0..cells_w), rng.gen_range(0..cells_h));
        visited[first.1 * cells_w + first.0] = true;
        let mut stack = vec![first];

        while let Some(&(x, y)) = stack.last() {
            let mut candidates = Vec::with_capacity(4);
            if x > 0 {
                candidates.push((x - 1, y));
            }
            if y + 1 < cells_h {
                candidates.push((x, y + 1));
            }
            if x + 1 < cells_w {
                candidates.push((x + 1, y));
            }
            if y > 0 {
                candidates.push((x, y - 1));
            }
            candidates.retain(|&(nx, ny)| !visited[ny * cells_w + nx]);

            let Some(&(nx, ny)) = candidates.choose(&mut *rng) else {
                stack.pop();
                continue;
            };
            if nx == x {
                hor[y.max(ny)][x] = "+  ";
            } else {
                ver[y][x.max(nx)] = "   ";
            }
            visited[ny * cells_w + nx] = true;
            stack.push((nx, ny));
        }

        let mut rows: Vec<Vec<char>> = Vec::with_capacity(2 * cells_h + 1);
        for y in 0..cells_h {
            rows.push(hor[y].concat().chars().collect());
            rows.push(ver[y].concat().chars().collect());
        }
        rows.push(hor[cells_h].concat().chars().collect());

        debug!(cells_w, cells_h, "generated maze");
        Ok(Maze { rows })
    }

    /// Like [`Maze::generate`], with a `SmallRng` seeded from `seed`.
    ///
    /// # Examples
    /// ```
    /// use astar_pathfinding::maze::Maze;
    ///
    /// let maze = Maze::with_seed(4, 3, 7).unwrap();
    /// assert_eq!((maze.width(), maze.height()), (13, 7));
    /// assert_eq!(maze, Maze::with_seed(4, 3, 7).unwrap());
    /// ```
    pub fn with_seed(cells_w: usize, cells_h: usize, seed: u64) -> Result<Self, GridError> {
        Self::generate(cells_w, cells_h, &mut SmallRng::seed_from_u64(seed))
    }

    /// Reads maze text. Surrounding blank lines are ignored; every remaining line
    /// must have the width of the first one.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.trim_matches('\n').lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: chars.len(),
                });
            }
            rows.push(chars);
        }
        Ok(Maze { rows })
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Height in lines.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether `p` is a walkable character. Points outside the maze are not.
    pub fn is_open(&self, p: Point) -> bool {
        if p.x < 0 || p.y < 0 {
            return false;
        }
        self.rows
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .is_some_and(|&ch| ch == OPEN)
    }

    /// The first walkable character of the top-left cell.
    pub fn entrance(&self) -> Point {
        Point::new(1, 1)
    }

    /// The last walkable character of the bottom-right cell.
    pub fn exit(&self) -> Point {
        Point::new(self.width() as i64 - 2, self.height() as i64 - 2)
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    /// The maze text with every point of `path` drawn as `#`.
    pub fn render(&self, path: &[Point]) -> String {
        let lines = self.lines();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        draw_path(&lines, path, &[], '#', '*')
    }

    fn check_open(&self, p: Point) -> Result<(), GridError> {
        let inside = p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.width()
            && (p.y as usize) < self.height();
        if !inside {
            return Err(GridError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width(),
                height: self.height(),
            });
        }
        if !self.is_open(p) {
            return Err(GridError::Blocked { x: p.x, y: p.y });
        }
        Ok(())
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Walks a [`Maze`] one character at a time, north, south, west or east.
#[derive(Clone, Copy, Debug)]
pub struct MazeSolver<'a> {
    maze: &'a Maze,
}

impl<'a> MazeSolver<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        MazeSolver { maze }
    }

    /// Searches from [`Maze::entrance`] to [`Maze::exit`].
    ///
    /// # Examples
    /// ```
    /// use astar_pathfinding::maze::{Maze, MazeSolver};
    ///
    /// let maze = Maze::with_seed(6, 6, 42).unwrap();
    /// let path = MazeSolver::new(&maze).solve().unwrap().unwrap();
    /// assert_eq!(path.first(), Some(&maze.entrance()));
    /// assert_eq!(path.last(), Some(&maze.exit()));
    /// ```
    pub fn solve(&self) -> Result<Option<Path<Point>>, GridError> {
        let (start, goal) = (self.maze.entrance(), self.maze.exit());
        self.maze.check_open(start)?;
        self.maze.check_open(goal)?;
        Ok(self.astar(start, goal))
    }
}

impl AStar for MazeSolver<'_> {
    type Node = Point;

    fn heuristic_cost_estimate(&self, current: &Point, goal: &Point) -> f64 {
        ((goal.x - current.x) as f64).hypot((goal.y - current.y) as f64)
    }

    fn distance_between(&self, _n1: &Point, _n2: &Point) -> f64 {
        1.0
    }

    fn neighbors(&self, node: &Point) -> impl IntoIterator<Item = Point> {
        let (maze, node) = (self.maze, *node);
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .map(move |(dx, dy)| node.offset(dx, dy))
            .filter(move |&p| maze.is_open(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "
+--+--+
|     |
+--+  +
|     |
+--+--+
";

    fn assert_walkable(maze: &Maze, path: &Path<Point>) {
        assert_eq!(path.first(), Some(&maze.entrance()));
        assert_eq!(path.last(), Some(&maze.exit()));
        for p in path.iter() {
            assert!(maze.is_open(*p), "{} is a wall", p);
        }
        for pair in path.nodes().windows(2) {
            let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(d, 1, "{} -> {}", pair[0], pair[1]);
        }
        assert_eq!(path.cost(), (path.len() - 1) as f64);
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = Maze::with_seed(10, 8, 3).unwrap();
        assert_eq!(a, Maze::with_seed(10, 8, 3).unwrap());
        assert_eq!((a.width(), a.height()), (31, 17));

        let mazes: Vec<_> = (0..5).map(|s| Maze::with_seed(10, 8, s).unwrap()).collect();
        assert!(mazes.iter().any(|m| *m != mazes[0]));
    }

    #[test]
    fn test_generated_mazes_are_solvable() {
        for seed in 0..20 {
            for (w, h) in [(1, 1), (2, 5), (7, 3), (12, 12)] {
                let maze = Maze::with_seed(w, h, seed).unwrap();
                let path = MazeSolver::new(&maze)
                    .solve()
                    .unwrap()
                    .unwrap_or_else(|| panic!("seed {} {}x{} unsolvable", seed, w, h));
                assert_walkable(&maze, &path);
            }
        }
    }

    #[test]
    fn test_single_cell_maze() {
        let maze = Maze::with_seed(1, 1, 0).unwrap();
        assert_eq!(maze.to_string(), "+--+\n|  |\n+--+\n");
        let path = MazeSolver::new(&maze).solve().unwrap().unwrap();
        assert_eq!(path.nodes(), &[Point::new(1, 1), Point::new(2, 1)]);
    }

    #[test]
    fn test_generated_border_is_closed() {
        let maze = Maze::with_seed(9, 6, 11).unwrap();
        for x in 0..maze.width() as i64 {
            assert!(!maze.is_open(Point::new(x, 0)));
            assert!(!maze.is_open(Point::new(x, maze.height() as i64 - 1)));
        }
        for y in 0..maze.height() as i64 {
            assert!(!maze.is_open(Point::new(0, y)));
            assert!(!maze.is_open(Point::new(maze.width() as i64 - 1, y)));
        }
    }

    #[test]
    fn test_zero_sized_maze_is_rejected() {
        assert_eq!(
            Maze::with_seed(0, 4, 1),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_parse_and_solve() {
        let maze = Maze::parse(SMALL).unwrap();
        assert_eq!((maze.width(), maze.height()), (7, 5));
        assert_eq!(maze.exit(), Point::new(5, 3));

        let path = MazeSolver::new(&maze).solve().unwrap().unwrap();
        assert_walkable(&maze, &path);
        assert_eq!(path.cost(), 6.0);
    }

    #[test]
    fn test_parse_rejects_ragged_text() {
        assert_eq!(
            Maze::parse("+--+\n|  \n+--+"),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(Maze::parse("\n\n"), Err(GridError::Empty));
    }

    #[test]
    fn test_walled_in_exit() {
        let maze = Maze::parse(
            "
+--+--+
|  |  |
+--+--+
",
        )
        .unwrap();
        assert_eq!(MazeSolver::new(&maze).solve(), Ok(None));
    }

    #[test]
    fn test_render_draws_path() {
        let maze = Maze::parse(SMALL).unwrap();
        let path = MazeSolver::new(&maze).solve().unwrap().unwrap();
        let drawn = maze.render(path.nodes());
        assert_eq!(drawn.matches('#').count(), path.len());
        assert!(drawn.starts_with("+--+--+\n|#"));
        assert_eq!(drawn.lines().count(), maze.height());
    }
}
