//! # A* Pathfinding Library
//!
//! This library provides a generic A* search engine: a problem domain supplies a
//! heuristic, a step cost, a neighbor function and optionally a goal test, and
//! the engine returns the cheapest path from a start node to a goal or reports
//! that none exists.
//!
//! It is used by three binaries:
//! - `grid_solver`: Loads a grid of free and blocked cells from a file and prints
//!   the cheapest route between two points.
//! - `maze_solver`: Generates a seeded ASCII maze and draws its solution.
//! - `heuristic_evaluator`: Compares the grid heuristics on seeded random grids.
//!
//! ## Modules
//! - `engine`: The `AStar` / `TryAStar` capability traits, the `search` loop and
//!   the `Path` result.
//! - `node`: Per-node bookkeeping (`SearchNode`, `SearchNodeStore`).
//! - `open_set`: The priority structure of discovered, unexpanded nodes.
//! - `functional`: `FindPath`, `TryFindPath` and `find_path` for closure-based searches.
//! - `grid`: Bounded grids with dynamic obstacles and a grid pathfinder.
//! - `maze`: Seeded ASCII maze generation and a maze solver.
//! - `heuristics`: Distance estimates over grid points.
//! - `utils`: Parsing grids from strings and drawing paths over ASCII art.
//! - `error`: Error types of the grid and maze modules.

pub mod engine;
pub mod error;
pub mod functional;
pub mod grid;
pub mod heuristics;
pub mod maze;
pub mod node;
pub mod open_set;
pub mod utils;

pub use engine::{search, AStar, Path, PathOrder, TryAStar};
pub use functional::{find_path, FindPath, TryFindPath};
