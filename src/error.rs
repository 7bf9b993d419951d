//! Error types for the grid and maze consumers of the search engine.
//!
//! The engine itself has no error type: an unreachable goal is reported as
//! `None`, and failures raised by fallible capabilities are handed back to the
//! caller untouched (see [`crate::engine::TryAStar`]).

use thiserror::Error;

/// Errors raised while building or querying a [`crate::grid::Grid`] or
/// [`crate::maze::Maze`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The textual input contained no rows.
    #[error("grid has no rows")]
    Empty,

    /// A row does not have the same width as the first row.
    #[error("row {row} has {found} characters, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character that is neither a wall nor a free cell.
    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedCharacter { ch: char, row: usize, col: usize },

    /// A search endpoint lies outside the grid.
    #[error("point ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A search endpoint lies on a blocked cell.
    #[error("point ({x}, {y}) is blocked")]
    Blocked { x: i64, y: i64 },

    /// Dimensions that cannot hold a single cell.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Errors raised when parsing command-line style values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid point '{0}', expected the form x,y")]
    InvalidPoint(String),

    #[error("unknown heuristic '{0}' (expected zero, manhattan, euclidean, octile or chebyshev)")]
    UnknownHeuristic(String),

    #[error("unknown connectivity '{0}' (expected four or eight)")]
    UnknownConnectivity(String),
}
