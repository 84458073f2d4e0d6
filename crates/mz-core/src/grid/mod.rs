//! Grid model
//!
//! Cell kinds, coordinates, the level grid itself and invariant checks.

mod cell;
mod maze_grid;
mod validate;

pub use cell::{CellKind, Direction, Dirs, Position, WorldPosition};
pub use maze_grid::MazeGrid;

use thiserror::Error;

/// Problems found when parsing a grid or checking a finished level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no Start cell")]
    MissingStart,

    #[error("grid has {0} Start cells, expected exactly one")]
    DuplicateStart(usize),

    #[error("grid has no Exit cell")]
    MissingExit,

    #[error("grid has {0} Exit cells, expected exactly one")]
    DuplicateExit(usize),

    #[error("Exit is not reachable from Start")]
    Unreachable,

    #[error("passable cells form {regions} disconnected regions")]
    Disconnected { regions: usize },

    #[error("boundary cell ({x}, {z}) is not Wall")]
    OpenBoundary { x: usize, z: usize },

    #[error("backtracking grid must have odd dimensions, got {width}x{height}")]
    EvenDimensions { width: usize, height: usize },

    #[error("unknown cell symbol '{ch}' on line {line}")]
    Parse { line: usize, ch: char },

    #[error("line {line} has a different length than the first row")]
    Ragged { line: usize },

    #[error("{width}x{height} grid cannot hold {cells} cells")]
    SizeMismatch {
        width: usize,
        height: usize,
        cells: usize,
    },
}
