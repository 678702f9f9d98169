//! Error types for playground-grid.

use thiserror::Error;

use crate::GridCoord;

/// Result type for grid construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a grid or parsing search options.
///
/// Searching itself never fails: an unreachable end is a normal outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid has no cells.
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// Start or end marker is outside the grid.
    #[error("{role} cell {coord} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        role: &'static str,
        coord: GridCoord,
        rows: usize,
        cols: usize,
    },

    /// Algorithm name not recognised.
    #[error("unknown search algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Wall density outside [0, 1].
    #[error("wall density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
}
