//! Error types for playground-backtrack.

use thiserror::Error;

/// Result type for puzzle construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a puzzle.
#[derive(Debug, Error)]
pub enum Error {
    /// N-Queens needs at least one row.
    #[error("board size must be at least 1")]
    EmptyBoard,

    /// Board larger than the solver accepts.
    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },
}
