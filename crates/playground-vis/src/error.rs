//! Error types for playground-vis.

use thiserror::Error;

/// Result type for timeline recording.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a recorded run. Most wrap the failing
/// engine's configuration error.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid or maze configuration rejected
    #[error("grid: {0}")]
    Grid(#[from] playground_grid::Error),

    /// Sort configuration rejected
    #[error("sort: {0}")]
    Sort(#[from] playground_sort::Error),

    /// Board size rejected
    #[error("backtracking: {0}")]
    Backtrack(#[from] playground_backtrack::Error),

    /// Simulator configuration rejected
    #[error("simulator: {0}")]
    Async(#[from] playground_async::Error),

    /// Hanoi speed name not recognised
    #[error("unknown speed: {0}")]
    UnknownSpeed(String),
}
