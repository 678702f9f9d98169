//! Error types for playground-games.

use thiserror::Error;

/// Result type for game operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in game operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Board index outside 0..9
    #[error("cell {0} is not on the board")]
    InvalidCell(usize),

    /// Cell already holds a mark
    #[error("cell {0} is already taken")]
    CellTaken(usize),

    /// Move made out of turn
    #[error("it is not {0}'s turn")]
    NotYourTurn(&'static str),

    /// Move made after the game ended
    #[error("the game is already over")]
    GameOver,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
