//! Error types for playground-sort.

use thiserror::Error;

/// Result type for sort configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a sort run.
#[derive(Debug, Error)]
pub enum Error {
    /// Algorithm name not recognised.
    #[error("unknown sorting algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Value range for random arrays is empty.
    #[error("empty value range: {min}..{max}")]
    EmptyRange { min: i64, max: i64 },
}
