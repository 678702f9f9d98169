//! Error types for playground-trees.

use thiserror::Error;

/// Result type for tree operations that parse user-facing options.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing tree options.
///
/// Tree operations themselves never fail: deleting an absent key and
/// inserting a duplicate are no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// Recursion algorithm name not recognised.
    #[error("unknown recursion algorithm: {0}")]
    UnknownAlgorithm(String),
}
