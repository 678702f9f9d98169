//! Error types for playground-async.

use thiserror::Error;

/// Result type for simulator configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a simulator.
///
/// Ticking never fails; finished runs and no-op edits are ignored.
#[derive(Debug, Error)]
pub enum Error {
    /// An advance or failure probability outside [0, 1].
    #[error("{name} probability must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// A clock tick of zero would never advance the run.
    #[error("tick must be at least 1 ms")]
    ZeroTick,

    /// Duration range for generated promises is empty.
    #[error("empty duration range: {min_ms}..{max_ms} ms")]
    EmptyDurationRange { min_ms: u64, max_ms: u64 },

    /// Task category name not recognised.
    #[error("unknown task kind: {0}")]
    UnknownTaskKind(String),

    /// Combinator name not recognised.
    #[error("unknown combinator: {0}")]
    UnknownCombinator(String),
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidProbability { name, value })
    }
}
