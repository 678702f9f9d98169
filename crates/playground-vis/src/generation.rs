//! Generation-stamped run guard.
//!
//! A component owns one [`RunGuard`]. Starting a run bumps the generation
//! and hands out a [`RunToken`]; resetting bumps it again. Every delayed step
//! carries its token and must check [`RunGuard::is_current`] before touching
//! state, so nothing scheduled by an earlier run can land after a reset.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Monotonic run identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

/// Proof that a continuation belongs to a particular run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken {
    generation: Generation,
}

impl RunToken {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Debug, Default)]
struct GuardState {
    generation: AtomicU64,
    running: AtomicBool,
}

/// Shared "one active run" guard. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    state: Arc<GuardState>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run, invalidating any run still in flight.
    pub fn start(&self) -> RunToken {
        let generation = Generation(self.state.generation.fetch_add(1, Ordering::SeqCst) + 1);
        if self.state.running.swap(true, Ordering::SeqCst) {
            tracing::debug!(%generation, "previous run superseded");
        }
        RunToken { generation }
    }

    /// Stop whatever is running. Outstanding tokens become stale.
    pub fn reset(&self) -> Generation {
        let generation = Generation(self.state.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.running.store(false, Ordering::SeqCst);
        tracing::debug!(%generation, "run guard reset");
        generation
    }

    /// Mark the run as finished. Returns false for a stale token, which
    /// leaves the guard untouched.
    pub fn finish(&self, token: &RunToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state.running.store(false, Ordering::SeqCst);
        true
    }

    pub fn is_current(&self, token: &RunToken) -> bool {
        self.generation() == token.generation
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    pub fn generation(&self) -> Generation {
        Generation(self.state.generation.load(Ordering::SeqCst))
    }
}
