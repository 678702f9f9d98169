//! Promise-combinator evaluator.
//!
//! A fixed list of simulated promises runs in lockstep against one elapsed
//! clock. After each tick the active combinator decides whether the run is
//! over:
//!
//! - `all` rejects on the first rejection, fulfills once every promise has
//! - `allSettled` fulfills once every promise has settled, and never rejects
//! - `race` mirrors the first promise to settle
//! - `any` fulfills on the first fulfilment, rejects once every promise has
//!
//! A tick is atomic: every promise is advanced first, then the combinator
//! looks at the result.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{check_probability, Error, Result};

/// Aggregation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Combinator {
    All,
    AllSettled,
    Race,
    Any,
}

impl Combinator {
    pub const ALL: [Combinator; 4] = [
        Combinator::All,
        Combinator::AllSettled,
        Combinator::Race,
        Combinator::Any,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Combinator::All => "all",
            Combinator::AllSettled => "allSettled",
            Combinator::Race => "race",
            Combinator::Any => "any",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Promise.{}()", self.name())
    }
}

impl FromStr for Combinator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim_start_matches("Promise.").trim_end_matches("()");
        Combinator::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownCombinator(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PromiseStatus {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl PromiseStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, PromiseStatus::Fulfilled | PromiseStatus::Rejected)
    }
}

/// One simulated promise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimPromise {
    pub id: u32,
    pub duration_ms: u64,
    pub should_fail: bool,
    pub status: PromiseStatus,
    /// Percent complete, 0 to 100
    pub progress: f64,
}

impl SimPromise {
    fn new(id: u32, duration_ms: u64, should_fail: bool) -> Self {
        Self {
            id,
            duration_ms,
            should_fail,
            status: PromiseStatus::Idle,
            progress: 0.0,
        }
    }

    fn disposition(&self) -> PromiseStatus {
        if self.should_fail {
            PromiseStatus::Rejected
        } else {
            PromiseStatus::Fulfilled
        }
    }

    fn progress_at(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 100.0;
        }
        (elapsed_ms as f64 / self.duration_ms as f64 * 100.0).min(100.0)
    }
}

/// Evaluator parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinatorConfig {
    /// Clock advance per [`CombinatorRun::tick`]
    pub tick_ms: u64,
    /// Shortest duration for added promises (inclusive)
    pub min_duration_ms: u64,
    /// Longest duration for added promises (exclusive)
    pub max_duration_ms: u64,
    /// Chance an added promise is set to reject
    pub fail_probability: f64,
    /// Seed for added promises
    pub seed: u64,
}

impl Default for CombinatorConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            min_duration_ms: 1000,
            max_duration_ms: 4000,
            fail_probability: 0.3,
            seed: 42,
        }
    }
}

impl CombinatorConfig {
    fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(Error::ZeroTick);
        }
        check_probability("fail", self.fail_probability)?;
        if self.min_duration_ms >= self.max_duration_ms {
            return Err(Error::EmptyDurationRange {
                min_ms: self.min_duration_ms,
                max_ms: self.max_duration_ms,
            });
        }
        Ok(())
    }
}

/// The promises a run starts with: 2000ms and 1500ms fulfilling, 3000ms
/// rejecting.
pub const DEFAULT_PROMISES: [(u64, bool); 3] = [(2000, false), (1500, false), (3000, true)];

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub combinator: Combinator,
    /// `Fulfilled` or `Rejected`
    pub status: PromiseStatus,
    /// Promise whose settlement decided the outcome; `None` for an empty
    /// list
    pub deciding: Option<u32>,
    /// When the deciding promise settled
    pub settled_at_ms: u64,
    /// Clock value of the tick that observed it
    pub elapsed_ms: u64,
    pub message: String,
}

/// One combinator run over a list of promises.
#[derive(Debug, Clone)]
pub struct CombinatorRun {
    config: CombinatorConfig,
    combinator: Combinator,
    promises: Vec<SimPromise>,
    rng: StdRng,
    running: bool,
    elapsed_ms: u64,
    outcome: Option<Outcome>,
}

impl CombinatorRun {
    /// A run over [`DEFAULT_PROMISES`].
    pub fn new(config: CombinatorConfig, combinator: Combinator) -> Result<Self> {
        Self::with_promises(config, combinator, &DEFAULT_PROMISES)
    }

    /// A run over `(duration_ms, should_fail)` pairs, numbered from 1.
    pub fn with_promises(
        config: CombinatorConfig,
        combinator: Combinator,
        promises: &[(u64, bool)],
    ) -> Result<Self> {
        config.validate()?;
        let promises = promises
            .iter()
            .zip(1..)
            .map(|(&(duration, fail), id)| SimPromise::new(id, duration, fail))
            .collect();
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            combinator,
            promises,
            running: false,
            elapsed_ms: 0,
            outcome: None,
        })
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Switch policy. Resets the run; ignored while running.
    pub fn set_combinator(&mut self, combinator: Combinator) -> bool {
        if self.running {
            return false;
        }
        self.reset();
        self.combinator = combinator;
        true
    }

    pub fn promises(&self) -> &[SimPromise] {
        &self.promises
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Aggregate status: idle before start, pending while running, then the
    /// outcome's status.
    pub fn overall_status(&self) -> PromiseStatus {
        match (&self.outcome, self.running) {
            (Some(outcome), _) => outcome.status,
            (None, true) => PromiseStatus::Pending,
            (None, false) => PromiseStatus::Idle,
        }
    }

    /// Add a promise with a random duration and disposition. Ignored while
    /// running.
    pub fn add_promise(&mut self) -> Option<u32> {
        let duration = self
            .rng
            .gen_range(self.config.min_duration_ms..self.config.max_duration_ms);
        let fail = self.rng.gen_bool(self.config.fail_probability);
        self.add_promise_with(duration, fail)
    }

    /// Add a promise with a fixed duration and disposition. Ignored while
    /// running.
    pub fn add_promise_with(&mut self, duration_ms: u64, should_fail: bool) -> Option<u32> {
        if self.running {
            return None;
        }
        let id = self.promises.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.promises.push(SimPromise::new(id, duration_ms, should_fail));
        Some(id)
    }

    /// Remove a promise. The last remaining promise is never removed, and
    /// nothing is removed while running.
    pub fn remove_promise(&mut self, id: u32) -> bool {
        if self.running || self.promises.len() <= 1 {
            return false;
        }
        let before = self.promises.len();
        self.promises.retain(|p| p.id != id);
        self.promises.len() != before
    }

    /// Flip whether a promise rejects. Ignored while running.
    pub fn toggle_fail(&mut self, id: u32) -> bool {
        if self.running {
            return false;
        }
        match self.promises.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.should_fail = !p.should_fail;
                true
            }
            None => false,
        }
    }

    /// Start the clock. Ignored while running or after an outcome; call
    /// [`reset`](Self::reset) to run again.
    pub fn start(&mut self) -> bool {
        if self.running || self.outcome.is_some() {
            return false;
        }
        for p in &mut self.promises {
            p.status = PromiseStatus::Pending;
            p.progress = 0.0;
        }
        self.elapsed_ms = 0;
        self.running = true;
        tracing::debug!(
            combinator = %self.combinator,
            promises = self.promises.len(),
            "combinator started"
        );
        // An empty list decides at time zero.
        self.advance_to(0);
        true
    }

    /// Running with nothing left to settle. Only `race` over no promises
    /// gets here; it stays pending forever.
    pub fn is_stalled(&self) -> bool {
        self.running && !self.promises.iter().any(|p| p.status == PromiseStatus::Pending)
    }

    /// Advance the clock by one tick.
    pub fn tick(&mut self) -> Option<Outcome> {
        self.advance_to(self.elapsed_ms + self.config.tick_ms)
    }

    /// Move the clock to `elapsed_ms` and settle whatever has finished.
    /// Returns the outcome on the tick that decides it.
    pub fn advance_to(&mut self, elapsed_ms: u64) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        self.elapsed_ms = elapsed_ms.max(self.elapsed_ms);

        for p in self.promises.iter_mut().filter(|p| p.status == PromiseStatus::Pending) {
            p.progress = p.progress_at(self.elapsed_ms);
            if p.progress >= 100.0 {
                p.status = p.disposition();
            }
        }

        let outcome = self.evaluate()?;
        self.running = false;
        tracing::info!(
            combinator = %self.combinator,
            status = ?outcome.status,
            settled_at_ms = outcome.settled_at_ms,
            "combinator settled"
        );
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Start if needed and tick until an outcome. `None` when the run can
    /// never settle.
    pub fn run_to_completion(&mut self) -> Option<Outcome> {
        self.start();
        while self.running && !self.is_stalled() {
            if let Some(outcome) = self.tick() {
                return Some(outcome);
            }
        }
        self.outcome.clone()
    }

    /// All promises idle at 0%, no outcome.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
        self.outcome = None;
        for p in &mut self.promises {
            p.status = PromiseStatus::Idle;
            p.progress = 0.0;
        }
    }

    fn evaluate(&self) -> Option<Outcome> {
        let settled =
            |status: PromiseStatus| self.promises.iter().filter(move |p| p.status == status);
        let fulfilled = settled(PromiseStatus::Fulfilled).count();
        let rejected = settled(PromiseStatus::Rejected).count();
        let total = self.promises.len();

        if total == 0 {
            let status = match self.combinator {
                Combinator::All | Combinator::AllSettled => PromiseStatus::Fulfilled,
                Combinator::Any => PromiseStatus::Rejected,
                Combinator::Race => return None,
            };
            return Some(self.settle(status, None));
        }

        // Promises settle in duration order; within one tick the shortest
        // went first, ties broken by list order.
        let first = |status: PromiseStatus| settled(status).min_by_key(|p| p.duration_ms);
        let last_settled = || {
            self.promises
                .iter()
                .filter(|p| p.status.is_settled())
                .max_by_key(|p| p.duration_ms)
        };

        let (status, deciding) = match self.combinator {
            Combinator::All if rejected > 0 => {
                (PromiseStatus::Rejected, first(PromiseStatus::Rejected)?)
            }
            Combinator::All if fulfilled == total => (PromiseStatus::Fulfilled, last_settled()?),
            Combinator::AllSettled if fulfilled + rejected == total => {
                (PromiseStatus::Fulfilled, last_settled()?)
            }
            Combinator::Race => {
                let winner = self
                    .promises
                    .iter()
                    .filter(|p| p.status.is_settled())
                    .min_by_key(|p| p.duration_ms)?;
                (winner.status, winner)
            }
            Combinator::Any if fulfilled > 0 => {
                (PromiseStatus::Fulfilled, first(PromiseStatus::Fulfilled)?)
            }
            Combinator::Any if rejected == total => (PromiseStatus::Rejected, last_settled()?),
            _ => return None,
        };

        Some(self.settle(status, Some(deciding)))
    }

    fn settle(&self, status: PromiseStatus, deciding: Option<&SimPromise>) -> Outcome {
        let id = deciding.map(|p| p.id);
        Outcome {
            combinator: self.combinator,
            status,
            deciding: id,
            settled_at_ms: deciding.map_or(0, |p| p.duration_ms),
            elapsed_ms: self.elapsed_ms,
            message: self.message(status, id),
        }
    }

    fn message(&self, status: PromiseStatus, deciding: Option<u32>) -> String {
        match (self.combinator, status) {
            (Combinator::All, PromiseStatus::Rejected) => {
                "Promise.all() rejected because one promise failed.".to_string()
            }
            (Combinator::All, _) => {
                "Promise.all() fulfilled because all promises succeeded.".to_string()
            }
            (Combinator::AllSettled, _) => {
                "Promise.allSettled() finished. It never rejects.".to_string()
            }
            (Combinator::Race, status) => {
                let word = if status == PromiseStatus::Rejected { "rejected" } else { "fulfilled" };
                format!("Promise.race() settled with P{} ({}).", deciding.unwrap_or_default(), word)
            }
            (Combinator::Any, PromiseStatus::Rejected) => {
                "Promise.any() rejected because ALL promises failed (AggregateError).".to_string()
            }
            (Combinator::Any, _) => {
                "Promise.any() fulfilled because one promise succeeded.".to_string()
            }
        }
    }
}
