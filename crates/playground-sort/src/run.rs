//! Step-by-step replay of a recorded sort.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithms::{sort_steps, SortAlgorithm};
use crate::error::{Error, Result};
use crate::step::{SortStats, SortStep};

/// Random array parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortConfig {
    /// Number of bars
    pub size: usize,
    /// Smallest value (inclusive)
    pub min_value: i64,
    /// Largest value (exclusive)
    pub max_value: i64,
    /// Seed for deterministic arrays
    pub seed: u64,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            size: 50,
            min_value: 10,
            max_value: 410,
            seed: 42,
        }
    }
}

/// Fill `config.size` values uniformly from `[min_value, max_value)`.
pub fn random_array<R: Rng>(config: &SortConfig, rng: &mut R) -> Result<Vec<i64>> {
    if config.min_value >= config.max_value {
        return Err(Error::EmptyRange {
            min: config.min_value,
            max: config.max_value,
        });
    }
    Ok((0..config.size)
        .map(|_| rng.gen_range(config.min_value..config.max_value))
        .collect())
}

/// Snapshot handed to the renderer after each step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSnapshot {
    pub array: Vec<i64>,
    pub comparing: Vec<usize>,
    pub sorted: Vec<usize>,
    pub done: bool,
}

/// A recorded sort being replayed one step at a time.
///
/// `sorted` only grows between resets, and once the last step has been
/// applied `comparing` is empty and every index is sorted.
#[derive(Debug, Clone)]
pub struct SortRun {
    algorithm: SortAlgorithm,
    initial: Vec<i64>,
    steps: Vec<SortStep>,
    cursor: usize,
    array: Vec<i64>,
    comparing: Vec<usize>,
    sorted: BTreeSet<usize>,
}

impl SortRun {
    /// Record `algorithm` over `input` and position the run before the first step.
    pub fn new(algorithm: SortAlgorithm, input: Vec<i64>) -> Self {
        let (_, steps) = sort_steps(algorithm, &input);
        Self {
            algorithm,
            array: input.clone(),
            initial: input,
            steps,
            cursor: 0,
            comparing: Vec::new(),
            sorted: BTreeSet::new(),
        }
    }

    /// Run over a seeded random array.
    pub fn random(algorithm: SortAlgorithm, config: &SortConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Ok(Self::new(algorithm, random_array(config, &mut rng)?))
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn array(&self) -> &[i64] {
        &self.array
    }

    /// Indices under comparison (at most two).
    pub fn comparing(&self) -> &[usize] {
        &self.comparing
    }

    pub fn sorted(&self) -> &BTreeSet<usize> {
        &self.sorted
    }

    pub fn steps(&self) -> &[SortStep] {
        &self.steps
    }

    /// Number of steps applied so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn stats(&self) -> SortStats {
        SortStats::from_steps(&self.steps)
    }

    /// Apply the next step. Returns `None` once the run is finished.
    pub fn step(&mut self) -> Option<SortStep> {
        let step = *self.steps.get(self.cursor)?;
        self.cursor += 1;

        match step {
            SortStep::Compare { i, j } => {
                self.comparing.clear();
                self.comparing.extend([i, j]);
            }
            SortStep::Swap { i, j } => self.array.swap(i, j),
            SortStep::Write { index, value } => self.array[index] = value,
            SortStep::MarkSorted { index } => {
                self.sorted.insert(index);
            }
        }

        if self.is_done() {
            self.comparing.clear();
            tracing::debug!(algorithm = %self.algorithm, steps = self.steps.len(), "sort finished");
        }
        Some(step)
    }

    /// Apply every remaining step; returns how many were applied.
    pub fn run_to_end(&mut self) -> usize {
        let mut applied = 0;
        while self.step().is_some() {
            applied += 1;
        }
        applied
    }

    /// Back to the unsorted input with nothing compared or sorted.
    pub fn reset(&mut self) {
        self.array.clone_from(&self.initial);
        self.cursor = 0;
        self.comparing.clear();
        self.sorted.clear();
    }

    pub fn snapshot(&self) -> SortSnapshot {
        SortSnapshot {
            array: self.array.clone(),
            comparing: self.comparing.clone(),
            sorted: self.sorted.iter().copied().collect(),
            done: self.is_done(),
        }
    }
}
