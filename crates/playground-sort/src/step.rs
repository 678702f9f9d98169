//! Sort steps and the recorder the algorithms drive.

use std::cmp::Ordering;

/// One observable action of a sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SortStep {
    /// Two positions are being compared
    Compare { i: usize, j: usize },
    /// Two positions exchange their values
    Swap { i: usize, j: usize },
    /// A position is overwritten (merge and insertion sort)
    Write { index: usize, value: i64 },
    /// A position holds its final value
    MarkSorted { index: usize },
}

/// Counts of each step kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortStats {
    pub comparisons: usize,
    pub swaps: usize,
    pub writes: usize,
}

impl SortStats {
    /// Tally a step list.
    pub fn from_steps(steps: &[SortStep]) -> Self {
        steps.iter().fold(Self::default(), |mut stats, step| {
            match step {
                SortStep::Compare { .. } => stats.comparisons += 1,
                SortStep::Swap { .. } => stats.swaps += 1,
                SortStep::Write { .. } => stats.writes += 1,
                SortStep::MarkSorted { .. } => {}
            }
            stats
        })
    }
}

/// Working array plus the step log. Algorithms only touch the array through
/// these methods, so every mutation is recorded.
pub(crate) struct Recorder {
    array: Vec<i64>,
    steps: Vec<SortStep>,
    marked: Vec<bool>,
}

impl Recorder {
    pub(crate) fn new(input: &[i64]) -> Self {
        Self {
            array: input.to_vec(),
            steps: Vec::new(),
            marked: vec![false; input.len()],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.array.len()
    }

    pub(crate) fn get(&self, index: usize) -> i64 {
        self.array[index]
    }

    /// Compare the values at two positions.
    pub(crate) fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.steps.push(SortStep::Compare { i, j });
        self.array[i].cmp(&self.array[j])
    }

    /// Record a comparison at `(i, j)` whose operands live outside the array
    /// (merge halves, the insertion key).
    pub(crate) fn compare_values(&mut self, i: usize, j: usize, a: i64, b: i64) -> Ordering {
        self.steps.push(SortStep::Compare { i, j });
        a.cmp(&b)
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.array.swap(i, j);
            self.steps.push(SortStep::Swap { i, j });
        }
    }

    pub(crate) fn write(&mut self, index: usize, value: i64) {
        self.array[index] = value;
        self.steps.push(SortStep::Write { index, value });
    }

    pub(crate) fn mark_sorted(&mut self, index: usize) {
        if !self.marked[index] {
            self.marked[index] = true;
            self.steps.push(SortStep::MarkSorted { index });
        }
    }

    /// Mark every position not yet marked and hand back the log.
    pub(crate) fn finish(mut self) -> (Vec<i64>, Vec<SortStep>) {
        for index in 0..self.array.len() {
            self.mark_sorted(index);
        }
        (self.array, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_with_self_is_silent() {
        let mut rec = Recorder::new(&[3, 1]);
        rec.swap(1, 1);
        let (array, steps) = rec.finish();
        assert_eq!(array, vec![3, 1]);
        assert!(steps.iter().all(|s| matches!(s, SortStep::MarkSorted { .. })));
    }

    #[test]
    fn mark_sorted_once() {
        let mut rec = Recorder::new(&[1, 2, 3]);
        rec.mark_sorted(2);
        rec.mark_sorted(2);
        let (_, steps) = rec.finish();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], SortStep::MarkSorted { index: 2 });
    }

    #[test]
    fn stats_tally() {
        let steps = [
            SortStep::Compare { i: 0, j: 1 },
            SortStep::Swap { i: 0, j: 1 },
            SortStep::Compare { i: 1, j: 2 },
            SortStep::Write { index: 0, value: 4 },
            SortStep::MarkSorted { index: 2 },
        ];
        let stats = SortStats::from_steps(&steps);
        assert_eq!(stats, SortStats { comparisons: 2, swaps: 1, writes: 1 });
    }
}
