//! The five sorting algorithms, written against [`Recorder`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::step::{Recorder, SortStep};

/// Which algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortAlgorithm {
    Bubble,
    Quick,
    Merge,
    Insertion,
    Selection,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Selection => "selection",
        }
    }

    /// Whether equal values keep their relative order.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble | SortAlgorithm::Merge | SortAlgorithm::Insertion
        )
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Sort a copy of `input`, returning the sorted array and every step taken.
///
/// The step list always ends with every index marked sorted.
pub fn sort_steps(algorithm: SortAlgorithm, input: &[i64]) -> (Vec<i64>, Vec<SortStep>) {
    let mut rec = Recorder::new(input);
    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut rec),
        SortAlgorithm::Quick => {
            if rec.len() > 1 {
                let hi = rec.len() - 1;
                quick(&mut rec, 0, hi);
            }
        }
        SortAlgorithm::Merge => {
            if rec.len() > 1 {
                let hi = rec.len() - 1;
                merge_sort(&mut rec, 0, hi);
            }
        }
        SortAlgorithm::Insertion => insertion(&mut rec),
        SortAlgorithm::Selection => selection(&mut rec),
    }

    let (array, steps) = rec.finish();
    tracing::debug!(%algorithm, len = array.len(), steps = steps.len(), "sort recorded");
    (array, steps)
}

/// Adjacent compare-and-swap; after pass `i` the last `i + 1` slots are final.
fn bubble(rec: &mut Recorder) {
    let n = rec.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
            }
        }
        rec.mark_sorted(n - i - 1);
    }
}

/// Quicksort with last-element pivot (Lomuto partition).
fn quick(rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let pivot = partition(rec, low, high);
    if pivot > low {
        quick(rec, low, pivot - 1);
    }
    quick(rec, pivot + 1, high);
}

fn partition(rec: &mut Recorder, low: usize, high: usize) -> usize {
    // `store` is the next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        if rec.compare(j, high) == Ordering::Less {
            rec.swap(store, j);
            store += 1;
        }
    }
    rec.swap(store, high);
    rec.mark_sorted(store);
    store
}

/// Top-down merge sort over the inclusive range `[left, right]`.
fn merge_sort(rec: &mut Recorder, left: usize, right: usize) {
    if left >= right {
        return;
    }
    let mid = left + (right - left) / 2;
    merge_sort(rec, left, mid);
    merge_sort(rec, mid + 1, right);
    merge(rec, left, mid, right);
}

/// Merge `[left, mid]` and `[mid + 1, right]` through auxiliary copies.
fn merge(rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let left_half: Vec<i64> = (left..=mid).map(|k| rec.get(k)).collect();
    let right_half: Vec<i64> = (mid + 1..=right).map(|k| rec.get(k)).collect();

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_half.len() && j < right_half.len() {
        let order = rec.compare_values(left + i, mid + 1 + j, left_half[i], right_half[j]);
        if order != Ordering::Greater {
            rec.write(k, left_half[i]);
            i += 1;
        } else {
            rec.write(k, right_half[j]);
            j += 1;
        }
        k += 1;
    }
    for &value in &left_half[i..] {
        rec.write(k, value);
        k += 1;
    }
    for &value in &right_half[j..] {
        rec.write(k, value);
        k += 1;
    }
}

/// Shift larger elements right and drop the key into the gap. No position
/// is final until the whole pass is done.
fn insertion(rec: &mut Recorder) {
    for i in 1..rec.len() {
        let key = rec.get(i);
        let mut j = i;
        while j > 0 {
            if rec.compare_values(j - 1, j, rec.get(j - 1), key) != Ordering::Greater {
                break;
            }
            let shifted = rec.get(j - 1);
            rec.write(j, shifted);
            j -= 1;
        }
        if j != i {
            rec.write(j, key);
        }
    }
}

/// Select the minimum of the unsorted suffix and swap it to the front.
fn selection(rec: &mut Recorder) {
    let n = rec.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if rec.compare(j, min) == Ordering::Less {
                min = j;
            }
        }
        rec.swap(i, min);
        rec.mark_sorted(i);
    }
}
