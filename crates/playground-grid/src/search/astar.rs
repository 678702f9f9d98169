//! A* search with a Manhattan heuristic.
//!
//! The open set is a binary heap ordered by `f = g + h`; ties go to the entry
//! pushed first. Stale heap entries (a cell re-pushed after its distance
//! improved) are skipped when popped. Because moves are unit-cost and
//! orthogonal, the Manhattan heuristic is consistent, so the first time a
//! cell is popped its distance is final.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::neighbors::Neighbors;
use crate::{Grid, GridCoord, STEP_COST};

use super::{is_visited, mark_visited};

/// Entry in the A* open set.
///
/// Ordering is reversed so the max-heap pops the smallest `f_score`.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    coord: GridCoord,
    f_score: u32,
    g_score: u32,
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Run A* from `start` until `end` is popped or the open set is empty.
///
/// Returns the cells in the order they were closed.
pub fn astar(grid: &mut Grid, start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    let mut visited = Vec::new();
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();

    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }
    open.push(OpenEntry {
        coord: start,
        f_score: start.manhattan_distance(&end),
        g_score: 0,
        seq,
    });

    while let Some(entry) = open.pop() {
        let current = entry.coord;
        if is_visited(grid, current) {
            continue;
        }

        mark_visited(grid, current, &mut visited);
        if current == end {
            break;
        }

        let tentative = entry.g_score + STEP_COST;
        let neighbors: Vec<_> = Neighbors::open(grid, current).collect();
        for neighbor in neighbors {
            let Some(cell) = grid.cell_mut(neighbor) else {
                continue;
            };
            if cell.is_visited || cell.distance.is_some_and(|d| tentative >= d) {
                continue;
            }

            cell.distance = Some(tentative);
            cell.previous = Some(current);
            seq += 1;
            open.push(OpenEntry {
                coord: neighbor,
                f_score: tentative + neighbor.manhattan_distance(&end),
                g_score: tentative,
                seq,
            });
        }
    }

    visited
}
