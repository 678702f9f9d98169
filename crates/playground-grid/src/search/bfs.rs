//! Breadth-first search.
//!
//! FIFO frontier. A cell is *discovered* when first enqueued (its parent and
//! distance are fixed right then) and *visited* when dequeued. All edges
//! weigh 1, so the first discovery is along a shortest path.

use std::collections::VecDeque;

use crate::neighbors::Neighbors;
use crate::{Grid, GridCoord, STEP_COST};

use super::{distance_of, mark_visited};

/// Run BFS from `start` until `end` is dequeued or the frontier is empty.
///
/// Returns the cells in dequeue order.
pub fn bfs(grid: &mut Grid, start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    let mut visited = Vec::new();
    let mut queue = VecDeque::from([start]);
    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }

    while let Some(current) = queue.pop_front() {
        mark_visited(grid, current, &mut visited);
        if current == end {
            break;
        }

        let next_distance = distance_of(grid, current).unwrap_or(0) + STEP_COST;
        let neighbors: Vec<_> = Neighbors::open(grid, current).collect();
        for neighbor in neighbors {
            if let Some(cell) = grid.cell_mut(neighbor) {
                // A finite distance means the cell is already discovered.
                if cell.distance.is_none() {
                    cell.distance = Some(next_distance);
                    cell.previous = Some(current);
                    queue.push_back(neighbor);
                }
            }
        }
    }

    visited
}
