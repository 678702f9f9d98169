//! Dijkstra's algorithm with a linear-scan frontier.
//!
//! Every cell starts at infinite distance. Each iteration scans all unvisited
//! cells for the smallest tentative distance (ties broken in row-major
//! order), finalises it and relaxes its neighbors. The scan is O(V) per step,
//! which is fine for visualizer-sized grids.

use crate::neighbors::Neighbors;
use crate::{Grid, GridCoord, STEP_COST};

use super::mark_visited;

/// Run Dijkstra from `start` until `end` is finalised or every remaining
/// cell is at infinite distance.
///
/// Returns the cells in finalisation order.
pub fn dijkstra(grid: &mut Grid, start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    let mut visited = Vec::new();
    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }

    loop {
        let Some((current, distance)) = closest_unvisited(grid) else {
            // Remaining cells are unreachable.
            break;
        };

        mark_visited(grid, current, &mut visited);
        if current == end {
            break;
        }

        let neighbors: Vec<_> = Neighbors::open(grid, current).collect();
        for neighbor in neighbors {
            if let Some(cell) = grid.cell_mut(neighbor) {
                let tentative = distance + STEP_COST;
                if cell.distance.map_or(true, |d| tentative < d) {
                    cell.distance = Some(tentative);
                    cell.previous = Some(current);
                }
            }
        }
    }

    visited
}

/// Unvisited, non-wall cell with the smallest finite distance.
fn closest_unvisited(grid: &Grid) -> Option<(GridCoord, u32)> {
    grid.cells()
        .iter()
        .filter(|c| !c.is_visited && !c.is_wall)
        .filter_map(|c| c.distance.map(|d| (c.coord, d)))
        .min_by_key(|&(coord, d)| (d, coord))
}
