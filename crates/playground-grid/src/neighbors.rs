//! Orthogonal neighbor enumeration shared by every search algorithm.
//!
//! A cell has at most four neighbors (up, down, left, right). Neighbors that
//! fall outside the grid or sit on a wall are never returned.

use crate::{Grid, GridCoord};

/// Number of directions a search may move in.
pub const MAX_NEIGHBORS: usize = 4;

/// Neighbor lookups for a coordinate on a grid.
pub struct Neighbors;

impl Neighbors {
    /// All four orthogonal coordinates, unfiltered.
    pub fn of(coord: GridCoord) -> [GridCoord; MAX_NEIGHBORS] {
        coord.orthogonal_neighbors()
    }

    /// In-bounds, non-wall neighbors in enumeration order.
    pub fn open(grid: &Grid, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        Self::of(coord)
            .into_iter()
            .filter(move |&n| grid.cell(n).is_some_and(|cell| !cell.is_wall))
    }
}
