//! Grid search: BFS, DFS, Dijkstra and A*.
//!
//! Every algorithm starts from a clean slate ([`Grid::reset_search`]), writes
//! `distance`/`previous`/`is_visited` into the grid as it goes, and returns a
//! [`SearchOutcome`] holding the cells in the order they were finalised plus
//! the start→end path. The engine does no timing of its own; the caller
//! replays `visited` and then `path` at whatever pace it likes.
//!
//! All four report an unreachable end the same way: `found == false`, an
//! empty path, and the full set of cells reachable from start in `visited`.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::{Grid, GridCoord};

pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    /// Cells in the order the algorithm finalised them.
    pub visited: Vec<GridCoord>,
    /// Start→end inclusive; empty if the end was not reached or start == end.
    pub path: Vec<GridCoord>,
    /// Whether the end was reached.
    pub found: bool,
}

impl SearchOutcome {
    /// Number of moves along the path.
    pub fn path_len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Run `algorithm` on `grid`, leaving visited/path marks in the cells.
pub fn search(grid: &mut Grid, algorithm: Algorithm) -> SearchOutcome {
    grid.reset_search();

    let start = grid.start();
    let end = grid.end();

    let (visited, found) = if start == end {
        // Nothing to explore: the start is already the goal.
        if let Some(cell) = grid.cell_mut(start) {
            cell.distance = Some(0);
            cell.is_visited = true;
        }
        (vec![start], true)
    } else {
        let visited = match algorithm {
            Algorithm::Bfs => bfs(grid, start, end),
            Algorithm::Dfs => dfs(grid, start, end),
            Algorithm::Dijkstra => dijkstra(grid, start, end),
            Algorithm::AStar => astar(grid, start, end),
        };
        let found = visited.last() == Some(&end);
        (visited, found)
    };

    let path = if found && start != end {
        trace_path(grid, end)
    } else {
        Vec::new()
    };
    for &coord in &path {
        if let Some(cell) = grid.cell_mut(coord) {
            cell.is_path = true;
        }
    }

    tracing::debug!(
        algorithm = %algorithm,
        visited = visited.len(),
        path = path.len(),
        found,
        "search finished"
    );

    SearchOutcome {
        algorithm,
        visited,
        path,
        found,
    }
}

/// Follow `previous` links from `end` back to the root and return the path
/// in start→end order.
pub fn trace_path(grid: &Grid, end: GridCoord) -> Vec<GridCoord> {
    let mut path = Vec::new();
    let mut current = Some(end);
    // The predecessor links form a tree, so a walk can never be longer than
    // the grid; the bound only guards against hand-edited cells.
    while let Some(coord) = current {
        if path.len() >= grid.len() {
            break;
        }
        path.push(coord);
        current = grid.cell(coord).and_then(|c| c.previous);
    }
    path.reverse();
    path
}

/// Mark a cell finalised and record it in the visit order.
fn mark_visited(grid: &mut Grid, coord: GridCoord, order: &mut Vec<GridCoord>) {
    if let Some(cell) = grid.cell_mut(coord) {
        cell.is_visited = true;
    }
    order.push(coord);
}

fn distance_of(grid: &Grid, coord: GridCoord) -> Option<u32> {
    grid.cell(coord).and_then(|c| c.distance)
}

fn is_visited(grid: &Grid, coord: GridCoord) -> bool {
    grid.cell(coord).is_some_and(|c| c.is_visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridConfig;

    fn open_grid() -> Grid {
        Grid::new(&GridConfig::default()).unwrap()
    }

    /// Vertical wall through column 12 with no gap.
    fn blocked_grid() -> Grid {
        let mut grid = open_grid();
        for row in 0..15 {
            grid.set_wall(GridCoord::new(row, 12), true);
        }
        grid
    }

    #[test]
    fn optimal_algorithms_find_manhattan_path() {
        for algorithm in Algorithm::ALL.into_iter().filter(Algorithm::is_optimal) {
            let mut grid = open_grid();
            let outcome = search(&mut grid, algorithm);

            assert!(outcome.found, "{} did not find end", algorithm);
            assert_eq!(outcome.path_len(), 14, "{} path not shortest", algorithm);
            assert_eq!(outcome.path.first(), Some(&grid.start()));
            assert_eq!(outcome.path.last(), Some(&grid.end()));
        }
    }

    #[test]
    fn dfs_finds_some_path() {
        let mut grid = open_grid();
        let outcome = search(&mut grid, Algorithm::Dfs);

        assert!(outcome.found);
        assert_eq!(outcome.path.first(), Some(&grid.start()));
        assert_eq!(outcome.path.last(), Some(&grid.end()));
        for pair in outcome.path.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn unreachable_end_reported_uniformly() {
        for algorithm in Algorithm::ALL {
            let mut grid = blocked_grid();
            let outcome = search(&mut grid, algorithm);

            assert!(!outcome.found, "{} claims a path through a wall", algorithm);
            assert!(outcome.path.is_empty());
            // Left of the wall: 15 rows x 12 columns, all reachable.
            assert_eq!(outcome.visited.len(), 15 * 12, "{} visited set", algorithm);
            assert_eq!(grid.path_cells().count(), 0);
        }
    }

    #[test]
    fn start_equals_end_is_immediate_success() {
        let config = GridConfig {
            start: GridCoord::new(3, 3),
            end: GridCoord::new(3, 3),
            ..GridConfig::default()
        };
        for algorithm in Algorithm::ALL {
            let mut grid = Grid::new(&config).unwrap();
            let outcome = search(&mut grid, algorithm);

            assert!(outcome.found);
            assert!(outcome.path.is_empty());
            assert_eq!(outcome.visited, vec![GridCoord::new(3, 3)]);
        }
    }

    #[test]
    fn visits_are_unique() {
        for algorithm in Algorithm::ALL {
            let mut grid = open_grid();
            let outcome = search(&mut grid, algorithm);

            let mut seen = std::collections::HashSet::new();
            for coord in &outcome.visited {
                assert!(seen.insert(*coord), "{} visited {} twice", algorithm, coord);
            }
            assert_eq!(grid.visited().count(), outcome.visited.len());
        }
    }

    #[test]
    fn path_marks_written_to_grid() {
        let mut grid = open_grid();
        let outcome = search(&mut grid, Algorithm::Bfs);

        let marked: Vec<_> = grid.path_cells().collect();
        assert_eq!(marked.len(), outcome.path.len());
        assert!(outcome.path.iter().all(|c| marked.contains(c)));
    }

    #[test]
    fn rerun_starts_from_clean_state() {
        let mut grid = open_grid();
        let first = search(&mut grid, Algorithm::AStar);
        let second = search(&mut grid, Algorithm::AStar);
        assert_eq!(first, second);
    }

    #[test]
    fn detour_around_wall() {
        // Wall with a single gap at the bottom row.
        let mut grid = open_grid();
        for row in 0..14 {
            grid.set_wall(GridCoord::new(row, 12), true);
        }

        for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar] {
            let outcome = search(&mut grid, algorithm);
            assert!(outcome.found);
            // Down 7 to row 14, across 14 columns, up 7 back to row 7.
            assert_eq!(outcome.path_len(), 28, "{}", algorithm);
            assert!(outcome.path.contains(&GridCoord::new(14, 12)));
        }
    }

    #[test]
    fn parse_algorithm_names() {
        assert_eq!("bfs".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("Dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert!("greedy".parse::<Algorithm>().is_err());
    }
}
