//! Playground Grid Search
//!
//! Rectangular grid with walls, a start marker and an end marker, plus the
//! four search algorithms shown on the pathfinding and maze pages.
//!
//! # Model
//!
//! Cells are addressed by [`GridCoord`] (row, column). Moves are orthogonal
//! and cost 1, so:
//! - BFS, Dijkstra and A* always return a shortest path
//! - the Manhattan distance is an admissible, consistent A* heuristic
//! - DFS returns *a* path, with no length guarantee
//!
//! # Usage
//!
//! ```
//! use playground_grid::{search, Algorithm, Grid, GridConfig};
//!
//! let mut grid = Grid::new(&GridConfig::default()).unwrap();
//! let outcome = search(&mut grid, Algorithm::AStar);
//! assert!(outcome.found);
//! assert_eq!(outcome.path_len(), 14);
//! ```

mod coord;
mod error;
mod grid;
mod maze;
mod neighbors;
pub mod search;

pub use coord::GridCoord;
pub use error::{Error, Result};
pub use grid::{Cell, Grid, GridConfig};
pub use maze::{generate_maze, scatter_walls, MazeConfig};
pub use neighbors::{Neighbors, MAX_NEIGHBORS};
pub use search::{search, trace_path, Algorithm, SearchOutcome};

/// Cost of a single move between adjacent cells.
pub const STEP_COST: u32 = 1;
