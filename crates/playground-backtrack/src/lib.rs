//! Playground Backtrack
//!
//! Step-recorded puzzle solvers:
//! - [`solve`] runs N-Queens by backtracking and records every trial square
//! - [`hanoi_moves`] and [`HanoiRun`] generate and play back the optimal
//!   Tower of Hanoi solution

mod error;
mod hanoi;
mod nqueens;

pub use error::{Error, Result};
pub use hanoi::{
    hanoi_moves, optimal_moves, HanoiMove, HanoiRun, Towers, MAX_DISKS, MIN_DISKS, PEG_COUNT,
};
pub use nqueens::{is_safe, solve, NQueensTrace, Position, QueenBoard, QueenEvent, MAX_BOARD_SIZE};
