//! Visualization events for replay timelines.
//!
//! Every engine's run is flattened into one stream of [`VisEvent`]s. Each
//! event carries the frame it was recorded at, which is also its index in
//! the timeline.

use std::time::Duration;

use playground_async::{Outcome, SimPromise, TickReport};
use playground_backtrack::QueenEvent;
use playground_grid::{Algorithm, GridCoord};
use playground_sort::{SortAlgorithm, SortStats, SortStep};
use playground_trees::RecursionKind;
use serde::{Deserialize, Serialize};

use crate::playback::{Pace, Paced};

/// Events a renderer consumes, one per animation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisEvent {
    /// A search finalised a cell
    CellVisited {
        algorithm: Algorithm,
        coord: GridCoord,
        order: usize,
        frame: u64,
    },

    /// A cell on the found path, start first
    PathCell {
        coord: GridCoord,
        index: usize,
        frame: u64,
    },

    /// A search ran out of cells or reached the end
    SearchFinished {
        algorithm: Algorithm,
        found: bool,
        visited: usize,
        path_len: usize,
        frame: u64,
    },

    /// A BST search compared the target against a node
    BstVisit { value: i64, depth: usize, frame: u64 },

    /// A BST search ended
    BstSearchFinished { target: i64, found: bool, frame: u64 },

    /// One sorting action
    Sort { step: SortStep, frame: u64 },

    /// Every position holds its final value
    SortFinished {
        algorithm: SortAlgorithm,
        array: Vec<i64>,
        stats: SortStats,
        frame: u64,
    },

    /// One N-Queens solver step
    Queen { event: QueenEvent, frame: u64 },

    /// A Hanoi disk moved
    HanoiMove {
        step: usize,
        from: usize,
        to: usize,
        frame: u64,
    },

    /// All disks sit on the last peg
    HanoiFinished { disks: u32, moves: u64, frame: u64 },

    /// A call node placed on the canvas
    RecursionCall {
        node: usize,
        input: u32,
        result: u64,
        depth: usize,
        x: f64,
        y: f64,
        parent: Option<usize>,
        frame: u64,
    },

    /// The call tree is complete
    RecursionFinished {
        kind: RecursionKind,
        input: u32,
        result: u64,
        calls: usize,
        frame: u64,
    },

    /// One event-loop tick
    LoopTick { report: TickReport, frame: u64 },

    /// Every task completed
    LoopIdle { ticks: u64, frame: u64 },

    /// Promise progress after a clock tick
    PromiseTick {
        elapsed_ms: u64,
        promises: Vec<SimPromise>,
        frame: u64,
    },

    /// The combinator settled
    PromiseSettled { outcome: Outcome, frame: u64 },
}

impl VisEvent {
    /// Frame the event was recorded at.
    pub fn frame(&self) -> u64 {
        match self {
            VisEvent::CellVisited { frame, .. }
            | VisEvent::PathCell { frame, .. }
            | VisEvent::SearchFinished { frame, .. }
            | VisEvent::BstVisit { frame, .. }
            | VisEvent::BstSearchFinished { frame, .. }
            | VisEvent::Sort { frame, .. }
            | VisEvent::SortFinished { frame, .. }
            | VisEvent::Queen { frame, .. }
            | VisEvent::HanoiMove { frame, .. }
            | VisEvent::HanoiFinished { frame, .. }
            | VisEvent::RecursionCall { frame, .. }
            | VisEvent::RecursionFinished { frame, .. }
            | VisEvent::LoopTick { frame, .. }
            | VisEvent::LoopIdle { frame, .. }
            | VisEvent::PromiseTick { frame, .. }
            | VisEvent::PromiseSettled { frame, .. } => *frame,
        }
    }

    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        match self {
            VisEvent::SearchFinished { .. }
            | VisEvent::BstSearchFinished { .. }
            | VisEvent::SortFinished { .. }
            | VisEvent::HanoiFinished { .. }
            | VisEvent::RecursionFinished { .. }
            | VisEvent::LoopIdle { .. }
            | VisEvent::PromiseSettled { .. } => true,
            VisEvent::Queen { event, .. } => {
                matches!(event, QueenEvent::Solved | QueenEvent::Exhausted)
            }
            _ => false,
        }
    }
}

/// Wait before the solver starts on the first row.
const QUEENS_START_MS: u64 = 500;

impl Paced for VisEvent {
    fn delay(&self, pace: &Pace) -> Duration {
        let ms = match self {
            VisEvent::CellVisited { .. } => 10,
            VisEvent::PathCell { .. } => 30,
            VisEvent::BstVisit { .. } => 500,
            VisEvent::Sort { .. } => return pace.sort_step(),
            VisEvent::HanoiMove { .. } => return pace.hanoi_step(),
            VisEvent::Queen { event, .. } => match event {
                QueenEvent::EnterRow { row: 0 } => QUEENS_START_MS,
                QueenEvent::Trying { .. } | QueenEvent::Backtrack { .. } => 300,
                QueenEvent::Placed { .. } => 400,
                QueenEvent::Unsafe { .. } => 200,
                _ => 0,
            },
            VisEvent::LoopTick { .. } => 800,
            VisEvent::PromiseTick { .. } => 16,
            // Call trees and terminal events appear at once.
            _ => 0,
        };
        Duration::from_millis(ms)
    }
}
