//! Turn engine runs into event timelines.
//!
//! Each recorder drives one engine to its terminal state and appends a
//! [`VisEvent`] per observable step, closing with the run's terminal event.

use playground_async::{CombinatorRun, EventLoop};
use playground_backtrack::{solve, HanoiRun};
use playground_grid::{search, Algorithm, Grid};
use playground_sort::{SortAlgorithm, SortRun};
use playground_trees::{layout, Bst, RecursionKind, RecursionTree};

use crate::error::Result;
use crate::events::VisEvent;
use crate::playback::Timeline;

/// Visited cells in order, then the path from start to end.
pub fn search_timeline(grid: &mut Grid, algorithm: Algorithm) -> Timeline<VisEvent> {
    let outcome = search(grid, algorithm);
    let mut timeline = Timeline::new();

    for (order, &coord) in outcome.visited.iter().enumerate() {
        timeline.push_with(|frame| VisEvent::CellVisited {
            algorithm,
            coord,
            order,
            frame,
        });
    }
    for (index, &coord) in outcome.path.iter().enumerate() {
        timeline.push_with(|frame| VisEvent::PathCell { coord, index, frame });
    }
    timeline.push_with(|frame| VisEvent::SearchFinished {
        algorithm,
        found: outcome.found,
        visited: outcome.visited.len(),
        path_len: outcome.path_len(),
        frame,
    });
    timeline
}

/// Nodes compared while looking for `target`, root first.
pub fn bst_search_timeline(tree: &Bst, target: i64) -> Timeline<VisEvent> {
    let trace = tree.search(target);
    let mut timeline = Timeline::new();
    for (depth, &value) in trace.path.iter().enumerate() {
        timeline.push_with(|frame| VisEvent::BstVisit { value, depth, frame });
    }
    timeline.push_with(|frame| VisEvent::BstSearchFinished {
        target,
        found: trace.found,
        frame,
    });
    timeline
}

pub fn sort_timeline(algorithm: SortAlgorithm, input: Vec<i64>) -> Timeline<VisEvent> {
    let mut run = SortRun::new(algorithm, input);
    let mut timeline = Timeline::new();
    while let Some(step) = run.step() {
        timeline.push_with(|frame| VisEvent::Sort { step, frame });
    }
    timeline.push_with(|frame| VisEvent::SortFinished {
        algorithm,
        array: run.array().to_vec(),
        stats: run.stats(),
        frame,
    });
    timeline
}

/// The solver's full trace; it already ends in `Solved` or `Exhausted`.
pub fn nqueens_timeline(size: usize) -> Result<Timeline<VisEvent>> {
    let trace = solve(size)?;
    Ok(trace
        .events
        .into_iter()
        .enumerate()
        .map(|(frame, event)| VisEvent::Queen {
            event,
            frame: frame as u64,
        })
        .collect())
}

pub fn hanoi_timeline(disks: u32) -> Timeline<VisEvent> {
    let mut run = HanoiRun::new(disks);
    let mut timeline = Timeline::new();
    while let Some(mv) = run.step_forward() {
        let step = run.current_step() - 1;
        timeline.push_with(|frame| VisEvent::HanoiMove {
            step,
            from: mv.from,
            to: mv.to,
            frame,
        });
    }
    let towers = run.towers();
    let (disks, moves) = (towers.disks(), towers.moves());
    timeline.push_with(|frame| VisEvent::HanoiFinished { disks, moves, frame });
    timeline
}

/// Call nodes in pre-order with their layout positions.
pub fn recursion_timeline(kind: RecursionKind, n: u32) -> Timeline<VisEvent> {
    let tree = RecursionTree::build(kind, n);
    let mut timeline = Timeline::new();
    for placed in layout(&tree, &kind.layout_config()) {
        let Some(call) = tree.node(placed.node) else {
            continue;
        };
        timeline.push_with(|frame| VisEvent::RecursionCall {
            node: placed.node,
            input: call.input,
            result: call.result,
            depth: placed.depth,
            x: placed.x,
            y: placed.y,
            parent: placed.parent,
            frame,
        });
    }
    timeline.push_with(|frame| VisEvent::RecursionFinished {
        kind,
        input: tree.input(),
        result: tree.result(),
        calls: tree.node_count(),
        frame,
    });
    timeline
}

/// Tick reports until the loop goes idle or `max_ticks` run out. `LoopIdle`
/// is only appended when the loop actually drained.
pub fn event_loop_timeline(sim: &mut EventLoop, max_ticks: usize) -> Timeline<VisEvent> {
    let mut timeline = Timeline::new();
    for report in sim.run_until_idle(max_ticks) {
        timeline.push_with(|frame| VisEvent::LoopTick { report, frame });
    }
    if !sim.is_running() {
        let ticks = sim.ticks();
        timeline.push_with(|frame| VisEvent::LoopIdle { ticks, frame });
    } else {
        tracing::warn!(
            max_ticks,
            active = sim.active_count(),
            "event loop still busy at tick limit"
        );
    }
    timeline
}

/// Promise progress after every clock tick, then the outcome. A run that
/// can never settle records no ticks and no outcome.
pub fn promise_timeline(run: &mut CombinatorRun) -> Timeline<VisEvent> {
    let mut timeline = Timeline::new();
    if !run.start() {
        return timeline;
    }
    if let Some(outcome) = run.outcome().cloned() {
        timeline.push_with(|frame| VisEvent::PromiseSettled { outcome, frame });
        return timeline;
    }
    while run.is_running() && !run.is_stalled() {
        let outcome = run.tick();
        let elapsed_ms = run.elapsed_ms();
        let promises = run.promises().to_vec();
        timeline.push_with(|frame| VisEvent::PromiseTick {
            elapsed_ms,
            promises,
            frame,
        });
        if let Some(outcome) = outcome {
            timeline.push_with(|frame| VisEvent::PromiseSettled { outcome, frame });
        }
    }
    timeline
}
