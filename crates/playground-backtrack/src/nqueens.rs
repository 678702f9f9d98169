//! N-Queens by backtracking, recorded as an event trace.
//!
//! Rows are filled top to bottom and columns tried left to right. For every
//! candidate square the trace holds a `Trying` event followed by either
//! `Unsafe`, or `Safe` then `Placed`. When every column of a deeper row fails
//! the queen above is taken back with a `Backtrack` event. The trace ends
//! with exactly one of `Solved` or `Exhausted`.

use crate::error::{Error, Result};

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Same row, same column or same diagonal.
    pub fn attacks(&self, other: &Position) -> bool {
        self.row == other.row
            || self.col == other.col
            || self.row.abs_diff(other.row) == self.col.abs_diff(other.col)
    }
}

/// Whether a queen at `candidate` would be attacked by any of `queens`.
pub fn is_safe(queens: &[Position], candidate: Position) -> bool {
    !queens.iter().any(|q| q.attacks(&candidate))
}

/// One observable step of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum QueenEvent {
    /// Solver starts working on a row
    EnterRow { row: usize },
    /// Candidate square under test
    Trying { pos: Position },
    /// Candidate is not attacked
    Safe { pos: Position },
    /// Candidate is attacked
    Unsafe { pos: Position },
    /// Queen put down on the candidate
    Placed { pos: Position },
    /// Queen removed after the rows below it failed
    Backtrack { pos: Position },
    /// Every row holds a queen
    Solved,
    /// Every placement was tried without success
    Exhausted,
}

/// Full record of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NQueensTrace {
    pub size: usize,
    pub events: Vec<QueenEvent>,
    /// Queens in row order, if a solution exists
    pub solution: Option<Vec<Position>>,
}

impl NQueensTrace {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Number of queens taken back.
    pub fn backtracks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, QueenEvent::Backtrack { .. }))
            .count()
    }
}

/// Largest board [`solve`] accepts. Traces grow exponentially past it.
pub const MAX_BOARD_SIZE: usize = 8;

/// Solve for an `size × size` board.
pub fn solve(size: usize) -> Result<NQueensTrace> {
    if size == 0 {
        return Err(Error::EmptyBoard);
    }
    if size > MAX_BOARD_SIZE {
        return Err(Error::BoardTooLarge { size, max: MAX_BOARD_SIZE });
    }

    let mut queens = Vec::with_capacity(size);
    let mut events = Vec::new();
    let solved = place_row(size, 0, &mut queens, &mut events);

    if solved {
        events.push(QueenEvent::Solved);
    } else {
        events.push(QueenEvent::Exhausted);
    }
    tracing::debug!(size, solved, events = events.len(), "n-queens finished");

    Ok(NQueensTrace {
        size,
        events,
        solution: solved.then_some(queens),
    })
}

fn place_row(
    size: usize,
    row: usize,
    queens: &mut Vec<Position>,
    events: &mut Vec<QueenEvent>,
) -> bool {
    if row == size {
        return true;
    }
    events.push(QueenEvent::EnterRow { row });

    for col in 0..size {
        let pos = Position::new(row, col);
        events.push(QueenEvent::Trying { pos });

        if !is_safe(queens, pos) {
            events.push(QueenEvent::Unsafe { pos });
            continue;
        }

        events.push(QueenEvent::Safe { pos });
        queens.push(pos);
        events.push(QueenEvent::Placed { pos });

        if place_row(size, row + 1, queens, events) {
            return true;
        }

        queens.pop();
        events.push(QueenEvent::Backtrack { pos });
    }
    false
}

/// Board state rebuilt from events, as shown between steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueenBoard {
    pub size: usize,
    pub queens: Vec<Position>,
    pub trying: Option<Position>,
    pub current_row: Option<usize>,
    pub solved: bool,
    pub finished: bool,
}

impl QueenBoard {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Fold one event into the board.
    pub fn apply(&mut self, event: &QueenEvent) {
        match *event {
            QueenEvent::EnterRow { row } => self.current_row = Some(row),
            QueenEvent::Trying { pos } => self.trying = Some(pos),
            QueenEvent::Safe { .. } | QueenEvent::Unsafe { .. } => {}
            QueenEvent::Placed { pos } => {
                self.queens.push(pos);
                self.trying = None;
            }
            QueenEvent::Backtrack { pos } => {
                self.queens.retain(|q| *q != pos);
                self.current_row = Some(pos.row);
            }
            QueenEvent::Solved | QueenEvent::Exhausted => {
                self.solved = matches!(event, QueenEvent::Solved);
                self.finished = true;
                self.trying = None;
                self.current_row = None;
            }
        }
    }

    pub fn has_queen(&self, pos: Position) -> bool {
        self.queens.contains(&pos)
    }

    /// Empty square covered by a placed queen.
    pub fn is_under_attack(&self, pos: Position) -> bool {
        !self.has_queen(pos) && !is_safe(&self.queens, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(size: usize, queens: &[Position]) {
        assert_eq!(queens.len(), size);
        for (i, a) in queens.iter().enumerate() {
            for b in &queens[i + 1..] {
                assert!(!a.attacks(b), "{:?} attacks {:?}", a, b);
            }
        }
    }

    #[test]
    fn zero_board_rejected() {
        assert!(matches!(solve(0), Err(Error::EmptyBoard)));
    }

    #[test]
    fn oversized_board_rejected() {
        assert!(solve(MAX_BOARD_SIZE).unwrap().is_solved());
        assert!(matches!(
            solve(MAX_BOARD_SIZE + 1),
            Err(Error::BoardTooLarge { size: 9, max: 8 })
        ));
        assert!(solve(usize::MAX).is_err());
    }

    #[test]
    fn single_square() {
        let trace = solve(1).unwrap();
        assert_eq!(trace.solution, Some(vec![Position::new(0, 0)]));
        assert_eq!(trace.events.last(), Some(&QueenEvent::Solved));
    }

    #[test]
    fn two_and_three_have_no_solution() {
        for size in [2, 3] {
            let trace = solve(size).unwrap();
            assert!(!trace.is_solved());
            assert_eq!(trace.events.last(), Some(&QueenEvent::Exhausted));
        }
    }

    #[test]
    fn four_queens_first_solution() {
        let trace = solve(4).unwrap();
        let expected = vec![
            Position::new(0, 1),
            Position::new(1, 3),
            Position::new(2, 0),
            Position::new(3, 2),
        ];
        assert_eq!(trace.solution, Some(expected));
        assert!(trace.backtracks() > 0);
    }

    #[test]
    fn eight_queens_valid() {
        let trace = solve(8).unwrap();
        assert_valid(8, trace.solution.as_deref().unwrap());
    }

    #[test]
    fn every_trying_is_resolved() {
        let trace = solve(5).unwrap();
        for (i, event) in trace.events.iter().enumerate() {
            if let QueenEvent::Trying { pos } = event {
                let next = trace.events[i + 1];
                assert!(
                    next == QueenEvent::Safe { pos: *pos }
                        || next == QueenEvent::Unsafe { pos: *pos },
                    "trying {:?} followed by {:?}",
                    pos,
                    next
                );
            }
            if let QueenEvent::Safe { pos } = event {
                assert_eq!(trace.events[i + 1], QueenEvent::Placed { pos: *pos });
            }
        }
    }

    #[test]
    fn replaying_events_reaches_solution() {
        let trace = solve(6).unwrap();
        let mut board = QueenBoard::new(6);
        for event in &trace.events {
            board.apply(event);
            assert!(board.queens.len() <= 6);
        }
        assert!(board.finished && board.solved);
        assert_eq!(Some(board.queens), trace.solution);
    }

    #[test]
    fn attack_detection() {
        let mut board = QueenBoard::new(4);
        board.apply(&QueenEvent::Placed { pos: Position::new(0, 0) });
        assert!(board.is_under_attack(Position::new(3, 3)));
        assert!(board.is_under_attack(Position::new(0, 2)));
        assert!(!board.is_under_attack(Position::new(1, 2)));
        assert!(!board.is_under_attack(Position::new(0, 0)));
    }
}
