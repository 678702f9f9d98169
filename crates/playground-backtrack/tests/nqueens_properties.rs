//! Property tests for the N-Queens solver.

use proptest::prelude::*;

use playground_backtrack::{solve, QueenBoard, QueenEvent};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_solutions_are_valid(size in 4usize..=8) {
        let trace = solve(size).unwrap();
        let queens = trace.solution.clone().unwrap();

        prop_assert_eq!(queens.len(), size);
        let mut rows: Vec<_> = queens.iter().map(|q| q.row).collect();
        let mut cols: Vec<_> = queens.iter().map(|q| q.col).collect();
        rows.sort_unstable();
        cols.sort_unstable();
        prop_assert_eq!(rows, (0..size).collect::<Vec<_>>());
        prop_assert_eq!(cols, (0..size).collect::<Vec<_>>());

        for (i, a) in queens.iter().enumerate() {
            for b in &queens[i + 1..] {
                prop_assert_ne!(a.row.abs_diff(b.row), a.col.abs_diff(b.col));
            }
        }
    }

    #[test]
    fn prop_trace_has_one_terminal_event(size in 1usize..=8) {
        let trace = solve(size).unwrap();
        let terminals = trace
            .events
            .iter()
            .filter(|e| matches!(e, QueenEvent::Solved | QueenEvent::Exhausted))
            .count();
        prop_assert_eq!(terminals, 1);
        prop_assert_eq!(
            trace.events.last() == Some(&QueenEvent::Solved),
            trace.is_solved()
        );
    }

    #[test]
    fn prop_replay_never_holds_attacking_queens(size in 1usize..=7) {
        let trace = solve(size).unwrap();
        let mut board = QueenBoard::new(size);
        for event in &trace.events {
            board.apply(event);
            for (i, a) in board.queens.iter().enumerate() {
                for b in &board.queens[i + 1..] {
                    prop_assert!(!a.attacks(b));
                }
            }
        }
        prop_assert!(board.finished);
    }
}
