//! Property tests for the grid search engine.
//!
//! Grids are kept small (≤ 12×12) so that the linear-scan Dijkstra stays fast
//! across many cases.

use proptest::prelude::*;

use playground_grid::{search, Algorithm, Grid, GridConfig, GridCoord};

// ── Strategies ───────────────────────────────────────────────────────────

/// Dimensions plus start/end markers inside them.
fn grid_config() -> impl Strategy<Value = GridConfig> {
    (1usize..=12, 1usize..=12).prop_flat_map(|(rows, cols)| {
        let coord =
            move || (0..rows as i32, 0..cols as i32).prop_map(|(r, c)| GridCoord::new(r, c));
        (coord(), coord()).prop_map(move |(start, end)| GridConfig { rows, cols, start, end })
    })
}

/// A config together with a wall mask (one flag per cell).
fn walled_grid() -> impl Strategy<Value = Grid> {
    grid_config().prop_flat_map(|config| {
        let cells = config.rows * config.cols;
        proptest::collection::vec(proptest::bool::weighted(0.3), cells).prop_map(move |mask| {
            let mut grid = Grid::new(&config).expect("strategy yields valid configs");
            for (i, wall) in mask.into_iter().enumerate() {
                if wall {
                    let coord = GridCoord::new((i / config.cols) as i32, (i % config.cols) as i32);
                    grid.set_wall(coord, true);
                }
            }
            grid
        })
    })
}

// ── Shortest paths on open grids ─────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_open_grid_paths_are_manhattan(config in grid_config()) {
        let manhattan = config.start.manhattan_distance(&config.end) as usize;

        for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar] {
            let mut grid = Grid::new(&config).unwrap();
            let outcome = search(&mut grid, algorithm);

            prop_assert!(outcome.found);
            prop_assert_eq!(
                outcome.path_len(),
                manhattan,
                "algorithm={} start={} end={}",
                algorithm,
                config.start,
                config.end
            );
        }
    }
}

// ── Termination and agreement with walls ─────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_all_algorithms_terminate_and_agree(grid in walled_grid()) {
        let outcomes: Vec<_> = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                let mut g = grid.clone();
                search(&mut g, algorithm)
            })
            .collect();

        let found = outcomes[0].found;
        for outcome in &outcomes {
            prop_assert_eq!(outcome.found, found, "algorithm={}", outcome.algorithm);
            prop_assert!(outcome.visited.len() <= grid.len());
            if !found {
                prop_assert!(outcome.path.is_empty());
            }
        }

        let optimal: Vec<_> = outcomes
            .iter()
            .filter(|o| o.algorithm.is_optimal())
            .map(|o| o.path_len())
            .collect();
        prop_assert!(optimal.windows(2).all(|w| w[0] == w[1]), "lengths={:?}", optimal);
    }

    #[test]
    fn prop_paths_are_contiguous_and_open(grid in walled_grid()) {
        for algorithm in Algorithm::ALL {
            let mut g = grid.clone();
            let outcome = search(&mut g, algorithm);

            for pair in outcome.path.windows(2) {
                prop_assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
            }
            for coord in &outcome.path {
                prop_assert!(!g.is_wall(*coord));
            }
            if outcome.found && !outcome.path.is_empty() {
                prop_assert_eq!(outcome.path[0], g.start());
                prop_assert_eq!(*outcome.path.last().unwrap(), g.end());
            }
        }
    }
}
