//! Depth-first search.
//!
//! LIFO frontier. A cell may sit on the stack several times (pushed by
//! different parents) but is processed once: the visited check happens at pop
//! time. The entry that wins is the one popped first, and it carries its own
//! parent. No shortest-path guarantee.

use crate::neighbors::Neighbors;
use crate::{Grid, GridCoord, STEP_COST};

use super::{distance_of, is_visited, mark_visited};

/// Run DFS from `start` until `end` is popped or the stack is empty.
///
/// Returns the cells in processing order.
pub fn dfs(grid: &mut Grid, start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    let mut visited = Vec::new();
    let mut stack: Vec<(GridCoord, Option<GridCoord>)> = vec![(start, None)];

    while let Some((current, parent)) = stack.pop() {
        if is_visited(grid, current) {
            continue;
        }

        let distance = match parent {
            Some(p) => distance_of(grid, p).map(|d| d + STEP_COST),
            None => Some(0),
        };
        if let Some(cell) = grid.cell_mut(current) {
            cell.previous = parent;
            cell.distance = distance;
        }
        mark_visited(grid, current, &mut visited);
        if current == end {
            break;
        }

        for neighbor in Neighbors::open(grid, current) {
            if !is_visited(grid, neighbor) {
                stack.push((neighbor, Some(current)));
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridConfig;

    #[test]
    fn goes_deep_before_wide() {
        let mut grid = Grid::new(&GridConfig::default()).unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = dfs(&mut grid, start, end);

        // Rightmost neighbor is pushed last, so it is explored first.
        assert_eq!(visited[0], start);
        assert_eq!(visited[1], GridCoord::new(7, 6));
        assert_eq!(visited[2], GridCoord::new(7, 7));
    }

    #[test]
    fn parents_are_visited_cells() {
        let mut grid = Grid::new(&GridConfig::default()).unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = dfs(&mut grid, start, end);

        for coord in visited.iter().skip(1) {
            let parent = grid.cell(*coord).and_then(|c| c.previous).unwrap();
            assert!(grid.cell(parent).unwrap().is_visited);
        }
    }
}
