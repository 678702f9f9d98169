//! Grid and cell model.
//!
//! The grid is a row-major matrix of [`Cell`]s. Exactly one cell carries the
//! start marker and exactly one carries the end marker (they may be the same
//! cell); neither can ever become a wall. Search algorithms write their
//! bookkeeping (`distance`, `previous`, `is_visited`, `is_path`) into the
//! cells in place; [`Grid::reset_search`] wipes it again.

use crate::error::{Error, Result};
use crate::GridCoord;

/// Grid dimensions and marker placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Start marker
    pub start: GridCoord,
    /// End marker
    pub end: GridCoord,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 25,
            start: GridCoord::new(7, 5),
            end: GridCoord::new(7, 19),
        }
    }
}

impl GridConfig {
    /// Layout used by the maze page: markers two cells in from either side.
    pub fn maze() -> Self {
        Self {
            rows: 15,
            cols: 25,
            start: GridCoord::new(7, 2),
            end: GridCoord::new(7, 22),
        }
    }
}

/// One square of the grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub coord: GridCoord,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// Tentative distance from start; `None` is infinity.
    pub distance: Option<u32>,
    /// Predecessor on the search tree rooted at start.
    pub previous: Option<GridCoord>,
}

impl Cell {
    fn new(coord: GridCoord, start: GridCoord, end: GridCoord) -> Self {
        Self {
            coord,
            is_wall: false,
            is_start: coord == start,
            is_end: coord == end,
            is_visited: false,
            is_path: false,
            distance: None,
            previous: None,
        }
    }

    fn clear_search(&mut self) {
        self.is_visited = false;
        self.is_path = false;
        self.distance = None;
        self.previous = None;
    }
}

/// Rectangular grid of cells with a start and an end marker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    start: GridCoord,
    end: GridCoord,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build an empty grid (no walls).
    pub fn new(config: &GridConfig) -> Result<Self> {
        let GridConfig { rows, cols, start, end } = *config;
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }

        for (role, coord) in [("start", start), ("end", end)] {
            if !in_bounds(coord, rows, cols) {
                return Err(Error::OutOfBounds { role, coord, rows, cols });
            }
        }

        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| GridCoord::new(r as i32, c as i32)))
            .map(|coord| Cell::new(coord, start, end))
            .collect();

        Ok(Self { rows, cols, start, end, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> GridCoord {
        self.start
    }

    pub fn end(&self) -> GridCoord {
        self.end
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A grid always has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether a coordinate lies on the grid.
    pub fn contains(&self, coord: GridCoord) -> bool {
        in_bounds(coord, self.rows, self.cols)
    }

    /// Row-major index of a coordinate.
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }

    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, coord: GridCoord) -> Option<&mut Cell> {
        self.index_of(coord).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate one row of cells.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Set or clear a wall. Start, end and off-grid coordinates are ignored.
    ///
    /// Returns true if the cell changed.
    pub fn set_wall(&mut self, coord: GridCoord, wall: bool) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.is_start && !cell.is_end && cell.is_wall != wall => {
                cell.is_wall = wall;
                true
            }
            _ => false,
        }
    }

    /// Flip the wall flag of a cell (same restrictions as [`Grid::set_wall`]).
    pub fn toggle_wall(&mut self, coord: GridCoord) -> bool {
        match self.cell(coord) {
            Some(cell) => {
                let wall = !cell.is_wall;
                self.set_wall(coord, wall)
            }
            None => false,
        }
    }

    pub fn is_wall(&self, coord: GridCoord) -> bool {
        self.cell(coord).is_some_and(|c| c.is_wall)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Clear all search bookkeeping; walls stay.
    pub fn reset_search(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_search);
    }

    /// Clear bookkeeping and walls.
    pub fn clear_walls(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search();
            cell.is_wall = false;
        }
    }

    /// Coordinates of visited cells.
    pub fn visited(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells.iter().filter(|c| c.is_visited).map(|c| c.coord)
    }

    /// Coordinates of cells on the marked path.
    pub fn path_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells.iter().filter(|c| c.is_path).map(|c| c.coord)
    }
}

fn in_bounds(coord: GridCoord, rows: usize, cols: usize) -> bool {
    coord.row >= 0 && coord.col >= 0 && (coord.row as usize) < rows && (coord.col as usize) < cols
}
