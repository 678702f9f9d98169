//! Row/column coordinates on the search grid.
//!
//! Rows grow downward and columns grow to the right. Coordinates are signed so
//! that direction offsets can be added without wrapping; a coordinate with a
//! negative component is simply outside every grid.

use std::ops::Add;

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    /// Row index (0 = top)
    pub row: i32,
    /// Column index (0 = left)
    pub col: i32,
}

impl GridCoord {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// The four orthogonal directions, in the order neighbors are enumerated.
    pub const ORTHOGONAL_DIRECTIONS: [Self; 4] = [
        Self { row: -1, col: 0 }, // Up
        Self { row: 1, col: 0 },  // Down
        Self { row: 0, col: -1 }, // Left
        Self { row: 0, col: 1 },  // Right
    ];

    /// Create a new coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance: |Δrow| + |Δcol|.
    ///
    /// This is the A* heuristic. It is admissible because every move costs 1
    /// and only orthogonal moves exist.
    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }

    /// The four orthogonal neighbors, without any bounds checks.
    pub fn orthogonal_neighbors(&self) -> [Self; 4] {
        Self::ORTHOGONAL_DIRECTIONS.map(|d| *self + d)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            row: self.row + other.row,
            col: self.col + other.col,
        }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
