//! Random wall scattering for the maze page.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::{Grid, GridConfig};

/// Maze generation parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    /// Probability that any given cell becomes a wall
    pub density: f64,
    /// Seed for deterministic generation
    pub seed: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            density: 0.3,
            seed: 42,
        }
    }
}

/// Turn each non-marker cell into a wall independently with probability
/// `density`. Existing walls and search state are cleared first.
///
/// Returns the number of walls placed.
pub fn scatter_walls<R: Rng>(grid: &mut Grid, density: f64, rng: &mut R) -> Result<usize> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidDensity(density));
    }

    grid.clear_walls();
    let coords: Vec<_> = grid.cells().iter().map(|c| c.coord).collect();
    let mut placed = 0;
    for coord in coords {
        if rng.gen_bool(density) && grid.set_wall(coord, true) {
            placed += 1;
        }
    }

    tracing::debug!(placed, density, "scattered maze walls");
    Ok(placed)
}

/// Build a fresh grid and scatter walls over it with a seeded RNG.
pub fn generate_maze(grid_config: &GridConfig, maze_config: &MazeConfig) -> Result<Grid> {
    let mut grid = Grid::new(grid_config)?;
    let mut rng = StdRng::seed_from_u64(maze_config.seed);
    scatter_walls(&mut grid, maze_config.density, &mut rng)?;
    Ok(grid)
}
