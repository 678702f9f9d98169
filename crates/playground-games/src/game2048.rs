//! 2048 on a 4×4 board.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Board width and height.
pub const BOARD_SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Score store key for the best 2048 score.
pub const BEST_SCORE_KEY: &str = "2048-best-score";

/// Chance a spawned tile is a 2 rather than a 4.
const SPAWN_TWO_PROBABILITY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Board coordinates of line `k`, ordered from the edge tiles slide towards.
    fn line(&self, k: usize) -> [(usize, usize); BOARD_SIZE] {
        let mut coords = [(0, 0); BOARD_SIZE];
        for (i, slot) in coords.iter_mut().enumerate() {
            let back = BOARD_SIZE - 1 - i;
            *slot = match self {
                Direction::Left => (k, i),
                Direction::Right => (k, back),
                Direction::Up => (i, k),
                Direction::Down => (back, k),
            };
        }
        coords
    }
}

/// A numbered tile. Ids let a renderer animate tiles across moves; a merge
/// produces a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub value: u32,
    pub id: u64,
}

/// What a move did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Any tile changed position or value
    pub moved: bool,
    /// Points earned by merges
    pub gained: u32,
    /// This move produced the first 2048 tile
    pub reached_win: bool,
    /// No move is possible after this one
    pub game_over: bool,
}

pub type Board = [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone)]
pub struct Game2048 {
    board: Board,
    score: u32,
    won: bool,
    over: bool,
    next_id: u64,
    rng: StdRng,
}

impl Game2048 {
    /// New game with two spawned tiles.
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            won: false,
            over: false,
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        game.restart();
        game
    }

    /// Game over a fixed layout (0 is empty). Nothing is spawned.
    pub fn from_values(values: [[u32; BOARD_SIZE]; BOARD_SIZE], seed: u64) -> Self {
        let mut game = Self {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            won: false,
            over: false,
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        for (r, row) in values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    game.board[r][c] = Some(game.tile(value));
                }
            }
        }
        game.won = game.max_tile() >= WIN_TILE;
        game.over = is_stuck(&game.board);
        game
    }

    /// Clear the board and spawn two tiles. The RNG carries on.
    pub fn restart(&mut self) {
        self.board = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.score = 0;
        self.won = false;
        self.over = false;
        self.spawn_tile();
        self.spawn_tile();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tile values with 0 for empty cells.
    pub fn values(&self) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
        self.board.map(|row| row.map(|t| t.map_or(0, |t| t.value)))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn max_tile(&self) -> u32 {
        self.board.iter().flatten().flatten().map(|t| t.value).max().unwrap_or(0)
    }

    /// Slide every line towards `direction`. Each tile merges at most once
    /// per move. A move that changes nothing spawns nothing; a move after
    /// game over is ignored.
    pub fn slide(&mut self, direction: Direction) -> MoveOutcome {
        if self.over {
            return MoveOutcome { game_over: true, ..MoveOutcome::default() };
        }

        let mut outcome = MoveOutcome::default();
        for k in 0..BOARD_SIZE {
            let coords = direction.line(k);
            let line = coords.map(|(r, c)| self.board[r][c]);
            let (merged, gained) = self.merge_line(line);

            if merged.map(|t| t.map(|t| t.value)) != line.map(|t| t.map(|t| t.value)) {
                outcome.moved = true;
            }
            outcome.gained += gained;
            for ((r, c), tile) in coords.into_iter().zip(merged) {
                self.board[r][c] = tile;
            }
        }

        if !outcome.moved {
            return outcome;
        }

        self.score += outcome.gained;
        if !self.won && self.max_tile() >= WIN_TILE {
            self.won = true;
            outcome.reached_win = true;
            tracing::info!(score = self.score, "2048 reached");
        }
        self.spawn_tile();
        self.over = is_stuck(&self.board);
        outcome.game_over = self.over;
        if self.over {
            tracing::debug!(score = self.score, "2048 game over");
        }
        outcome
    }

    /// Compact a line towards index 0, merging equal neighbours once.
    fn merge_line(
        &mut self,
        line: [Option<Tile>; BOARD_SIZE],
    ) -> ([Option<Tile>; BOARD_SIZE], u32) {
        let tiles: Vec<Tile> = line.into_iter().flatten().collect();
        let mut out = [None; BOARD_SIZE];
        let mut gained = 0;
        let mut slot = 0;
        let mut i = 0;

        while i < tiles.len() {
            if i + 1 < tiles.len() && tiles[i].value == tiles[i + 1].value {
                let value = tiles[i].value * 2;
                out[slot] = Some(self.tile(value));
                gained += value;
                i += 2;
            } else {
                out[slot] = Some(tiles[i]);
                i += 1;
            }
            slot += 1;
        }
        (out, gained)
    }

    fn spawn_tile(&mut self) -> bool {
        let empty: Vec<(usize, usize)> = (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.board[r][c].is_none())
            .collect();
        if empty.is_empty() {
            return false;
        }

        let (r, c) = empty[self.rng.gen_range(0..empty.len())];
        let value = if self.rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
        self.board[r][c] = Some(self.tile(value));
        true
    }

    fn tile(&mut self, value: u32) -> Tile {
        let id = self.next_id;
        self.next_id += 1;
        Tile { value, id }
    }
}

/// No empty cell and no orthogonally adjacent equal pair.
fn is_stuck(board: &Board) -> bool {
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let Some(tile) = board[r][c] else {
                return false;
            };
            let same = |other: Option<Tile>| other.is_some_and(|o| o.value == tile.value);
            if c + 1 < BOARD_SIZE && same(board[r][c + 1]) {
                return false;
            }
            if r + 1 < BOARD_SIZE && same(board[r + 1][c]) {
                return false;
            }
        }
    }
    true
}

impl fmt::Display for Game2048 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values() {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { ".".to_string() } else { v.to_string() })
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(values: &Board) -> usize {
        values.iter().flatten().flatten().count()
    }

    #[test]
    fn new_game_has_two_tiles() {
        let game = Game2048::new(7);
        assert_eq!(tiles(game.board()), 2);
        assert!(game.values().iter().flatten().all(|&v| v == 0 || v == 2 || v == 4));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn slide_left_merges_once_per_tile() {
        let mut game = Game2048::from_values(
            [[2, 2, 2, 2], [4, 4, 8, 0], [2, 0, 2, 4], [0, 0, 0, 0]],
            1,
        );
        let outcome = game.slide(Direction::Left);
        let v = game.values();
        assert_eq!(v[0][..2], [4, 4]);
        assert_eq!(v[1][..2], [8, 8]);
        assert_eq!(v[2][..2], [4, 4]);
        assert!(outcome.moved);
        assert_eq!(outcome.gained, 4 + 4 + 8 + 4);
        assert_eq!(game.score(), 20);
        // One new tile on top of the 6 left after merging.
        assert_eq!(tiles(game.board()), 7);
    }

    #[test]
    fn slide_right_and_vertical() {
        let mut game = Game2048::from_values(
            [[0, 0, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            1,
        );
        game.slide(Direction::Right);
        assert_eq!(game.values()[0][3], 4);

        let mut game = Game2048::from_values(
            [[8, 0, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [16, 0, 0, 0]],
            1,
        );
        game.slide(Direction::Down);
        let v = game.values();
        assert_eq!((v[2][0], v[3][0]), (16, 16));
    }

    #[test]
    fn three_equal_merge_towards_edge() {
        let mut game = Game2048::from_values(
            [[0, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            3,
        );
        game.slide(Direction::Right);
        let v = game.values();
        assert_eq!((v[0][2], v[0][3]), (2, 4));
    }

    #[test]
    fn unchanged_move_spawns_nothing() {
        let mut game = Game2048::from_values(
            [[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            5,
        );
        let outcome = game.slide(Direction::Left);
        assert!(!outcome.moved);
        assert_eq!(tiles(game.board()), 2);
    }

    #[test]
    fn reaching_2048_wins() {
        let mut game = Game2048::from_values(
            [[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            9,
        );
        let outcome = game.slide(Direction::Left);
        assert!(outcome.reached_win);
        assert!(game.is_won());
        assert_eq!(game.max_tile(), 2048);
    }

    #[test]
    fn stuck_board_is_over() {
        let game = Game2048::from_values(
            [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            1,
        );
        assert!(game.is_over());

        let mut game = game;
        let outcome = game.slide(Direction::Up);
        assert!(!outcome.moved);
        assert!(outcome.game_over);
    }

    #[test]
    fn full_board_with_pair_is_not_over() {
        let game = Game2048::from_values(
            [[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]],
            1,
        );
        assert!(!game.is_over());
    }
}
