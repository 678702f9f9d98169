//! Playground Games
//!
//! Rules engines for the playground's board games, with no rendering or
//! input handling:
//! - [`Game2048`]: slide/merge with a seeded tile spawner
//! - [`TicTacToe`]: human `X` against a minimax `O` at three difficulties
//! - [`ScoreStore`]: best scores keyed by game, kept in a JSON file

mod error;
mod game2048;
mod scores;
mod tictactoe;

pub use error::{Error, Result};
pub use game2048::{
    Board as Board2048, Direction, Game2048, MoveOutcome, Tile, BEST_SCORE_KEY, BOARD_SIZE,
    WIN_TILE,
};
pub use scores::ScoreStore;
pub use tictactoe::{
    best_move, check_winner, minimax, Board as TicTacToeBoard, Difficulty, GameResult, GameStats,
    Mark, TicTacToe, CELLS, LINES,
};
