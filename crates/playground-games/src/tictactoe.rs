//! Tic-tac-toe against a minimax opponent.
//!
//! The human plays `X` and always moves first; the computer plays `O`.
//! Minimax scores a position from `O`'s side: `10 - depth` for an `O` win,
//! `depth - 10` for an `X` win, 0 for a draw, so faster wins and slower
//! losses are preferred.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cells on the board, indexed row-major 0..9.
pub const CELLS: usize = 9;

/// The eight winning lines.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

pub type Board = [Option<Mark>; CELLS];

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameResult {
    Win { mark: Mark, line: [usize; 3] },
    Draw,
}

/// Winner and line, a draw on a full board, or `None` while play continues.
pub fn check_winner(board: &Board) -> Option<GameResult> {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(mark) = board[a] {
            if board[b] == Some(mark) && board[c] == Some(mark) {
                return Some(GameResult::Win { mark, line });
            }
        }
    }
    if board.iter().all(Option::is_some) {
        return Some(GameResult::Draw);
    }
    None
}

/// Score of `board` with `O` to move when `maximizing`.
pub fn minimax(board: &mut Board, depth: i32, maximizing: bool) -> i32 {
    match check_winner(board) {
        Some(GameResult::Win { mark: Mark::O, .. }) => return 10 - depth,
        Some(GameResult::Win { mark: Mark::X, .. }) => return depth - 10,
        Some(GameResult::Draw) => return 0,
        None => {}
    }

    let (mark, mut best) = if maximizing { (Mark::O, i32::MIN) } else { (Mark::X, i32::MAX) };
    for i in 0..CELLS {
        if board[i].is_some() {
            continue;
        }
        board[i] = Some(mark);
        let score = minimax(board, depth + 1, !maximizing);
        board[i] = None;
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

/// Best cell for `O`; the lowest index wins ties.
pub fn best_move(board: &Board) -> Option<usize> {
    let mut scratch = *board;
    let mut best: Option<(usize, i32)> = None;
    for i in 0..CELLS {
        if scratch[i].is_some() {
            continue;
        }
        scratch[i] = Some(Mark::O);
        let score = minimax(&mut scratch, 0, false);
        scratch[i] = None;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Opponent strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty cell
    Easy,
    /// Minimax half of the time, random otherwise
    Medium,
    /// Always minimax
    #[default]
    Impossible,
}

/// Results across games, from the human's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl GameStats {
    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win { mark: Mark::X, .. } => self.wins += 1,
            GameResult::Win { mark: Mark::O, .. } => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    to_move: Mark,
    result: Option<GameResult>,
    difficulty: Difficulty,
    stats: GameStats,
    rng: StdRng,
}

impl TicTacToe {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            board: [None; CELLS],
            to_move: Mark::X,
            result: None,
            difficulty,
            stats: GameStats::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Carry over stats from an earlier session.
    pub fn with_stats(mut self, stats: GameStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Place the human's `X`.
    pub fn player_move(&mut self, cell: usize) -> Result<Option<GameResult>> {
        self.place(Mark::X, cell)
    }

    /// Let the computer place its `O`. Returns the chosen cell and the result
    /// if the game ended.
    pub fn computer_move(&mut self) -> Result<(usize, Option<GameResult>)> {
        let cell = self.choose_cell().ok_or(Error::GameOver)?;
        let result = self.place(Mark::O, cell)?;
        Ok((cell, result))
    }

    /// Clear the board; stats are kept.
    pub fn new_game(&mut self) {
        self.board = [None; CELLS];
        self.to_move = Mark::X;
        self.result = None;
    }

    pub fn reset_stats(&mut self) {
        self.stats = GameStats::default();
    }

    fn place(&mut self, mark: Mark, cell: usize) -> Result<Option<GameResult>> {
        if self.result.is_some() {
            return Err(Error::GameOver);
        }
        if mark != self.to_move {
            return Err(Error::NotYourTurn(if mark == Mark::X { "X" } else { "O" }));
        }
        match self.board.get(cell) {
            None => return Err(Error::InvalidCell(cell)),
            Some(Some(_)) => return Err(Error::CellTaken(cell)),
            Some(None) => {}
        }

        self.board[cell] = Some(mark);
        self.to_move = mark.opponent();
        self.result = check_winner(&self.board);
        if let Some(result) = self.result {
            self.stats.record(result);
            tracing::debug!(?result, "tic-tac-toe finished");
        }
        Ok(self.result)
    }

    fn choose_cell(&mut self) -> Option<usize> {
        let empty: Vec<usize> = (0..CELLS).filter(|&i| self.board[i].is_none()).collect();
        if empty.is_empty() || self.result.is_some() {
            return None;
        }
        let use_minimax = match self.difficulty {
            Difficulty::Easy => false,
            Difficulty::Medium => self.rng.gen_bool(0.5),
            Difficulty::Impossible => true,
        };
        if use_minimax {
            best_move(&self.board)
        } else {
            Some(empty[self.rng.gen_range(0..empty.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        let mut b = [None; CELLS];
        for (i, ch) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            b[i] = match ch {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            };
        }
        b
    }

    #[test]
    fn winner_detection() {
        assert_eq!(
            check_winner(&board("XXX OO. ...")),
            Some(GameResult::Win { mark: Mark::X, line: [0, 1, 2] })
        );
        assert_eq!(
            check_winner(&board("O.X .OX ..O")),
            Some(GameResult::Win { mark: Mark::O, line: [0, 4, 8] })
        );
        assert_eq!(check_winner(&board("XOX XOO OXX")), Some(GameResult::Draw));
        assert_eq!(check_winner(&board("X.. ... ...")), None);
    }

    #[test]
    fn takes_the_win() {
        // O completes the middle row rather than blocking.
        assert_eq!(best_move(&board("XX. OO. X..")), Some(5));
    }

    #[test]
    fn blocks_the_loss() {
        assert_eq!(best_move(&board("XX. .O. ...")), Some(2));
    }

    #[test]
    fn depth_prefers_faster_win() {
        let mut b = board("OO. XX. X..");
        b[2] = Some(Mark::O);
        assert_eq!(minimax(&mut b, 1, false), 9);
    }

    #[test]
    fn rejects_bad_moves() {
        let mut game = TicTacToe::new(Difficulty::Impossible, 1);
        assert!(matches!(game.player_move(9), Err(Error::InvalidCell(9))));
        game.player_move(4).unwrap();
        assert!(matches!(game.player_move(0), Err(Error::NotYourTurn("X"))));
        game.computer_move().unwrap();
        assert!(matches!(game.player_move(4), Err(Error::CellTaken(4))));
    }

    /// Every line of human play against the impossible AI.
    fn explore(game: &TicTacToe, outcomes: &mut GameStats) {
        for cell in 0..CELLS {
            if game.board()[cell].is_some() {
                continue;
            }
            let mut next = game.clone();
            match next.player_move(cell).unwrap() {
                Some(result) => outcomes.record(result),
                None => match next.computer_move().unwrap() {
                    (_, Some(result)) => outcomes.record(result),
                    (_, None) => explore(&next, outcomes),
                },
            }
        }
    }

    #[test]
    fn impossible_never_loses() {
        let mut outcomes = GameStats::default();
        explore(&TicTacToe::new(Difficulty::Impossible, 0), &mut outcomes);
        assert_eq!(outcomes.wins, 0);
        assert!(outcomes.draws > 0 && outcomes.losses > 0);
    }

    #[test]
    fn stats_follow_results() {
        let mut game = TicTacToe::new(Difficulty::Impossible, 0);
        // X opens in a corner, then always takes the first free cell.
        game.player_move(0).unwrap();
        game.computer_move().unwrap();
        while game.result().is_none() {
            let cell = (0..CELLS).find(|&i| game.board()[i].is_none()).unwrap();
            if game.player_move(cell).unwrap().is_none() {
                game.computer_move().unwrap();
            }
        }
        assert_eq!(game.stats().games(), 1);
        assert_eq!(game.stats().wins, 0);

        game.new_game();
        assert!(game.board().iter().all(Option::is_none));
        assert_eq!(game.stats().games(), 1);
    }

    #[test]
    fn easy_plays_legal_moves() {
        let mut game = TicTacToe::new(Difficulty::Easy, 11);
        for round in 0..4 {
            game.player_move((0..CELLS).find(|&i| game.board()[i].is_none()).unwrap()).unwrap();
            if game.result().is_some() {
                break;
            }
            let (cell, result) = game.computer_move().unwrap();
            assert_eq!(game.board()[cell], Some(Mark::O), "round {}", round);
            if result.is_some() {
                break;
            }
        }
    }
}
