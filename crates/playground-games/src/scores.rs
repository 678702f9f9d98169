//! Best-score persistence as a small JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tictactoe::GameStats;

/// Best score per game, plus the tic-tac-toe tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStore {
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(default)]
    best: BTreeMap<String, u64>,
    #[serde(default)]
    tic_tac_toe: GameStats,
}

impl ScoreStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`, or start empty if the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut store = if path.exists() {
            let data = fs::read(&path)?;
            serde_json::from_slice::<ScoreStore>(&data)?
        } else {
            Self::default()
        };
        tracing::debug!(path = %path.display(), games = store.best.len(), "score store opened");
        store.path = Some(path);
        Ok(store)
    }

    pub fn best(&self, game: &str) -> Option<u64> {
        self.best.get(game).copied()
    }

    /// Keep `score` if it beats the stored best. Returns true on a new best.
    pub fn record(&mut self, game: &str, score: u64) -> bool {
        match self.best.get(game) {
            Some(&best) if best >= score => false,
            _ => {
                self.best.insert(game.to_string(), score);
                true
            }
        }
    }

    pub fn tic_tac_toe(&self) -> GameStats {
        self.tic_tac_toe
    }

    pub fn set_tic_tac_toe(&mut self, stats: GameStats) {
        self.tic_tac_toe = stats;
    }

    /// Write to the backing file, creating parent directories. A no-op for
    /// in-memory stores.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
