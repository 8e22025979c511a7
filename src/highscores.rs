//! Best-effort score and coin persistence
//!
//! Stored as JSON files in a data directory. All I/O failures degrade to
//! defaults with a warning; the game never blocks on persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SCORES_FILE: &str = "roguebolt_highscores.json";
const COINS_FILE: &str = "roguebolt_coins.json";
const MAX_SCORES: usize = 10;
const COINS_PER_1000_POINTS: u64 = 5;

/// One finished run on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub level_reached: u32,
    /// Unix timestamp (seconds) when the run ended
    pub timestamp: u64,
}

/// Scoreboard kept sorted by score, descending, capped at [`MAX_SCORES`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

/// Rank report returned when submitting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRank {
    /// 1-based display rank
    pub rank: usize,
    pub on_board: bool,
}

impl HighScores {
    /// Load from `dir`, degrading to an empty board on any failure.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SCORES_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("corrupt highscore file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist to `dir`; failures are logged and swallowed.
    pub fn save(&self, dir: &Path) {
        let path = dir.join(SCORES_FILE);
        let raw = match serde_json::to_string_pretty(self) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("highscore serialization failed: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&path, raw) {
            log::warn!("could not write {}: {e}", path.display());
        }
    }

    /// Insert a finished run at its rank, trimming past the cap.
    pub fn submit(&mut self, score: u64, level_reached: u32) -> ScoreRank {
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            rank,
            HighScoreEntry {
                score,
                level_reached,
                timestamp: now_unix(),
            },
        );
        self.entries.truncate(MAX_SCORES);
        ScoreRank {
            rank: rank + 1,
            on_board: rank < MAX_SCORES,
        }
    }

    pub fn top_score(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }
}

/// Coins banked for a score: 5 per full 1000 points.
pub fn coins_for_score(score: u64) -> u64 {
    score / 1000 * COINS_PER_1000_POINTS
}

/// Read the banked coin total, defaulting to zero.
pub fn load_coins(dir: &Path) -> u64 {
    let path = dir.join(COINS_FILE);
    match fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("corrupt coin file {}: {e}", path.display());
            0
        }),
        Err(_) => 0,
    }
}

/// Add to the banked coin total; returns the new total.
pub fn add_coins(dir: &Path, amount: u64) -> u64 {
    let total = load_coins(dir) + amount;
    let path = dir.join(COINS_FILE);
    if let Err(e) = fs::write(&path, total.to_string()) {
        log::warn!("could not write {}: {e}", path.display());
    }
    total
}

/// Record a finished run: scoreboard entry plus earned coins. Best-effort.
pub fn record_run(dir: &Path, score: u64, level_reached: u32) -> ScoreRank {
    let mut scores = HighScores::load(dir);
    let rank = scores.submit(score, level_reached);
    scores.save(dir);
    let coins = coins_for_score(score);
    if coins > 0 {
        add_coins(dir, coins);
    }
    rank
}

/// Data directory: `ROGUEBOLT_DATA_DIR` when set, the working directory
/// otherwise.
pub fn data_dir() -> PathBuf {
    std::env::var_os("ROGUEBOLT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_keeps_descending_order() {
        let mut scores = HighScores::default();
        scores.submit(500, 2);
        scores.submit(1500, 4);
        scores.submit(1000, 3);
        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, [1500, 1000, 500]);
        assert_eq!(scores.top_score(), 1500);
    }

    #[test]
    fn submit_reports_display_rank() {
        let mut scores = HighScores::default();
        assert_eq!(scores.submit(500, 1).rank, 1);
        assert_eq!(scores.submit(1000, 2).rank, 1);
        let rank = scores.submit(100, 1);
        assert_eq!(rank.rank, 3);
        assert!(rank.on_board);
    }

    #[test]
    fn board_is_capped() {
        let mut scores = HighScores::default();
        for i in 0..15 {
            scores.submit(i * 100, 1);
        }
        assert_eq!(scores.entries.len(), MAX_SCORES);
        // Lowest surviving score is the 10th best
        assert_eq!(scores.entries.last().unwrap().score, 500);
    }

    #[test]
    fn ties_rank_below_existing_entries() {
        let mut scores = HighScores::default();
        scores.submit(1000, 2);
        assert_eq!(scores.submit(1000, 3).rank, 2);
    }

    #[test]
    fn coin_conversion_floors_per_thousand() {
        assert_eq!(coins_for_score(0), 0);
        assert_eq!(coins_for_score(999), 0);
        assert_eq!(coins_for_score(1000), 5);
        assert_eq!(coins_for_score(2999), 10);
    }

    #[test]
    fn load_from_missing_dir_is_empty() {
        let scores = HighScores::load(Path::new("/nonexistent/nowhere"));
        assert!(scores.entries.is_empty());
        assert_eq!(load_coins(Path::new("/nonexistent/nowhere")), 0);
    }
}
