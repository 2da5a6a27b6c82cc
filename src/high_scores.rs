//! Persisted single-player high scores
//!
//! Scores live in a JSON array on disk. A missing or unreadable file is not
//! an error for the player: the list simply starts out empty.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{TruncatedVec, constants};

/// Errors that can occur while reading or writing the high-score file
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be read or written
    #[error("high score file: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents are not a valid high-score list
    #[error("high score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One finished single-player game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name the player used
    pub name: String,
    /// Correct answers before running out of lives
    pub score: u64,
    /// Day the game was played, written as `YYYY-MM-DD` but kept as text
    pub date: String,
}

impl HighScoreEntry {
    /// Creates an entry dated today (local time)
    pub fn today(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
            date: chrono::Local::now()
                .format(constants::high_scores::DATE_FORMAT)
                .to_string(),
        }
    }
}

/// The high-score list and the file backing it
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Reads the list at `path`
    ///
    /// Falls back to an empty list (and logs a warning) when the file is
    /// missing or cannot be parsed.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read(&path) {
            Ok(entries) => entries,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no high score file yet");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring high score file");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    fn read(path: &Path) -> Result<Vec<HighScoreEntry>, Error> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Appends an entry; call [`HighScores::save`] to persist it
    pub fn record(&mut self, entry: HighScoreEntry) {
        self.entries.push(entry);
    }

    /// Overwrites the backing file with the full list
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "saved high scores");
        Ok(())
    }

    /// Every entry, in the order recorded
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Best scores first, limited to the display size
    ///
    /// Equal scores keep the order in which they were recorded.
    pub fn top(&self) -> TruncatedVec<HighScoreEntry> {
        TruncatedVec::new(
            self.entries
                .iter()
                .sorted_by_key(|entry| Reverse(entry.score))
                .cloned(),
            constants::high_scores::DISPLAY_LIMIT,
            self.entries.len(),
        )
    }
}
