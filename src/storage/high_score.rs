//! High-score persistence
//!
//! Scores live in a small JSON object mapping keys to values, so other
//! entries written by future versions survive a rewrite. The game only uses
//! [`HIGH_SCORE_KEY`].

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key under which the best score is stored
pub const HIGH_SCORE_KEY: &str = "neon-snake-highscore";

/// File-backed store holding the all-time best score
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    entries: BTreeMap<String, u32>,
}

impl HighScoreStore {
    /// Open the store, reading the file once
    ///
    /// A missing file starts from zero. An unreadable or corrupt file is
    /// logged and also treated as empty; it is overwritten on the next
    /// record.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read high score file {:?}", path))?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(?path, %err, "ignoring corrupt high score file");
                    BTreeMap::new()
                }
            }
        } else {
            debug!(?path, "no high score file yet");
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best score recorded so far
    pub fn best(&self) -> u32 {
        self.entries.get(HIGH_SCORE_KEY).copied().unwrap_or(0)
    }

    /// Persist `score` if it beats the stored best
    ///
    /// Returns `true` when the file was rewritten. The stored value never
    /// decreases.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best() {
            return Ok(false);
        }

        self.entries.insert(HIGH_SCORE_KEY.to_string(), score);
        self.save()?;
        info!(score, "new high score");
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize high scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}
