//! Best-score persistence for the sliding-merge game.
//!
//! The file is a single JSON object, `{"high_score": N}`. The lenient
//! `load`/`save` pair never fails: a missing or malformed file reads as 0
//! and a failed write is logged and dropped. `try_load`/`try_save` surface
//! the underlying `StoreError` instead.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::StoreError;

/// Default file name, relative to the working directory.
pub const DEFAULT_PATH: &str = "2048_highscore.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    high_score: u64,
}

/// A best score stored in one JSON file.
#[derive(Clone, Debug)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl Default for BestScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored best score.
    pub fn try_load(&self) -> Result<u64, StoreError> {
        let file = File::open(&self.path)?;
        let stored: ScoreFile = serde_json::from_reader(BufReader::new(file))?;
        Ok(stored.high_score)
    }

    /// Overwrite the stored best score.
    pub fn try_save(&self, score: u64) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, &ScoreFile { high_score: score })?;
        writer.flush()?;
        Ok(())
    }

    /// Stored best score, or 0 if the file is missing or unreadable.
    #[must_use]
    pub fn load(&self) -> u64 {
        self.try_load().unwrap_or(0)
    }

    /// Store `score`, logging instead of failing.
    pub fn save(&self, score: u64) {
        if let Err(err) = self.try_save(score) {
            warn!("could not save best score to {:?}: {err}", self.path);
        }
    }

    /// Save `score` if it beats the stored best. Returns whether it did.
    pub fn record(&self, score: u64) -> bool {
        if score <= self.load() {
            return false;
        }
        self.save(score);
        true
    }
}
