//! High score persistence
//!
//! One global slot holding the best final score. The on-disk form is a small
//! JSON record, `{"high_score": 30}`. Store failures never stop a game:
//! [`ScoreBoard`] logs them and carries on with the in-memory value.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "snake_high_score.json";

/// Backing storage for the high score
pub trait HighScoreStore {
    /// Read the stored value; `Ok(None)` if nothing has been stored yet
    fn load(&self) -> Result<Option<u32>>;

    /// Overwrite the stored value
    fn save(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse high score in {:?}", self.path))?;

        Ok(Some(record.high_score))
    }

    /// Writes a sibling temp file and renames it over the record, so a crash
    /// mid-write leaves the previous record intact
    fn save(&mut self, score: u32) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;

        let json = serde_json::to_string(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {:?}", dir))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .context("Failed to write high score temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-process store, used for tests and when persistence is switched off
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of successful `save` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// High score tracking over a store
pub struct ScoreBoard<S: HighScoreStore> {
    store: S,
    high_score: u32,
    games_played: u32,
}

impl<S: HighScoreStore> ScoreBoard<S> {
    /// Read the stored high score once, treating a missing or unreadable
    /// value as zero
    pub fn open(store: S) -> Self {
        let high_score = match store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("Could not load high score, starting from 0: {:#}", err);
                0
            }
        };

        Self {
            store,
            high_score,
            games_played: 0,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a finished session. Returns true if it set a new record.
    ///
    /// The store is written only when `score` beats the current high score.
    /// A failed write is logged and the new record is still kept in memory.
    pub fn record_final_score(&mut self, score: u32) -> bool {
        self.games_played += 1;

        if score <= self.high_score {
            return false;
        }

        self.high_score = score;
        match self.store.save(score) {
            Ok(()) => info!("New high score {} saved", score),
            Err(err) => warn!("Could not save high score {}: {:#}", score, err),
        }

        true
    }
}
