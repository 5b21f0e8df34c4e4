use crate::models::Puzzle;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

const PGN_PREFIX: &str = "pgn_";
const PGN_SUFFIX: &str = ".pgn";
const PUZZLE_PREFIX: &str = "puzzle_";
const PUZZLE_SUFFIX: &str = ".json";

/// UTC, microsecond resolution: `20240101T000000000000`.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%6f";

/// Which step of [`PuzzleStorage::random_puzzle`] failed.
#[derive(Debug, Error)]
pub enum RandomPuzzleError {
    #[error("Failed to list puzzles: {0:#}")]
    List(anyhow::Error),

    #[error("Failed to read puzzle: {0:#}")]
    Read(anyhow::Error),
}

/// Flat directory of PGN and puzzle records. Records are written once and
/// never touched again, so no locking is done here.
pub struct PuzzleStorage {
    dir: PathBuf,
}

impl PuzzleStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory {}", dir.display()))?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the submitted text byte-for-byte and returns the new filename.
    pub async fn save_pgn(&self, pgn: &str) -> Result<String> {
        let filename = record_filename(PGN_PREFIX, PGN_SUFFIX, Utc::now());
        let path = self.dir.join(&filename);

        fs::write(&path, pgn)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), "Wrote pgn record");
        Ok(filename)
    }

    pub async fn save_puzzle(&self, puzzle: &Puzzle) -> Result<String> {
        let filename = record_filename(PUZZLE_PREFIX, PUZZLE_SUFFIX, Utc::now());
        let path = self.dir.join(&filename);

        // Two-space indent, non-ASCII left unescaped.
        let json = serde_json::to_string_pretty(puzzle)
            .context("Failed to serialize puzzle")?;
        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), "Wrote puzzle record");
        Ok(filename)
    }

    /// Names of all puzzle records, sorted (oldest first).
    pub async fn list_puzzles(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read directory {}", self.dir.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !is_puzzle_filename(&name) {
                continue;
            }

            // Symlinks are not followed here; a dangling one only fails if chosen.
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("Failed to read file type of {}", name))?;
            if file_type.is_file() || file_type.is_symlink() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    pub async fn load_puzzle(&self, filename: &str) -> Result<Puzzle> {
        let path = self.dir.join(filename);
        let data = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Picks one puzzle record uniformly at random. `None` when the store
    /// holds no puzzles. A chosen record that cannot be read is an error;
    /// no other record is tried in its place.
    pub async fn random_puzzle(&self) -> Result<Option<Puzzle>, RandomPuzzleError> {
        let names = self.list_puzzles().await.map_err(RandomPuzzleError::List)?;

        match pick_random(&names) {
            Some(filename) => self
                .load_puzzle(filename)
                .await
                .map(Some)
                .map_err(RandomPuzzleError::Read),
            None => Ok(None),
        }
    }
}

fn pick_random(names: &[String]) -> Option<&str> {
    let mut rng = rand::rng();
    let chosen = names.choose(&mut rng)?;

    debug!(filename = %chosen, candidates = names.len(), "Chose puzzle");
    Some(chosen.as_str())
}

fn record_filename(prefix: &str, suffix: &str, at: DateTime<Utc>) -> String {
    format!("{}{}{}", prefix, at.format(TIMESTAMP_FORMAT), suffix)
}

fn is_puzzle_filename(name: &str) -> bool {
    name.starts_with(PUZZLE_PREFIX) && name.ends_with(PUZZLE_SUFFIX)
}
