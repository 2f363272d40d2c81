//! # Score Store
//!
//! Key-value integer persistence and the high-score rule built on it.
//!
//! The file store keeps a flat TOML table (`hiscore = 42`) and replaces the
//! whole file through a temporary sibling, so a crash mid-write leaves the
//! previous record intact.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tris_shared::HISCORE_KEY;

use crate::error::{BridgeError, BridgeResult};

/// Integer key-value storage.
pub trait ScoreStore: Send {
    /// Reads a value. `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Store`] if the backing storage is unreadable.
    fn get_int(&self, key: &str) -> BridgeResult<Option<i64>>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Store`] if the value could not be persisted.
    fn put_int(&mut self, key: &str, value: i64) -> BridgeResult<()>;
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    values: HashMap<String, i64>,
    writes: u64,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one value.
    #[must_use]
    pub fn with_value(key: &str, value: i64) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_owned(), value);
        Self { values, writes: 0 }
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get_int(&self, key: &str) -> BridgeResult<Option<i64>> {
        Ok(self.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i64) -> BridgeResult<()> {
        self.values.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}

// ============================================================================
// FILE STORE
// ============================================================================

/// TOML-file backed store.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl FileScoreStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Store`] if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> BridgeResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(|err| {
                BridgeError::Store(format!("{}: {}", path.display(), err.message()))
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(BridgeError::Store(format!("{}: {err}", path.display()))),
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "score store opened");
        Ok(Self { path, values })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> BridgeResult<()> {
        let text = toml::to_string(&self.values)
            .map_err(|err| BridgeError::Store(err.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| BridgeError::Store(format!("{}: {err}", parent.display())))?;
        }
        fs::write(&tmp, text).map_err(|err| BridgeError::Store(format!("{}: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|err| BridgeError::Store(format!("{}: {err}", self.path.display())))
    }
}

impl ScoreStore for FileScoreStore {
    fn get_int(&self, key: &str) -> BridgeResult<Option<i64>> {
        Ok(self.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i64) -> BridgeResult<()> {
        let previous = self.values.insert(key.to_owned(), value);
        if let Err(err) = self.persist() {
            match previous {
                Some(old) => self.values.insert(key.to_owned(), old),
                None => self.values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}

// ============================================================================
// HIGH SCORE
// ============================================================================

/// Final score line shown when a game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreLine {
    /// The score beat the stored record and replaced it.
    NewRecord {
        /// Final score.
        score: i64,
    },
    /// The record stands.
    Standard {
        /// Final score.
        score: i64,
        /// Stored record.
        record: i64,
    },
}

impl ScoreLine {
    /// Final score of the game.
    #[must_use]
    pub const fn score(&self) -> i64 {
        match *self {
            Self::NewRecord { score } | Self::Standard { score, .. } => score,
        }
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewRecord { score } => write!(f, "Score {score}, new record!"),
            Self::Standard { score, record } => write!(f, "Score: {score} / Record: {record}"),
        }
    }
}

/// The persisted high score, default 0.
pub struct HighScore<S> {
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current record.
    ///
    /// # Errors
    ///
    /// Propagates store read errors.
    pub fn get(&self) -> BridgeResult<i64> {
        Ok(self.store.get_int(HISCORE_KEY)?.unwrap_or(0))
    }

    /// Records a final score. The store is written only on strict improvement.
    ///
    /// # Errors
    ///
    /// Propagates store errors; the record is unchanged on failure.
    pub fn record(&mut self, score: i64) -> BridgeResult<ScoreLine> {
        let record = self.get()?;
        if score > record {
            self.store.put_int(HISCORE_KEY, score)?;
            tracing::info!(score, previous = record, "new high score");
            Ok(ScoreLine::NewRecord { score })
        } else {
            Ok(ScoreLine::Standard { score, record })
        }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_line_text() {
        assert_eq!(ScoreLine::NewRecord { score: 12 }.to_string(), "Score 12, new record!");
        assert_eq!(
            ScoreLine::Standard { score: 3, record: 12 }.to_string(),
            "Score: 3 / Record: 12"
        );
    }

    #[test]
    fn test_high_score_defaults_to_zero() {
        let high = HighScore::new(MemoryScoreStore::new());
        assert_eq!(high.get().unwrap(), 0);
    }

    #[test]
    fn test_high_score_only_written_on_strict_improvement() {
        let mut high = HighScore::new(MemoryScoreStore::with_value(HISCORE_KEY, 10));

        assert_eq!(high.record(10).unwrap(), ScoreLine::Standard { score: 10, record: 10 });
        assert_eq!(high.record(4).unwrap(), ScoreLine::Standard { score: 4, record: 10 });
        assert_eq!(high.store().write_count(), 0);

        assert_eq!(high.record(11).unwrap(), ScoreLine::NewRecord { score: 11 });
        assert_eq!(high.get().unwrap(), 11);
        assert_eq!(high.store().write_count(), 1);
    }

    #[test]
    fn test_zero_score_on_empty_store_is_not_a_record() {
        let mut high = HighScore::new(MemoryScoreStore::new());
        assert_eq!(high.record(0).unwrap(), ScoreLine::Standard { score: 0, record: 0 });
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.toml");

        let mut store = FileScoreStore::open(&path).unwrap();
        assert_eq!(store.get_int(HISCORE_KEY).unwrap(), None);
        store.put_int(HISCORE_KEY, 77).unwrap();

        let reopened = FileScoreStore::open(&path).unwrap();
        assert_eq!(reopened.get_int(HISCORE_KEY).unwrap(), Some(77));
        assert!(fs::read_to_string(&path).unwrap().contains("hiscore = 77"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.toml");
        fs::write(&path, "hiscore = \"many\"").unwrap();

        assert!(matches!(FileScoreStore::open(&path), Err(BridgeError::Store(_))));
    }
}
