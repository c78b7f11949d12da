//! Bounded history store for saved weather readings
//!
//! Provides a `HistoryStore` that keeps the last [`MAX_ENTRIES`] readings as a
//! JSON array of `{ "timestamp": ..., "data": ... }` objects.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::WeatherReading;

/// File name used when no history path is configured
pub const DEFAULT_HISTORY_FILE: &str = "weather_history.json";

/// Number of entries kept; older entries are dropped first
pub const MAX_ENTRIES: usize = 10;

/// Timestamp layout written for new entries, e.g. `2024-07-15T14:03:11.123456`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A saved reading and when it was captured
///
/// An entry loaded from disk keeps the exact `timestamp` text and `data`
/// object it was read from, and writes those back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    timestamp: NaiveDateTime,
    reading: WeatherReading,
    stored: StoredEntry,
}

/// On-disk form of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredEntry {
    timestamp: String,
    data: Value,
}

impl HistoryEntry {
    /// Creates an entry timestamped now, to microsecond precision
    pub fn new(reading: WeatherReading) -> Result<Self, serde_json::Error> {
        let now = Local::now().naive_local();
        let timestamp = now
            .with_nanosecond(now.nanosecond() / 1_000 * 1_000)
            .unwrap_or(now);

        let stored = StoredEntry {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            data: serde_json::to_value(&reading)?,
        };
        Ok(Self {
            timestamp,
            reading,
            stored,
        })
    }

    /// Local capture time
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// The saved reading
    pub fn reading(&self) -> &WeatherReading {
        &self.reading
    }

    /// The `data` object exactly as stored
    pub fn payload(&self) -> &Value {
        &self.stored.data
    }
}

impl Serialize for HistoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.stored.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HistoryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredEntry::deserialize(deserializer)?;
        let timestamp = stored
            .timestamp
            .parse::<NaiveDateTime>()
            .map_err(de::Error::custom)?;
        let reading = WeatherReading::deserialize(&stored.data).map_err(de::Error::custom)?;

        Ok(Self {
            timestamp,
            reading,
            stored,
        })
    }
}

/// Errors reading or writing the history file
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The file exists but is not a valid history list
    #[error("history file {path} is corrupt: {source}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file exists but could not be read
    #[error("could not read history file {path}: {source}")]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file or its directory could not be written
    #[error("could not write history file {path}: {source}")]
    StoreWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads and writes the history file
///
/// There is no locking: the store assumes a single writer.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Location of the JSON file
    path: PathBuf,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl HistoryStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all saved entries, oldest first
    ///
    /// A missing file is an empty history, not an error.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::StoreUnreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| HistoryError::StoreCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Appends a reading timestamped now and persists the trimmed list
    ///
    /// # Returns
    /// * `Ok(Vec<HistoryEntry>)` - The list as written, oldest first
    /// * `Err(HistoryError)` - If the existing file is unreadable or corrupt,
    ///   or the write fails. Nothing is written in that case.
    pub fn append(&self, reading: &WeatherReading) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.load()?;
        let entry = HistoryEntry::new(reading.clone()).map_err(|source| {
            HistoryError::StoreWriteFailed {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, source),
            }
        })?;
        entries.push(entry);

        if entries.len() > MAX_ENTRIES {
            let excess = entries.len() - MAX_ENTRIES;
            entries.drain(..excess);
        }

        self.save(&entries)?;
        tracing::info!(
            path = %self.path.display(),
            city = %reading.city,
            entries = entries.len(),
            "saved reading to history"
        );
        Ok(entries)
    }

    /// Rewrites the file with exactly `entries`
    ///
    /// Creates the parent directory if it does not exist.
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let write_failed = |source| HistoryError::StoreWriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| write_failed(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        fs::write(&self.path, json).map_err(write_failed)
    }
}
