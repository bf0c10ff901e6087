use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::constants::NO_GPS_REASON_TEXT;
use crate::coordinate::Coordinate;

/// A lookup that found a position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located {
    #[serde(default)]
    pub name: String,
    pub path: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A lookup that found no position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlocated {
    #[serde(default)]
    pub name: String,
    pub path: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// One record of the history file, tagged by `status`.
/// Older files written with `ok`/`no_gps` tags still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HistoryEntry {
    #[serde(alias = "ok")]
    Success(Located),
    #[serde(alias = "no_gps")]
    Failure(Unlocated),
}

impl HistoryEntry {
    pub fn located(path: &Path, coord: Coordinate, address: impl Into<String>) -> Self {
        HistoryEntry::Success(Located {
            name: file_name_of(path),
            path: path.to_string_lossy().to_string(),
            lat: coord.lat,
            lon: coord.lon,
            address: address.into(),
            recorded_at: Some(Utc::now()),
        })
    }

    pub fn unlocated(path: &Path) -> Self {
        HistoryEntry::Failure(Unlocated {
            name: file_name_of(path),
            path: path.to_string_lossy().to_string(),
            reason: NO_GPS_REASON_TEXT.to_string(),
            recorded_at: Some(Utc::now()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            HistoryEntry::Success(e) => &e.name,
            HistoryEntry::Failure(e) => &e.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            HistoryEntry::Success(e) => &e.path,
            HistoryEntry::Failure(e) => &e.path,
        }
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        match self {
            HistoryEntry::Success(e) => e.recorded_at,
            HistoryEntry::Failure(e) => e.recorded_at,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            HistoryEntry::Success(e) => Some(Coordinate { lat: e.lat, lon: e.lon }),
            HistoryEntry::Failure(_) => None,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file {0} does not exist")]
    Missing(PathBuf),

    #[error("failed to read history file: {0}")]
    Read(#[source] io::Error),

    #[error("history file is not a JSON array of entries: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to write history file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to encode history: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Newest-first list of lookups persisted as one JSON array.
///
/// Every append reads the whole file and rewrites it through a temporary file
/// in the same directory. There is no locking, so only one writer may use a
/// given file at a time.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all entries; a missing or corrupt file reads as empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "treating history as empty");
                Vec::new()
            }
        }
    }

    /// Like [`HistoryStore::load`] but tells the failure modes apart
    pub fn try_load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HistoryError::Missing(self.path.clone()))
            }
            Err(e) => return Err(HistoryError::Read(e)),
        };

        serde_json::from_str(&content).map_err(HistoryError::Corrupt)
    }

    /// Puts `entry` in front of the existing ones and rewrites the file.
    ///
    /// A missing or corrupt file starts a fresh history. A file that exists
    /// but cannot be read is an error and is left untouched.
    pub fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = match self.try_load() {
            Ok(entries) => entries,
            Err(e @ (HistoryError::Missing(_) | HistoryError::Corrupt(_))) => {
                debug!(path = %self.path.display(), error = %e, "starting a new history");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(0, entry);
        self.write_all(&entries)
    }

    fn write_all(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(HistoryError::Write)?;

        let tmp = NamedTempFile::new_in(&dir).map_err(HistoryError::Write)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, entries).map_err(HistoryError::Encode)?;
            writer.write_all(b"\n").map_err(HistoryError::Write)?;
            writer.flush().map_err(HistoryError::Write)?;
        }
        tmp.persist(&self.path)
            .map_err(|e| HistoryError::Write(e.error))?;

        debug!(path = %self.path.display(), entries = entries.len(), "history saved");
        Ok(())
    }
}
