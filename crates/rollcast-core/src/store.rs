//! JSON file persistence for the round log.
//!
//! The whole log lives in a single pretty-printed JSON document: a metadata
//! header plus the ordered round array. Loading a path that does not exist
//! yields an empty log; anything else that was last saved is exactly what
//! comes back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::log::RoundLog;
use crate::round::Round;

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Metadata header persisted alongside the rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMeta {
    pub version: u32,
    /// Stable identifier assigned when the file is first written.
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub rounds: u64,
    pub rollcast_version: String,
}

/// On-disk document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogFile {
    meta: LogMeta,
    rounds: Vec<Round>,
}

/// Handle to the log's backing file.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted log. A missing file is an empty log, not an error.
    pub fn load(&self) -> io::Result<RoundLog> {
        if !self.path.exists() {
            log::debug!("no log file at {}, starting empty", self.path.display());
            return Ok(RoundLog::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: LogFile = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        log::info!(
            "loaded {} round(s) from {}",
            file.rounds.len(),
            self.path.display()
        );
        Ok(RoundLog::from_rounds(file.rounds))
    }

    /// Persist the full log, replacing whatever was saved before.
    ///
    /// The metadata id and creation time are carried over from the existing
    /// file when present, so a log keeps its identity across saves.
    pub fn save(&self, rounds: &RoundLog) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let now = format_iso8601(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default(),
        );
        let (id, created_at) = self.existing_identity().unwrap_or_else(|| {
            (Uuid::new_v4().to_string(), now.clone())
        });

        let file = LogFile {
            meta: LogMeta {
                version: FORMAT_VERSION,
                id,
                created_at,
                updated_at: now,
                rounds: rounds.len() as u64,
                rollcast_version: crate::VERSION.to_string(),
            },
            rounds: rounds.rounds().to_vec(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        log::info!(
            "saved {} round(s) to {}",
            rounds.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read (id, created_at) from the current file, if it parses.
    fn existing_identity(&self) -> Option<(String, String)> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let file: LogFile = serde_json::from_str(&contents).ok()?;
        Some((file.meta.id, file.meta.created_at))
    }
}

// ---------------------------------------------------------------------------
// Timestamp formatting
// ---------------------------------------------------------------------------

/// Format a duration-since-epoch as an ISO-8601 UTC timestamp.
/// Example: `2026-02-15T01:30:00Z`
fn format_iso8601(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let (year, month, day, hour, min, sec) = secs_to_utc(secs);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hour, min, sec
    )
}

/// Convert seconds since Unix epoch to (year, month, day, hour, minute,
/// second) UTC. No leap second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;

    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let months_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 0u64;
    for (i, &md) in months_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }
    let day = days + 1;

    (year, month, day, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LogStore::new(tmp.path().join("rollcast.json"));
        let log = store.load().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LogStore::new(tmp.path().join("rollcast.json"));

        let mut log = RoundLog::new();
        log.append(10, 40).unwrap();
        log.append(20, 20).unwrap();
        store.save(&log).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rounds(), log.rounds());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LogStore::new(tmp.path().join("nested/dir/rollcast.json"));
        store.save(&RoundLog::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_meta_identity_survives_resave() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rollcast.json");
        let store = LogStore::new(&path);

        let mut log = RoundLog::new();
        store.save(&log).unwrap();
        let first: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        log.append(10, 10).unwrap();
        store.save(&log).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(first["meta"]["id"], second["meta"]["id"]);
        assert_eq!(first["meta"]["created_at"], second["meta"]["created_at"]);
        assert_eq!(second["meta"]["rounds"], 1);
    }

    #[test]
    fn test_load_rejects_corrupt_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rollcast.json");
        fs::write(&path, "not json at all").unwrap();
        let err = LogStore::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_format_iso8601_epoch() {
        assert_eq!(format_iso8601(Duration::from_secs(0)), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_secs_to_utc_known_date() {
        // 2000-01-01 00:00:00 UTC
        let (y, m, d, h, mi, s) = secs_to_utc(946684800);
        assert_eq!((y, m, d, h, mi, s), (2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_is_leap() {
        assert!(is_leap(2000));
        assert!(is_leap(2024));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
    }
}
