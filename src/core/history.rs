//! # Conversion History
//!
//! Every successful conversion is appended to a JSON array on disk:
//!
//! ```text
//! [
//!     {
//!         "input": "SOS",
//!         "output": "... --- ...",
//!         "timestamp": "2026-10-18T09:41:07"
//!     }
//! ]
//! ```
//!
//! Each append reads the whole array, pushes one entry and rewrites the file
//! via `.tmp` + `rename()`. A file that doesn't parse is treated as empty
//! unless strict mode is on.
//!
//! The transcoder only sees the `HistorySink` trait, so tests (and
//! `--no-history`) can swap the file for `MemoryHistory`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Local time, second precision, no offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One persisted conversion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
    pub timestamp: String,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current local time.
    pub fn now(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug)]
pub enum HistoryError {
    Io(io::Error),
    /// Existing file isn't a JSON array of entries (strict mode only).
    Corrupt(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "history I/O error: {e}"),
            HistoryError::Corrupt(e) => write!(f, "history file is corrupt: {e}"),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<io::Error> for HistoryError {
    fn from(e: io::Error) -> Self {
        HistoryError::Io(e)
    }
}

/// Where conversions get recorded.
pub trait HistorySink: Send + Sync {
    fn append(&self, input: &str, output: &str) -> Result<(), HistoryError>;
}

// ============================================================================
// File-backed store
// ============================================================================

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    strict: bool,
}

impl HistoryStore {
    /// Lenient store: corrupt history is discarded.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_strict(path, false)
    }

    pub fn with_strict(path: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            path: path.into(),
            strict,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current array. Missing file → empty.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::Io(e)),
        };

        // Bad UTF-8 surfaces as a parse error here, same as bad JSON
        match serde_json::from_slice::<Vec<HistoryEntry>>(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) if self.strict => Err(HistoryError::Corrupt(e)),
            Err(e) => {
                warn!("Discarding corrupt history {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }
}

impl HistorySink for HistoryStore {
    fn append(&self, input: &str, output: &str) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(HistoryEntry::now(input, output));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &entries)?;
        debug!("History now holds {} entries", entries.len());
        Ok(())
    }
}

/// Atomically write `data` as 4-space indented JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut ser)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, buf)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

// ============================================================================
// In-memory store
// ============================================================================

/// Keeps entries in memory only.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl HistorySink for MemoryHistory {
    fn append(&self, input: &str, output: &str) -> Result<(), HistoryError> {
        let entry = HistoryEntry::now(input, output);
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn read_entries(path: &Path) -> Vec<HistoryEntry> {
        let json = fs::read_to_string(path).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_timestamp_is_second_precision() {
        let entry = HistoryEntry::now("a", "b");
        assert_eq!(entry.timestamp.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);

        store.append("SOS", "... --- ...").unwrap();

        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "SOS");
        assert_eq!(entries[0].output, "... --- ...");
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("history.json");
        HistoryStore::new(&path).append("E", ".").unwrap();
        assert_eq!(read_entries(&path).len(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);

        store.append("A", ".-").unwrap();
        store.append("B", "-...").unwrap();
        store.append("C", "-.-.").unwrap();

        let inputs: Vec<_> = read_entries(&path).into_iter().map(|e| e.input).collect();
        assert_eq!(inputs, ["A", "B", "C"]);
    }

    #[test]
    fn test_corrupt_file_is_discarded_when_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        HistoryStore::new(&path).append("E", ".").unwrap();

        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "E");
    }

    #[test]
    fn test_wrong_shape_is_discarded_when_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"input": "x"}"#).unwrap();

        HistoryStore::new(&path).append("T", "-").unwrap();
        assert_eq!(read_entries(&path).len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_rejected_when_strict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "garbage").unwrap();

        let result = HistoryStore::with_strict(&path, true).append("E", ".");

        assert!(matches!(result, Err(HistoryError::Corrupt(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[test]
    fn test_invalid_utf8_is_corrupt_when_strict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let garbage = b"[{\"input\": \"\xff\xfe\", \"output\": \"x\", \"timestamp\": \"t\"}]";
        fs::write(&path, garbage).unwrap();

        let result = HistoryStore::with_strict(&path, true).append("E", ".");

        assert!(matches!(result, Err(HistoryError::Corrupt(_))));
        assert_eq!(fs::read(&path).unwrap(), garbage);
    }

    #[test]
    fn test_invalid_utf8_is_discarded_when_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, b"\xff\xfe\x00garbage").unwrap();

        HistoryStore::new(&path).append("E", ".").unwrap();

        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "E");
    }

    #[test]
    fn test_file_is_indented_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        HistoryStore::new(&path).append("Ünïcode", "x").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Ünïcode"));
        assert!(raw.contains("\n        \"input\": "));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        HistoryStore::new(&path).append("a", "b").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let input = raw.find("\"input\"").unwrap();
        let output = raw.find("\"output\"").unwrap();
        let timestamp = raw.find("\"timestamp\"").unwrap();
        assert!(input < output && output < timestamp);
    }

    #[test]
    fn test_memory_history_records_entries() {
        let history = MemoryHistory::new();
        history.append("one", "1").unwrap();
        history.append("two", "2").unwrap();

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].output, "2");
    }
}
