//! JSON-backed history store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// HistoryError
// ---------------------------------------------------------------------------

/// Errors raised while writing or deleting the history file.
///
/// Reading never fails: an unreadable or malformed file is treated as empty.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise history: {0}")]
    Json(#[from] serde_json::Error),
}

impl HistoryError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryEntry
// ---------------------------------------------------------------------------

/// A single recorded transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time the entry was created.
    pub timestamp: DateTime<Local>,
    /// Speech language code.
    pub language: String,
    /// Recording length in seconds.
    pub duration_secs: u32,
    pub text: String,
}

impl HistoryEntry {
    /// New entry stamped with the current local time.
    pub fn new(language: impl Into<String>, duration_secs: u32, text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            language: language.into(),
            duration_secs,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryStats
// ---------------------------------------------------------------------------

/// Aggregate counts over stored and pending entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    /// Entry count per language code.
    pub languages: BTreeMap<String, usize>,
    /// Sum of all recording durations, in seconds.
    pub total_duration_secs: u64,
}

// ---------------------------------------------------------------------------
// HistoryManager
// ---------------------------------------------------------------------------

/// Buffers new entries and appends them to the history file on `save`.
pub struct HistoryManager {
    pending: Vec<HistoryEntry>,
    path: PathBuf,
}

impl HistoryManager {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Manager for `path`, normally [`crate::config::AppPaths::history_file`].
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            pending: Vec::new(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Pending entries
    // -----------------------------------------------------------------------

    /// Queue a transcription.  Blank text is ignored.
    pub fn add_entry(&mut self, language: &str, duration_secs: u32, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.pending
            .push(HistoryEntry::new(language, duration_secs, text));
    }

    /// Entries not yet written to disk.
    pub fn pending(&self) -> &[HistoryEntry] {
        &self.pending
    }

    /// Drop pending entries without touching the file.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Append pending entries to the history file.
    ///
    /// The file is rewritten through a temporary sibling and renamed into
    /// place so a crash never leaves a truncated document.  Pending entries
    /// are cleared only after the rename succeeds.
    pub fn save(&mut self) -> Result<(), HistoryError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
        }

        let mut all = self.load_all();
        all.extend(self.pending.iter().cloned());

        let data = serde_json::to_string_pretty(&all)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data).map_err(|e| HistoryError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| HistoryError::io(&self.path, e))?;

        log::debug!(
            "saved {} history entries to {}",
            self.pending.len(),
            self.path.display()
        );
        self.pending.clear();
        Ok(())
    }

    /// Every entry stored on disk, oldest first.
    ///
    /// A missing file yields `[]`; unreadable or malformed files are logged
    /// and also yield `[]`.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        if !self.path.exists() {
            return Vec::new();
        }

        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("could not read history {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&data) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("ignoring malformed history {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Drop pending entries and delete the history file.
    pub fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.pending.clear();
        if !self.path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|e| HistoryError::io(&self.path, e))?;
        log::debug!("deleted history file {}", self.path.display());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Totals across stored and pending entries.
    pub fn stats(&self) -> HistoryStats {
        let stored = self.load_all();
        let mut stats = HistoryStats::default();

        for entry in stored.iter().chain(self.pending.iter()) {
            stats.total += 1;
            *stats.languages.entry(entry.language.clone()).or_insert(0) += 1;
            stats.total_duration_secs += u64::from(entry.duration_secs);
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manager_in_temp() -> (HistoryManager, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let manager = HistoryManager::with_path(dir.path().join("history.json"));
        (manager, dir)
    }

    #[test]
    fn blank_text_is_ignored() {
        let (mut history, _dir) = manager_in_temp();
        history.add_entry("en", 10, "   ");
        history.add_entry("en", 10, "");
        assert!(history.pending().is_empty());
    }

    #[test]
    fn save_without_entries_is_noop() {
        let (mut history, _dir) = manager_in_temp();
        history.save().expect("save");
        assert!(!history.path().exists());
    }

    #[test]
    fn save_appends_and_clears_pending() {
        let (mut history, _dir) = manager_in_temp();
        history.add_entry("en", 10, "first");
        history.save().expect("save");
        history.add_entry("es", 5, "segundo");
        history.save().expect("save");

        assert!(history.pending().is_empty());
        let all = history.load_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "first");
        assert_eq!(all[1].language, "es");
        assert!(!history.path().with_extension("tmp").exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("deeper").join("history.json");
        let mut history = HistoryManager::with_path(path.clone());
        history.add_entry("en", 3, "hello");
        history.save().expect("save");
        assert!(path.exists());
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let (history, _dir) = manager_in_temp();
        std::fs::write(history.path(), "{ not json").expect("write");
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn non_array_document_loads_as_empty() {
        let (history, _dir) = manager_in_temp();
        std::fs::write(history.path(), r#"{"text": "x"}"#).expect("write");
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn clear_all_removes_file_and_pending() {
        let (mut history, _dir) = manager_in_temp();
        history.add_entry("en", 10, "kept");
        history.save().expect("save");
        history.add_entry("en", 10, "pending");

        history.clear_all().expect("clear");
        assert!(history.pending().is_empty());
        assert!(!history.path().exists());

        // Clearing again with no file is fine.
        history.clear_all().expect("clear twice");
    }

    #[test]
    fn stats_cover_stored_and_pending() {
        let (mut history, _dir) = manager_in_temp();
        history.add_entry("en", 10, "one");
        history.add_entry("en", 20, "two");
        history.save().expect("save");
        history.add_entry("fr", 5, "trois");

        let stats = history.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.languages.get("en"), Some(&2));
        assert_eq!(stats.languages.get("fr"), Some(&1));
        assert_eq!(stats.total_duration_secs, 35);
    }

    #[test]
    fn stats_empty() {
        let (history, _dir) = manager_in_temp();
        assert_eq!(history.stats(), HistoryStats::default());
    }

    #[test]
    fn entries_round_trip_through_json() {
        let entry = HistoryEntry::new("de", 12, "Guten Tag");
        let json = serde_json::to_string(&entry).expect("serialise");
        let back: HistoryEntry = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, entry);
    }
}
