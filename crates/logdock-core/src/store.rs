//! Whole-document JSON file persistence for the log collection.
//!
//! The backing medium is a single file holding a JSON array of entries.
//! Every create re-reads the document, appends, and rewrites it in full;
//! reads always go back to disk, which guarantees read-after-write
//! consistency for a single-process deployment.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use crate::error::{LogError, Result};
use crate::types::{filter_entries, LogEntry, LogFilter};

/// File-backed log store.
///
/// A process-wide mutex serializes the read-modify-write cycle so that
/// concurrent creates within one process cannot lose updates. Reads of a
/// missing or corrupt document degrade to an empty collection rather than
/// failing the query; only writes surface errors.
#[derive(Debug)]
pub struct JsonLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLogStore {
    /// Opens a store at the given path, creating the backing document as
    /// an empty collection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the document (or its parent directory) cannot
    /// be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.init()?;
        Ok(store)
    }

    /// Creates the backing document as an empty collection if absent.
    /// Safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be created.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            self.write_collection(&[])?;
        }
        Ok(())
    }

    /// Appends an entry to the collection and persists the whole document.
    ///
    /// Returns the stored entry. On failure nothing is persisted and the
    /// error surfaces to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Persistence`] if the document cannot be
    /// rewritten.
    pub fn create(&self, entry: LogEntry) -> Result<LogEntry> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_collection();
        entries.push(entry.clone());
        self.write_collection(&entries)?;
        Ok(entry)
    }

    /// Returns every persisted entry, re-read from disk on each call.
    #[must_use]
    pub fn list_all(&self) -> Vec<LogEntry> {
        self.read_collection()
    }

    /// Returns the entries matching the filter, in storage order.
    #[must_use]
    pub fn list_filtered(&self, filter: &LogFilter) -> Vec<LogEntry> {
        filter_entries(self.read_collection(), filter)
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Vec<LogEntry> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to read log collection, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "log collection is corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn write_collection(&self, entries: &[LogEntry]) -> Result<()> {
        // Pretty-printed so the document stays hand-inspectable.
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| LogError::Persistence {
            path: self.path.clone(),
            source,
        })
    }
}
