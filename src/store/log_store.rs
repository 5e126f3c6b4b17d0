use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::SessionLogEntry;
use crate::registry::SubjectRegistry;

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("A subject must be selected")]
    MissingSubject,

    #[error("Notes must not be empty")]
    MissingNotes,

    #[error("Unknown subject: {0:?}")]
    UnknownSubject(String),

    #[error("No log entry at index {index} (log has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Study log {path:?} is corrupt: {source}")]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access study log {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize study log: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Append-only study session log backed by a single JSON document.
///
/// Every mutation rewrites the whole file. That is fine for a personal log of
/// a few hundred entries and is not meant to scale past that.
#[derive(Debug)]
pub struct SessionLogStore {
    path: PathBuf,
    entries: Vec<SessionLogEntry>,
}

impl SessionLogStore {
    /// Open the log at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogStoreError> {
        let mut store = Self {
            path: path.into(),
            entries: Vec::new(),
        };
        store.load()?;
        debug!(path = %store.path.display(), entries = store.len(), "Study log opened");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the document from disk, replacing the in-memory entries.
    ///
    /// On failure the in-memory entries are left untouched.
    pub fn load(&mut self) -> Result<&[SessionLogEntry], LogStoreError> {
        self.entries = Self::read_document(&self.path)?;
        Ok(&self.entries)
    }

    fn read_document(path: &Path) -> Result<Vec<SessionLogEntry>, LogStoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|source| LogStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| LogStoreError::StorageCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn entries(&self) -> &[SessionLogEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[SessionLogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: SessionLogEntry) -> Result<(), LogStoreError> {
        if entry.subject.trim().is_empty() {
            return Err(LogStoreError::MissingSubject);
        }
        if entry.notes.trim().is_empty() {
            return Err(LogStoreError::MissingNotes);
        }

        self.entries.push(entry);
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        if let Some(entry) = self.entries.last() {
            info!(subject = %entry.subject, completed = entry.completed, "Study session logged");
        }
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SessionLogEntry, LogStoreError> {
        if index >= self.entries.len() {
            return Err(LogStoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(index);
        if let Err(e) = self.save() {
            self.entries.insert(index, removed);
            return Err(e);
        }
        info!(index, subject = %removed.subject, "Study log entry removed");
        Ok(removed)
    }

    /// Write the full log, replacing the previous document in one step.
    ///
    /// The new content goes to a sibling temp file which is then renamed over
    /// the target, so readers see either the old or the new document.
    pub fn save(&self) -> Result<(), LogStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LogStoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(LogStoreError::Serialize)?;

        let temp_path = self.temp_path();
        let write_result = (|| {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(source) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(LogStoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), entries = self.entries.len(), "Study log saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "study_log.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Record a study session for a registered subject.
///
/// The entry snapshots the subject's current completion and is stamped with
/// `today`.
pub fn log_session(
    store: &mut SessionLogStore,
    registry: &SubjectRegistry,
    subject: &str,
    notes: &str,
    today: NaiveDate,
) -> Result<(), LogStoreError> {
    if subject.trim().is_empty() {
        return Err(LogStoreError::MissingSubject);
    }
    if notes.trim().is_empty() {
        return Err(LogStoreError::MissingNotes);
    }

    let found = registry
        .get(subject)
        .ok_or_else(|| LogStoreError::UnknownSubject(subject.to_string()))?;

    store.append(SessionLogEntry::new(
        found.name.clone(),
        found.completed(),
        notes,
        today,
    ))
}
