use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded study session. Entries are never edited after creation;
/// their identity is their position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub subject: String,
    pub completed: u8,
    pub notes: String,
    pub date: NaiveDate,
}

impl SessionLogEntry {
    pub fn new(
        subject: impl Into<String>,
        completed: u8,
        notes: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            subject: subject.into(),
            completed,
            notes: notes.into(),
            date,
        }
    }

    /// Single-line rendering used by the log listings.
    pub fn summary(&self) -> String {
        format!("{}: {} - {}% completed", self.date, self.subject, self.completed)
    }
}
