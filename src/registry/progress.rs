use std::num::IntErrorKind;

use thiserror::Error;
use tracing::info;

use super::SubjectRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("Not a whole number: {0:?}")]
    InvalidNumber(String),

    #[error("Completion must be between 0 and 100, got {0}")]
    OutOfRange(String),

    #[error("Unknown subject: {0:?}")]
    UnknownSubject(String),
}

/// Result of a successful progress update.
///
/// Callers treat this as the signal to refresh anything derived from the
/// registry (recommendation, progress overview).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub subject: String,
    pub previous: u8,
    pub current: u8,
}

impl ProgressUpdate {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Apply a user-entered completion percentage to a subject.
///
/// Checks run in a fixed order: number, range, then subject.
pub fn update_progress(
    registry: &mut SubjectRegistry,
    subject_name: &str,
    raw_value: &str,
) -> Result<ProgressUpdate, ProgressError> {
    let trimmed = raw_value.trim();
    let value: i64 = match trimmed.parse() {
        Ok(value) => value,
        // Integers too wide for i64 are still integers, just out of range.
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(ProgressError::OutOfRange(trimmed.to_string()));
        }
        Err(_) => return Err(ProgressError::InvalidNumber(raw_value.to_string())),
    };

    if !(0..=100).contains(&value) {
        return Err(ProgressError::OutOfRange(trimmed.to_string()));
    }
    let value = value as u8;

    let subject = registry
        .get_mut(subject_name)
        .ok_or_else(|| ProgressError::UnknownSubject(subject_name.to_string()))?;

    let previous = subject.completed();
    subject.set_completed(value);

    info!(
        subject = %subject_name,
        previous,
        current = value,
        "Progress updated"
    );

    Ok(ProgressUpdate {
        subject: subject_name.to_string(),
        previous,
        current: value,
    })
}
