mod prioritizer;

pub use prioritizer::{days_until_exam, is_urgent, rank_subjects, select_subject, PrioritizeError};
