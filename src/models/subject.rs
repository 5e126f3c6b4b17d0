use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Chapter count as recorded for a subject.
///
/// Some subjects are tracked by a plain count, others by a descriptive label
/// ("Parts"); both are kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chapters {
    Count(u32),
    Label(String),
}

impl std::fmt::Display for Chapters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chapters::Count(n) => write!(f, "{}", n),
            Chapters::Label(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Not that difficult")]
    NotThatDifficult,
    #[serde(rename = "Somewhat difficult")]
    SomewhatDifficult,
    #[serde(rename = "Quite difficult")]
    QuiteDifficult,
    #[serde(rename = "Really difficult")]
    ReallyDifficult,
}

impl Difficulty {
    #[allow(dead_code)]
    pub fn all() -> [Difficulty; 5] {
        [
            Difficulty::Easy,
            Difficulty::NotThatDifficult,
            Difficulty::SomewhatDifficult,
            Difficulty::QuiteDifficult,
            Difficulty::ReallyDifficult,
        ]
    }

    /// Human-readable label. Ranking compares these strings, not severity.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::NotThatDifficult => "Not that difficult",
            Difficulty::SomewhatDifficult => "Somewhat difficult",
            Difficulty::QuiteDifficult => "Quite difficult",
            Difficulty::ReallyDifficult => "Really difficult",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub chapters: Chapters,
    completed: u8,
    pub difficulty: Difficulty,
    exam_date: NaiveDate,
}

impl Subject {
    /// Percentages above 100 are clamped.
    pub fn new(
        name: impl Into<String>,
        chapters: Chapters,
        completed: u8,
        difficulty: Difficulty,
        exam_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            chapters,
            completed: completed.min(100),
            difficulty,
            exam_date,
        }
    }

    pub fn completed(&self) -> u8 {
        self.completed
    }

    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    pub(crate) fn set_completed(&mut self, completed: u8) {
        debug_assert!(completed <= 100);
        self.completed = completed.min(100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapters_deserializes_count_and_label() {
        let count: Chapters = serde_json::from_str("6").unwrap();
        let label: Chapters = serde_json::from_str("\"Parts\"").unwrap();

        assert_eq!(count, Chapters::Count(6));
        assert_eq!(label, Chapters::Label("Parts".to_string()));
    }

    #[test]
    fn chapters_display_preserves_source_value() {
        assert_eq!(Chapters::Count(8).to_string(), "8");
        assert_eq!(Chapters::Label("Parts".into()).to_string(), "Parts");
    }

    #[test]
    fn difficulty_serializes_as_label() {
        for difficulty in Difficulty::all() {
            let json = serde_json::to_string(&difficulty).unwrap();
            assert_eq!(
                json,
                format!("\"{}\"", difficulty.label()),
                "difficulty_serializes_as_label: {:?} should use its label",
                difficulty
            );
        }
    }

    #[test]
    fn difficulty_labels_do_not_sort_by_severity() {
        // "Easy" < "Not that difficult" < "Quite difficult" < "Really difficult" < "Somewhat difficult"
        let mut labels: Vec<&str> = Difficulty::all().iter().map(|d| d.label()).collect();
        labels.sort();
        assert_eq!(labels.last(), Some(&"Somewhat difficult"));
        assert_eq!(labels.first(), Some(&"Easy"));
    }

    #[test]
    fn subject_new_clamps_completed() {
        let subject = Subject::new(
            "Math",
            Chapters::Count(6),
            250,
            Difficulty::Easy,
            NaiveDate::from_ymd_opt(2024, 12, 8).unwrap(),
        );
        assert_eq!(subject.completed(), 100);
    }
}
