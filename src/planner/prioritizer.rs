use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Subject;
use crate::registry::SubjectRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrioritizeError {
    #[error("No subjects registered")]
    EmptyRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSubject<'a> {
    pub subject: &'a Subject,
    pub days_left: i64,
}

/// Whole days from `today` until the exam. Negative once the exam has passed.
pub fn days_until_exam(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    (exam_date - today).num_days()
}

pub fn is_urgent(days_left: i64, within_days: i64) -> bool {
    days_left <= within_days
}

/// Order subjects by what should be studied first.
///
/// Key: (days until exam, percent completed, difficulty label text), all
/// ascending. The difficulty component compares label strings, so
/// "Really difficult" sorts before "Somewhat difficult". Equal keys keep
/// registry order.
pub fn rank_subjects(registry: &SubjectRegistry, today: NaiveDate) -> Vec<RankedSubject<'_>> {
    let mut ranked: Vec<RankedSubject<'_>> = registry
        .iter()
        .map(|subject| RankedSubject {
            subject,
            days_left: days_until_exam(subject.exam_date(), today),
        })
        .collect();

    ranked.sort_by(|a, b| {
        (a.days_left, a.subject.completed(), a.subject.difficulty.label()).cmp(&(
            b.days_left,
            b.subject.completed(),
            b.subject.difficulty.label(),
        ))
    });

    ranked
}

/// Name of the subject to study next.
pub fn select_subject(
    registry: &SubjectRegistry,
    today: NaiveDate,
) -> Result<&str, PrioritizeError> {
    rank_subjects(registry, today)
        .into_iter()
        .next()
        .map(|ranked| ranked.subject.name.as_str())
        .ok_or(PrioritizeError::EmptyRegistry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chapters, Difficulty};
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
    }

    fn subject(name: &str, days: i64, completed: u8, difficulty: Difficulty) -> Subject {
        Subject::new(
            name,
            Chapters::Count(6),
            completed,
            difficulty,
            today() + Duration::days(days),
        )
    }

    fn registry_of(subjects: Vec<Subject>) -> SubjectRegistry {
        let mut registry = SubjectRegistry::new();
        for s in subjects {
            registry.register(s).unwrap();
        }
        registry
    }

    #[test]
    fn select_subject_empty_registry_fails() {
        let registry = SubjectRegistry::new();
        assert_eq!(
            select_subject(&registry, today()),
            Err(PrioritizeError::EmptyRegistry)
        );
    }

    #[test]
    fn select_subject_prefers_nearest_exam() {
        let registry = registry_of(vec![
            subject("Later", 10, 0, Difficulty::Easy),
            subject("Sooner", 2, 90, Difficulty::Easy),
        ]);
        assert_eq!(select_subject(&registry, today()), Ok("Sooner"));
    }

    #[test]
    fn select_subject_equal_days_prefers_lower_completion() {
        let registry = registry_of(vec![
            subject("B", 3, 50, Difficulty::Easy),
            subject("A", 3, 20, Difficulty::Easy),
        ]);
        assert_eq!(select_subject(&registry, today()), Ok("A"));
    }

    #[test]
    fn select_subject_past_due_sorts_first() {
        let registry = registry_of(vec![
            subject("Today", 0, 0, Difficulty::Easy),
            subject("Missed", -4, 100, Difficulty::Easy),
        ]);
        assert_eq!(select_subject(&registry, today()), Ok("Missed"));
    }

    #[test]
    fn select_subject_ties_break_on_difficulty_label_text() {
        let registry = registry_of(vec![
            subject("Somewhat", 5, 40, Difficulty::SomewhatDifficult),
            subject("Really", 5, 40, Difficulty::ReallyDifficult),
            subject("Not that", 5, 40, Difficulty::NotThatDifficult),
        ]);
        // "Not that difficult" < "Really difficult" < "Somewhat difficult"
        let ranked: Vec<&str> = rank_subjects(&registry, today())
            .iter()
            .map(|r| r.subject.name.as_str())
            .collect();
        assert_eq!(ranked, vec!["Not that", "Really", "Somewhat"]);
    }

    #[test]
    fn rank_subjects_full_key_ties_keep_registry_order() {
        let registry = registry_of(vec![
            subject("First", 5, 40, Difficulty::Easy),
            subject("Second", 5, 40, Difficulty::Easy),
        ]);
        let ranked = rank_subjects(&registry, today());
        assert_eq!(ranked[0].subject.name, "First");
        assert_eq!(ranked[1].subject.name, "Second");
    }

    #[test]
    fn rank_subjects_reports_days_left() {
        let registry = registry_of(vec![subject("Math", 18, 70, Difficulty::Easy)]);
        let ranked = rank_subjects(&registry, today());
        assert_eq!(ranked[0].days_left, 18);
    }

    #[test]
    fn select_subject_builtin_table_before_exams() {
        let registry = SubjectRegistry::builtin();
        let today = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        assert_eq!(select_subject(&registry, today), Ok("Bangla"));
    }

    #[test]
    fn select_subject_builtin_table_after_all_exams() {
        // Every exam is past due; the oldest one comes first.
        let registry = SubjectRegistry::builtin();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(select_subject(&registry, today), Ok("Bangla"));
    }

    #[test]
    fn days_until_exam_can_be_negative() {
        let exam = NaiveDate::from_ymd_opt(2024, 11, 19).unwrap();
        assert_eq!(days_until_exam(exam, today()), -1);
        assert_eq!(days_until_exam(exam, exam), 0);
    }

    #[test]
    fn is_urgent_includes_threshold_day() {
        assert!(is_urgent(7, 7));
        assert!(is_urgent(-2, 7));
        assert!(!is_urgent(8, 7));
    }

    fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(Difficulty::all().to_vec())
    }

    fn arb_subjects() -> impl Strategy<Value = Vec<(i64, u8, Difficulty)>> {
        prop::collection::vec((-30i64..60, 0u8..=100, arb_difficulty()), 1..12)
    }

    fn build(subjects: &[(i64, u8, Difficulty)]) -> SubjectRegistry {
        registry_of(
            subjects
                .iter()
                .enumerate()
                .map(|(i, (days, completed, difficulty))| {
                    subject(&format!("S{}", i), *days, *completed, *difficulty)
                })
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn select_subject_returns_registered_name(subjects in arb_subjects()) {
            let registry = build(&subjects);
            let chosen = select_subject(&registry, today()).unwrap();
            prop_assert!(registry.get(chosen).is_some());
        }

        #[test]
        fn select_subject_choice_has_minimal_key(subjects in arb_subjects()) {
            let registry = build(&subjects);
            let chosen = registry.get(select_subject(&registry, today()).unwrap()).unwrap();
            let chosen_days = days_until_exam(chosen.exam_date(), today());
            for other in registry.iter() {
                let days = days_until_exam(other.exam_date(), today());
                prop_assert!(chosen_days <= days);
                if days == chosen_days {
                    prop_assert!(chosen.completed() <= other.completed());
                }
                if chosen_days < 0 && days >= 0 {
                    prop_assert!(chosen_days < days);
                }
            }
        }

        #[test]
        fn rank_subjects_is_a_permutation(subjects in arb_subjects()) {
            let registry = build(&subjects);
            let ranked = rank_subjects(&registry, today());
            prop_assert_eq!(ranked.len(), registry.len());
            let mut names: Vec<&str> = ranked.iter().map(|r| r.subject.name.as_str()).collect();
            names.sort();
            let mut expected = registry.names();
            expected.sort();
            prop_assert_eq!(names, expected);
        }
    }
}
