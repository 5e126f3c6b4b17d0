use chrono::NaiveDate;

use crate::models::{Chapters, Difficulty, Subject};

enum ChapterSeed {
    Count(u32),
    Label(&'static str),
}

struct SubjectSeed {
    name: &'static str,
    chapters: ChapterSeed,
    completed: u8,
    difficulty: Difficulty,
    exam: (i32, u32, u32),
}

const SEEDS: &[SubjectSeed] = &[
    SubjectSeed {
        name: "Bangla",
        chapters: ChapterSeed::Count(6),
        completed: 20,
        difficulty: Difficulty::QuiteDifficult,
        exam: (2024, 11, 19),
    },
    SubjectSeed {
        name: "History and Social Science",
        chapters: ChapterSeed::Count(6),
        completed: 60,
        difficulty: Difficulty::QuiteDifficult,
        exam: (2024, 11, 24),
    },
    SubjectSeed {
        name: "Science",
        chapters: ChapterSeed::Count(8),
        completed: 30,
        difficulty: Difficulty::ReallyDifficult,
        exam: (2024, 11, 26),
    },
    SubjectSeed {
        name: "Religion",
        chapters: ChapterSeed::Count(6),
        completed: 40,
        difficulty: Difficulty::SomewhatDifficult,
        exam: (2024, 11, 28),
    },
    SubjectSeed {
        name: "English",
        chapters: ChapterSeed::Label("Parts"),
        completed: 80,
        difficulty: Difficulty::Easy,
        exam: (2024, 12, 1),
    },
    SubjectSeed {
        name: "Digital Technology",
        chapters: ChapterSeed::Count(5),
        completed: 60,
        difficulty: Difficulty::NotThatDifficult,
        exam: (2024, 12, 4),
    },
    SubjectSeed {
        name: "Math",
        chapters: ChapterSeed::Count(6),
        completed: 70,
        difficulty: Difficulty::NotThatDifficult,
        exam: (2024, 12, 8),
    },
];

/// The fixed subject table every session starts from.
pub fn builtin_subjects() -> Vec<Subject> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            let (y, m, d) = seed.exam;
            let exam_date = NaiveDate::from_ymd_opt(y, m, d)?;
            let chapters = match seed.chapters {
                ChapterSeed::Count(n) => Chapters::Count(n),
                ChapterSeed::Label(label) => Chapters::Label(label.to_string()),
            };
            Some(Subject::new(
                seed.name,
                chapters,
                seed.completed,
                seed.difficulty,
                exam_date,
            ))
        })
        .collect()
}
