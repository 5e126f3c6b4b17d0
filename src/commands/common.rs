use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::cli::GlobalOpts;
use crate::config::{Config, DisplayConfig};
use crate::planner::{is_urgent, rank_subjects, select_subject, PrioritizeError};
use crate::registry::SubjectRegistry;
use crate::store::SessionLogStore;
use crate::utils::{column_width, pad_display, truncate_str};

const NOTES_PREVIEW_CHARS: usize = 40;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Load configuration, applying command-line overrides.
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let config = Config::load(global.config.clone())?;
    Ok(match &global.log_file {
        Some(path) => config.with_log_path(path.clone()),
        None => config,
    })
}

pub fn open_store(config: &Config) -> Result<SessionLogStore> {
    let path = config.log_path();
    SessionLogStore::open(&path)
        .with_context(|| format!("Failed to open study log: {:?}", path))
}

/// Registry lookup that tolerates case differences in typed names.
///
/// Unknown names are passed through so the caller reports them.
pub fn resolve_subject<'a>(registry: &'a SubjectRegistry, typed: &'a str) -> &'a str {
    registry.resolve_name(typed.trim()).unwrap_or(typed)
}

pub fn render_suggestion(
    registry: &SubjectRegistry,
    today: NaiveDate,
    display: &DisplayConfig,
) -> Result<String, PrioritizeError> {
    let suggested = select_subject(registry, today)?;
    let ranked = rank_subjects(registry, today);
    let width = column_width(ranked.iter().map(|r| r.subject.name.as_str()));

    let mut out = String::new();
    let _ = writeln!(out, "Suggested subject: {}", suggested);
    let _ = writeln!(out);
    for (i, r) in ranked.iter().enumerate() {
        let marker = if is_urgent(r.days_left, display.urgent_within_days) {
            "!"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {}. {}  {} days until exam",
            marker,
            i + 1,
            pad_display(&r.subject.name, width),
            r.days_left
        );
    }
    Ok(out)
}

pub fn render_status(
    registry: &SubjectRegistry,
    store: &SessionLogStore,
    today: NaiveDate,
    display: &DisplayConfig,
) -> String {
    let width = column_width(registry.iter().map(|s| s.name.as_str()));
    let mut out = String::new();

    let _ = writeln!(out, "Subject progress overview:");
    for subject in registry.iter() {
        let days_left = crate::planner::days_until_exam(subject.exam_date(), today);
        let marker = if is_urgent(days_left, display.urgent_within_days) {
            "!"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {}  {:>3}% completed  {:>4} days until exam  chapters: {}  ({})",
            marker,
            pad_display(&subject.name, width),
            subject.completed(),
            days_left,
            subject.chapters,
            subject.difficulty
        );
    }

    let _ = writeln!(out);
    let recent = store.recent(display.recent_logs);
    if recent.is_empty() {
        let _ = writeln!(out, "No recent study logs available.");
    } else {
        let _ = writeln!(out, "Recent study logs:");
        for entry in recent {
            let _ = writeln!(out, "  {}", entry.summary());
        }
    }
    out
}

pub fn render_log(store: &SessionLogStore) -> String {
    if store.is_empty() {
        return "No study logs available.\n".to_string();
    }

    let mut out = String::new();
    for (index, entry) in store.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            index,
            entry.summary(),
            truncate_str(&entry.notes, NOTES_PREVIEW_CHARS)
        );
    }
    out
}
