mod builtin;
mod progress;

use std::collections::HashMap;
use thiserror::Error;

use crate::models::Subject;

pub use builtin::builtin_subjects;
pub use progress::update_progress;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Subject name already exists: {0}")]
    DuplicateName(String),
}

/// In-memory table of the subjects being studied.
///
/// Subjects keep their registration order, which is also the order used for
/// display and for breaking exact ranking ties. The registry is owned by the
/// running session and is rebuilt from the built-in table on every start.
#[derive(Debug, Clone, Default)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
    name_to_index: HashMap<String, usize>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in subject table.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for subject in builtin_subjects() {
            // Built-in names are unique.
            let _ = registry.register(subject);
        }
        registry
    }

    pub fn register(&mut self, subject: Subject) -> Result<(), RegistryError> {
        if self.name_to_index.contains_key(&subject.name) {
            return Err(RegistryError::DuplicateName(subject.name));
        }
        self.name_to_index
            .insert(subject.name.clone(), self.subjects.len());
        self.subjects.push(subject);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Subject> {
        self.name_to_index.get(name).map(|&i| &self.subjects[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Subject> {
        match self.name_to_index.get(name) {
            Some(&i) => self.subjects.get_mut(i),
            None => None,
        }
    }

    /// Resolve a user-typed name to the registered one.
    ///
    /// Exact matches win; otherwise the first case-insensitive match is used.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        if let Some(subject) = self.get(name) {
            return Some(subject.name.as_str());
        }
        self.subjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    #[allow(dead_code)]
    pub fn names(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
