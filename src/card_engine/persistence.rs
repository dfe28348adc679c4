//! Persistence collaborator and an in-memory reference store.
//!
//! The engine only talks to [`Persistence`]. [`MemoryStore`] implements it with
//! the same referential rules as the app's SQLite schema (vocabulary belongs to a
//! stack, a course references two languages and owns three stacks) and can be
//! snapshotted to JSON.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::card_engine::{
    error::{StoreError, StoreResult},
    models::{
        Course, CourseId, Language, LanguageId, NewVocabulary, Stack, StackId, StackStatus,
        Vocabulary, VocabularyId,
    },
    presentation::Preferences,
};

pub trait Persistence {
    /// All vocabulary in a stack, in insertion order.
    fn vocabulary(&self, stack: StackId) -> StoreResult<Vec<Vocabulary>>;

    fn set_vocabulary_stack(&mut self, vocabulary: VocabularyId, stack: StackId) -> StoreResult<()>;

    fn add_vocabulary(&mut self, vocabulary: NewVocabulary, stack: StackId) -> StoreResult<VocabularyId>;

    /// Move every item of `from` into `to`; returns how many moved.
    fn move_vocabulary(&mut self, from: StackId, to: StackId) -> StoreResult<usize>;

    fn languages(&self) -> StoreResult<Vec<Language>>;

    fn language(&self, id: LanguageId) -> StoreResult<Option<Language>>;

    fn create_language(&mut self, name: &str) -> StoreResult<LanguageId>;

    /// Fails with [`StoreError::LanguageInUse`] while a course references it.
    fn delete_language(&mut self, id: LanguageId) -> StoreResult<()>;

    fn courses(&self) -> StoreResult<Vec<Course>>;

    /// Create a course plus its pot, failed and success stacks.
    fn create_course(&mut self, source: LanguageId, target: LanguageId) -> StoreResult<Course>;

    fn update_course(&mut self, course: &Course) -> StoreResult<()>;

    /// Delete the course's vocabulary, then its stacks, then the course itself.
    fn delete_course_cascade(&mut self, id: CourseId) -> StoreResult<()>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    last_id: u32,
    stacks: Vec<Stack>,
    vocabulary: Vec<Vocabulary>,
    languages: Vec<Language>,
    courses: Vec<Course>,
    preferences: BTreeMap<String, bool>,
}

fn not_found(entity: &'static str, id: u32) -> StoreError {
    StoreError::NotFound { entity, id }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Ids are shared across tables and never reused.
    fn next_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }

    fn has_stack(&self, id: StackId) -> bool {
        self.stacks.iter().any(|s| s.id == id)
    }

    fn has_language(&self, id: LanguageId) -> bool {
        self.languages.iter().any(|l| l.id == id)
    }

    fn add_stack(&mut self, status: StackStatus) -> StackId {
        let id = StackId(self.next_id());
        self.stacks.push(Stack { id, status });
        id
    }

    fn delete_stack(&mut self, id: StackId) -> StoreResult<()> {
        if self.vocabulary.iter().any(|v| v.stack_id == id) {
            return Err(StoreError::ForeignKey(format!("{id} still holds vocabulary")));
        }
        self.stacks.retain(|s| s.id != id);
        Ok(())
    }
}

impl Persistence for MemoryStore {
    fn vocabulary(&self, stack: StackId) -> StoreResult<Vec<Vocabulary>> {
        Ok(self.vocabulary.iter().filter(|v| v.stack_id == stack).cloned().collect())
    }

    fn set_vocabulary_stack(&mut self, vocabulary: VocabularyId, stack: StackId) -> StoreResult<()> {
        if !self.has_stack(stack) {
            return Err(StoreError::ForeignKey(format!("{stack} does not exist")));
        }
        let row = self
            .vocabulary
            .iter_mut()
            .find(|v| v.id == vocabulary)
            .ok_or_else(|| not_found("vocabulary", vocabulary.0))?;
        row.stack_id = stack;
        debug!("{vocabulary} moved to {stack}");
        Ok(())
    }

    fn add_vocabulary(&mut self, vocabulary: NewVocabulary, stack: StackId) -> StoreResult<VocabularyId> {
        if !self.has_stack(stack) {
            return Err(StoreError::ForeignKey(format!("{stack} does not exist")));
        }
        let id = VocabularyId(self.next_id());
        self.vocabulary.push(Vocabulary {
            id,
            term: vocabulary.term,
            translation: vocabulary.translation,
            description: vocabulary.description.unwrap_or_default(),
            stack_id: stack,
        });
        Ok(id)
    }

    fn move_vocabulary(&mut self, from: StackId, to: StackId) -> StoreResult<usize> {
        if !self.has_stack(to) {
            return Err(StoreError::ForeignKey(format!("{to} does not exist")));
        }
        let mut moved = 0;
        for v in self.vocabulary.iter_mut().filter(|v| v.stack_id == from) {
            v.stack_id = to;
            moved += 1;
        }
        Ok(moved)
    }

    fn languages(&self) -> StoreResult<Vec<Language>> {
        Ok(self.languages.clone())
    }

    fn language(&self, id: LanguageId) -> StoreResult<Option<Language>> {
        Ok(self.languages.iter().find(|l| l.id == id).cloned())
    }

    fn create_language(&mut self, name: &str) -> StoreResult<LanguageId> {
        let id = LanguageId(self.next_id());
        self.languages.push(Language { id, name: name.to_string() });
        info!("created {id} ({name})");
        Ok(id)
    }

    fn delete_language(&mut self, id: LanguageId) -> StoreResult<()> {
        if !self.has_language(id) {
            return Err(not_found("language", id.0));
        }
        let in_use = self
            .courses
            .iter()
            .any(|c| c.source_language_id == id || c.target_language_id == id);
        if in_use {
            return Err(StoreError::LanguageInUse(id));
        }
        self.languages.retain(|l| l.id != id);
        info!("deleted {id}");
        Ok(())
    }

    fn courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.courses.clone())
    }

    fn create_course(&mut self, source: LanguageId, target: LanguageId) -> StoreResult<Course> {
        for lang in [source, target] {
            if !self.has_language(lang) {
                return Err(StoreError::ForeignKey(format!("{lang} does not exist")));
            }
        }
        let pot_stack_id = self.add_stack(StackStatus::Pot);
        let failed_stack_id = self.add_stack(StackStatus::Failed);
        let success_stack_id = self.add_stack(StackStatus::Success);
        let course = Course {
            id: CourseId(self.next_id()),
            source_language_id: source,
            target_language_id: target,
            use_source_language: false,
            use_target_language: true,
            pot_stack_id,
            failed_stack_id,
            success_stack_id,
        };
        self.courses.push(course);
        info!("created {} ({source} → {target})", course.id);
        Ok(course)
    }

    fn update_course(&mut self, course: &Course) -> StoreResult<()> {
        for lang in [course.source_language_id, course.target_language_id] {
            if !self.has_language(lang) {
                return Err(StoreError::ForeignKey(format!("{lang} does not exist")));
            }
        }
        let row = self
            .courses
            .iter_mut()
            .find(|c| c.id == course.id)
            .ok_or_else(|| not_found("course", course.id.0))?;
        *row = *course;
        Ok(())
    }

    fn delete_course_cascade(&mut self, id: CourseId) -> StoreResult<()> {
        let course = *self
            .courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("course", id.0))?;
        let stacks = course.stack_ids();

        self.vocabulary.retain(|v| !stacks.contains(&v.stack_id));
        for stack in stacks {
            self.delete_stack(stack)?;
        }
        self.courses.retain(|c| c.id != id);
        info!("deleted {id} with its stacks and vocabulary");
        Ok(())
    }
}

impl Preferences for MemoryStore {
    fn flag(&self, key: &str) -> bool {
        self.preferences.get(key).copied().unwrap_or(false)
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        self.preferences.insert(key.to_string(), value);
    }
}
