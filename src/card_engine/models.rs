use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! id_type {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

id_type!(VocabularyId, "vocabulary");
id_type!(StackId, "stack");
id_type!(CourseId, "course");
id_type!(LanguageId, "language");

// ---------------------------------------------------------------------------
// Stored rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackStatus {
    Pot,
    Failed,
    Success,
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackStatus::Pot     => write!(f, "pot"),
            StackStatus::Failed  => write!(f, "failed"),
            StackStatus::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub id: StackId,
    pub status: StackStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub term: String,
    pub translation: String,
    pub description: String,
    pub stack_id: StackId,
}

/// A vocabulary item before it has been assigned an id and a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVocabulary {
    pub term: String,
    pub translation: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
}

/// Course flags are stored as 0/1 integers.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(d)? > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub source_language_id: LanguageId,
    pub target_language_id: LanguageId,
    #[serde(with = "flag")]
    pub use_source_language: bool,
    #[serde(with = "flag")]
    pub use_target_language: bool,
    pub pot_stack_id: StackId,
    pub failed_stack_id: StackId,
    pub success_stack_id: StackId,
}

impl Course {
    /// Stack id holding the vocabulary with the given status.
    pub fn stack_for(&self, status: StackStatus) -> StackId {
        match status {
            StackStatus::Pot     => self.pot_stack_id,
            StackStatus::Failed  => self.failed_stack_id,
            StackStatus::Success => self.success_stack_id,
        }
    }

    pub fn stack_ids(&self) -> [StackId; 3] {
        [self.pot_stack_id, self.failed_stack_id, self.success_stack_id]
    }

    /// A round needs at least one question direction.
    pub fn has_direction(&self) -> bool {
        self.use_source_language || self.use_target_language
    }
}

// ---------------------------------------------------------------------------
// Round / presentation metadata
// ---------------------------------------------------------------------------

/// Which side of a vocabulary item is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Prompt with the term, expect the translation.
    SourceToTarget,
    /// Prompt with the translation, expect the term.
    TargetToSource,
}

impl Direction {
    pub fn prompt(self, vocabulary: &Vocabulary) -> &str {
        match self {
            Direction::SourceToTarget => &vocabulary.term,
            Direction::TargetToSource => &vocabulary.translation,
        }
    }

    pub fn expected(self, vocabulary: &Vocabulary) -> &str {
        match self {
            Direction::SourceToTarget => &vocabulary.translation,
            Direction::TargetToSource => &vocabulary.term,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SourceToTarget => write!(f, "source→target"),
            Direction::TargetToSource => write!(f, "target→source"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger  => write!(f, "danger"),
        }
    }
}
