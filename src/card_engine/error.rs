use thiserror::Error;

use crate::card_engine::models::LanguageId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} is still used by a course")]
    LanguageInUse(LanguageId),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("foreign key violation: {0}")]
    ForeignKey(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Rejected user input. Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("You can only have {0} languages.")]
    LanguageLimit(usize),
}

#[derive(Error, Debug)]
pub enum RoundError {
    #[error("Please select at least one language for the questions to start the round.")]
    NoDirectionEnabled,

    #[error("There are no vocabulary in the pot stack. Please add some vocabulary to the pot stack to start the round.")]
    Empty,

    #[error("the round has already been completed")]
    Completed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("both a source and a learning language must be selected")]
    IncompleteSelection,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
