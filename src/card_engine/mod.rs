//! Card engine: gesture controllers, the round engine and the course flows
//! built on them.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `models`       | Domain records: vocabulary, stacks, courses, languages, directions |
//! | `geometry`     | Rectangles, overlap tests and slot centering |
//! | `config`       | Tunable constants (visual steps, toast durations, input limits) |
//! | `error`        | Store, input, round and course error types |
//! | `presentation` | What the engine needs from the UI host and from preferences |
//! | `persistence`  | Storage trait plus an in-memory store with JSON snapshots |
//! | `scheduler`    | Deferred tasks driven by an explicit clock |
//! | `validation`   | Length and blank checks for user input |
//! | `drag`         | Drag a card onto the delete zone or a selection slot |
//! | `swipe`        | Fanned, swipeable deck of cards |
//! | `round`        | One round: question queue, answer checking, stack moves |
//! | `course`       | Course creation, round start, progress, stack view, deletion |

pub mod config;
pub mod course;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod models;
pub mod persistence;
pub mod presentation;
pub mod round;
pub mod scheduler;
pub mod swipe;
pub mod validation;

pub use config::EngineConfig;
pub use course::{
    check_round_start, delete_course, intro_controller, progress, round_size, set_directions,
    start_round, CourseCreation, CourseProgress, ProgressTier, ScreenZones, StackView,
};
pub use drag::{
    CardKind, DragCard, DragLayout, DragSelectionController, DropOutcome, GestureState,
    SelectionEvent, Slot,
};
pub use error::{CourseError, InputError, RoundError, StoreError, StoreResult};
pub use geometry::Rect;
pub use models::{
    Course, CourseId, Direction, Language, LanguageId, NewVocabulary, Severity, Stack, StackId,
    StackStatus, Vocabulary, VocabularyId,
};
pub use persistence::{MemoryStore, Persistence};
pub use presentation::{Handle, Preferences, Presentation, HIDE_INTRO};
pub use round::{
    answer_matches, AnswerOutcome, Question, RoundEngine, RoundEvent, RoundItem, RoundRequest,
    RoundState, RoundSummary, RoundTask,
};
pub use scheduler::{Scheduler, TaskId};
pub use swipe::{DeckEvent, SwipeDeckController, SwipeDirection};
