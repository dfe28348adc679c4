//! # vocab_deck
//!
//! The interactive card-stack engine of a flashcard vocabulary trainer.
//!
//! Vocabulary lives in three stacks per course: the *pot* of items still to
//! learn, the *failed* stack and the *success* stack. The engine drives the
//! screens that move cards between them, while rendering, gesture recognition
//! and storage stay with the host behind small traits.
//!
//! ## How it works
//!
//! 1. Implement [`Presentation`] for your UI layer (bounding rectangles,
//!    transforms, z-index, opacity, visibility, toasts) and [`Persistence`] for
//!    your storage, or use the bundled [`MemoryStore`].
//! 2. Feed gesture callbacks into the controllers:
//!    [`DragSelectionController`] for picking a course's two languages (or
//!    dismissing the intro banner), [`SwipeDeckController`] for browsing a stack.
//! 3. Run a [`RoundEngine`] over a course: it builds a question queue from the
//!    failed and pot stacks, checks typed answers and moves each item to the
//!    success or failed stack.
//! 4. The `course` flows in [`card_engine::course`] tie these together with the
//!    store: creating courses, starting rounds, progress, deletion.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` in a [`RoundRequest`] to
//!   reproduce the same question directions every time.
//! - **No timers**: deferred work (leaving a finished round) goes through a
//!   [`Scheduler`] advanced by the host's clock.
//! - **Event outboxes**: controllers record what happened; call `drain_events()`
//!   after each callback.
//!
//! ## Quick start
//!
//! ```rust
//! use vocab_deck::{EngineConfig, MemoryStore, NewVocabulary, Persistence, RoundEngine, RoundRequest};
//!
//! let mut store = MemoryStore::new();
//! let en = store.create_language("English")?;
//! let es = store.create_language("Spanish")?;
//! let course = store.create_course(en, es)?;
//! store.add_vocabulary(
//!     NewVocabulary { term: "dog".into(), translation: "perro".into(), description: None },
//!     course.pot_stack_id,
//! )?;
//!
//! let config = EngineConfig::default();
//! let request = RoundRequest { count: 10, rng_seed: Some(7) };
//! let mut round = RoundEngine::start(&config, &store, course, request)?;
//! while let Some(question) = round.current() {
//!     println!("Q: {}", question.prompt);
//!     let answer = question.expected.to_string();
//!     round.submit_answer(&mut store, &answer)?;
//! }
//!
//! assert_eq!(store.vocabulary(course.success_stack_id)?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod card_engine;

// Convenience re-exports so callers can use `vocab_deck::RoundEngine`
// directly without reaching into `card_engine::`.
pub use card_engine::{
    AnswerOutcome, CardKind, Course, CourseError, CourseId, DeckEvent, Direction, DragCard,
    DragLayout, DragSelectionController, DropOutcome, EngineConfig, Handle, InputError, Language,
    LanguageId, MemoryStore, NewVocabulary, Persistence, Preferences, Presentation, Rect,
    RoundEngine, RoundError, RoundEvent, RoundRequest, RoundState, RoundSummary, RoundTask,
    Scheduler, SelectionEvent, Severity, Slot, StackId, StackStatus, StoreError, SwipeDeckController,
    SwipeDirection, Vocabulary, VocabularyId,
};

#[cfg(test)]
mod tests;
