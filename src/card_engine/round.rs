//! One spaced-repetition round over a course.
//!
//! ## Lifecycle
//!
//! 1. [`RoundEngine::start`] loads the failed and pot stacks, builds the queue as
//!    `(failed ++ pot).take(count)` and assigns every item a [`Direction`].
//! 2. The host shows [`RoundEngine::current`] and calls either
//!    [`RoundEngine::submit_answer`] or [`RoundEngine::submit_skip`].
//! 3. Each submission moves the item to the success or failed stack, pops it off
//!    the queue and publishes [`RoundEvent`]s.
//! 4. When the queue empties the round is `Completed` and a [`RoundTask::Exit`]
//!    is scheduled so the last result stays visible for a moment.
//!
//! Store writes never hold the queue back: the queue has already advanced when
//! the write is issued, and a failed write is only reported afterwards.

use std::collections::VecDeque;

use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::card_engine::{
    config::EngineConfig,
    error::RoundError,
    models::{Course, CourseId, Direction, Severity, Vocabulary, VocabularyId},
    persistence::Persistence,
    presentation::Presentation,
    scheduler::Scheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRequest {
    /// Maximum number of questions.
    pub count: usize,
    /// Fixes the direction coin flips; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl RoundRequest {
    pub fn new(count: usize) -> Self {
        RoundRequest { count, rng_seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundItem {
    pub vocabulary: Vocabulary,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question<'a> {
    pub prompt: &'a str,
    pub expected: &'a str,
    pub direction: Direction,
    pub vocabulary: &'a Vocabulary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    Answered { vocabulary: VocabularyId, correct: bool },
    NextQuestion,
    Completed,
    PersistenceFailed { vocabulary: VocabularyId, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTask {
    /// Leave the round screen.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub vocabulary: Vocabulary,
    pub correct: bool,
    pub expected: String,
    pub remaining: usize,
}

/// Results of the round so far, split like the round's result stacks.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub course: CourseId,
    pub succeeded: Vec<Vocabulary>,
    pub failed: Vec<Vocabulary>,
    pub remaining: usize,
}

/// Case-insensitive comparison of trimmed strings; nothing fuzzier.
pub fn answer_matches(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Direction for each of `n` items given the course's enabled languages.
pub fn assign_directions<R: Rng>(course: &Course, n: usize, rng: &mut R) -> Result<Vec<Direction>, RoundError> {
    let directions = match (course.use_source_language, course.use_target_language) {
        (true, true) => (0..n)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    Direction::SourceToTarget
                } else {
                    Direction::TargetToSource
                }
            })
            .collect(),
        (true, false) => vec![Direction::SourceToTarget; n],
        (false, true) => vec![Direction::TargetToSource; n],
        (false, false) => return Err(RoundError::NoDirectionEnabled),
    };
    Ok(directions)
}

#[derive(Debug)]
pub struct RoundEngine {
    course: Course,
    queue: VecDeque<RoundItem>,
    succeeded: Vec<Vocabulary>,
    failed: Vec<Vocabulary>,
    failures: Vec<(VocabularyId, String)>,
    events: Vec<RoundEvent>,
    tasks: Scheduler<RoundTask>,
    exit_delay_ms: u64,
    toast_ms: u64,
}

impl RoundEngine {
    /// Build a round from already loaded pools.
    pub fn build(
        config: &EngineConfig,
        course: Course,
        failed_pool: Vec<Vocabulary>,
        pot_pool: Vec<Vocabulary>,
        request: RoundRequest,
    ) -> Result<Self, RoundError> {
        let mut rng: StdRng = match request.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        let items: Vec<Vocabulary> = failed_pool
            .into_iter()
            .chain(pot_pool)
            .take(request.count)
            .collect();
        if items.is_empty() {
            return Err(RoundError::Empty);
        }
        let directions = assign_directions(&course, items.len(), &mut rng)?;

        let queue: VecDeque<RoundItem> = items
            .into_iter()
            .zip(directions)
            .map(|(vocabulary, direction)| RoundItem { vocabulary, direction })
            .collect();

        info!("round started for {} with {} questions", course.id, queue.len());
        Ok(RoundEngine {
            course,
            queue,
            succeeded: Vec::new(),
            failed: Vec::new(),
            failures: Vec::new(),
            events: Vec::new(),
            tasks: Scheduler::new(),
            exit_delay_ms: config.round_exit_delay_ms,
            toast_ms: config.store_error_toast_ms,
        })
    }

    /// Load the course's failed and pot stacks and build a round from them.
    pub fn start<S: Persistence>(
        config: &EngineConfig,
        store: &S,
        course: Course,
        request: RoundRequest,
    ) -> Result<Self, RoundError> {
        let failed_pool = store.vocabulary(course.failed_stack_id)?;
        let pot_pool = store.vocabulary(course.pot_stack_id)?;
        Self::build(config, course, failed_pool, pot_pool, request)
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn state(&self) -> RoundState {
        if self.queue.is_empty() {
            RoundState::Completed
        } else {
            RoundState::Active
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn items(&self) -> impl Iterator<Item = &RoundItem> {
        self.queue.iter()
    }

    pub fn current(&self) -> Option<Question<'_>> {
        self.queue.front().map(|item| Question {
            prompt: item.direction.prompt(&item.vocabulary),
            expected: item.direction.expected(&item.vocabulary),
            direction: item.direction,
            vocabulary: &item.vocabulary,
        })
    }

    pub fn answered_succeeded(&self) -> &[Vocabulary] {
        &self.succeeded
    }

    pub fn answered_failed(&self) -> &[Vocabulary] {
        &self.failed
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            course: self.course.id,
            succeeded: self.succeeded.clone(),
            failed: self.failed.clone(),
            remaining: self.queue.len(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mark the current question as not known.
    pub fn submit_skip<S: Persistence>(&mut self, store: &mut S) -> Result<AnswerOutcome, RoundError> {
        self.resolve(store, |_| false)
    }

    /// Check `text` against the current question's expected answer.
    pub fn submit_answer<S: Persistence>(&mut self, store: &mut S, text: &str) -> Result<AnswerOutcome, RoundError> {
        self.resolve(store, |expected| answer_matches(text, expected))
    }

    fn resolve<S, F>(&mut self, store: &mut S, judge: F) -> Result<AnswerOutcome, RoundError>
    where
        S: Persistence,
        F: FnOnce(&str) -> bool,
    {
        let item = self.queue.pop_front().ok_or(RoundError::Completed)?;
        let expected = item.direction.expected(&item.vocabulary).to_string();
        let correct = judge(&expected);
        let mut vocabulary = item.vocabulary;

        let target = if correct {
            self.course.success_stack_id
        } else {
            self.course.failed_stack_id
        };
        match store.set_vocabulary_stack(vocabulary.id, target) {
            Ok(()) => vocabulary.stack_id = target,
            Err(e) => {
                warn!("could not move {} to {target}: {e}", vocabulary.id);
                self.failures.push((vocabulary.id, e.to_string()));
                self.events.push(RoundEvent::PersistenceFailed {
                    vocabulary: vocabulary.id,
                    message: e.to_string(),
                });
            }
        }

        if correct {
            self.succeeded.push(vocabulary.clone());
        } else {
            self.failed.push(vocabulary.clone());
        }
        self.events.push(RoundEvent::Answered { vocabulary: vocabulary.id, correct });

        if self.queue.is_empty() {
            info!(
                "round for {} completed: {} right, {} wrong",
                self.course.id,
                self.succeeded.len(),
                self.failed.len()
            );
            self.events.push(RoundEvent::Completed);
            self.tasks.schedule(self.exit_delay_ms, RoundTask::Exit);
        } else {
            self.events.push(RoundEvent::NextQuestion);
        }

        Ok(AnswerOutcome {
            vocabulary,
            correct,
            expected,
            remaining: self.queue.len(),
        })
    }

    /// Show a danger toast for every store write that failed since the last call.
    pub fn notify_failures<P: Presentation>(&mut self, ui: &mut P) {
        for (id, message) in self.failures.drain(..) {
            ui.notify(
                &format!("Could not save the result for {id}: {message}"),
                Severity::Danger,
                self.toast_ms,
            );
        }
    }

    /// Advance the round's clock and return deferred tasks that are now due.
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> Vec<RoundTask> {
        self.tasks.advance(elapsed_ms)
    }

    /// Cancel pending deferred tasks; call when the round screen is torn down.
    pub fn dispose(&mut self) {
        self.tasks.cancel_all();
    }
}
