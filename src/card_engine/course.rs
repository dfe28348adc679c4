//! Course-level flows built on the controllers: creating a course by dragging
//! languages into slots, starting a round, showing progress, browsing a stack,
//! and deleting a course.

use log::{info, warn};

use crate::card_engine::{
    config::EngineConfig,
    drag::{CardKind, DragCard, DragLayout, DragSelectionController, SelectionEvent},
    error::{CourseError, RoundError, StoreError, StoreResult},
    models::{Course, Language, LanguageId, NewVocabulary, Severity, StackStatus, Vocabulary, VocabularyId},
    persistence::Persistence,
    presentation::{Handle, Preferences, Presentation, HIDE_INTRO},
    round::{RoundEngine, RoundRequest},
    swipe::SwipeDeckController,
    validation,
};

pub const LANGUAGE_IN_USE_MESSAGE: &str =
    "The language could not be deleted because it is used by a course.";
pub const COURSE_DELETED_MESSAGE: &str = "The course has been deleted.";

/// Fixed elements of a drag screen; cards are supplied separately.
#[derive(Debug, Clone)]
pub struct ScreenZones {
    pub delete_zone: Handle,
    pub source_zone: Option<Handle>,
    pub learning_zone: Option<Handle>,
    pub darken: Vec<Handle>,
}

impl ScreenZones {
    fn layout(&self, cards: Vec<DragCard>) -> DragLayout {
        DragLayout {
            cards,
            delete_zone: self.delete_zone,
            source_zone: self.source_zone,
            learning_zone: self.learning_zone,
            darken: self.darken.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Home screen intro banner
// ---------------------------------------------------------------------------

/// Drag controller for the home screen's intro banner, or `None` once the user
/// has dismissed it.
pub fn intro_controller<S: Preferences>(
    config: &EngineConfig,
    prefs: &S,
    banner: Handle,
    zones: &ScreenZones,
) -> Option<DragSelectionController> {
    if prefs.flag(HIDE_INTRO) {
        return None;
    }
    let card = DragCard { handle: banner, kind: CardKind::IntroBanner };
    Some(DragSelectionController::new(config.clone(), zones.layout(vec![card])))
}

// ---------------------------------------------------------------------------
// Course creation
// ---------------------------------------------------------------------------

pub struct CourseCreation {
    config: EngineConfig,
    zones: ScreenZones,
    card_handle: fn(LanguageId) -> Handle,
    languages: Vec<Language>,
    controller: DragSelectionController,
}

impl CourseCreation {
    /// `card_handle` maps each language to the handle of its rendered card.
    pub fn new(config: EngineConfig, zones: ScreenZones, card_handle: fn(LanguageId) -> Handle) -> Self {
        let controller = DragSelectionController::new(config.clone(), zones.layout(Vec::new()));
        CourseCreation { config, zones, card_handle, languages: Vec::new(), controller }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn controller(&self) -> &DragSelectionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DragSelectionController {
        &mut self.controller
    }

    /// (Re)load the language list and rebuild the draggable cards.
    /// Any slot selection is dropped.
    pub fn load<S: Persistence>(&mut self, store: &S) -> StoreResult<()> {
        self.languages = store.languages()?;
        let cards = self
            .languages
            .iter()
            .map(|l| DragCard { handle: (self.card_handle)(l.id), kind: CardKind::Language(l.id) })
            .collect();
        self.controller.rebind(self.zones.layout(cards));
        Ok(())
    }

    pub fn add_language<S: Persistence, P: Presentation>(
        &mut self,
        store: &mut S,
        ui: &mut P,
        name: &str,
    ) -> Result<LanguageId, CourseError> {
        let name = match validation::language_name(&self.config, name, self.languages.len()) {
            Ok(name) => name,
            Err(e) => {
                ui.notify(&e.to_string(), Severity::Danger, self.config.input_error_toast_ms);
                return Err(e.into());
            }
        };
        let id = store.create_language(name)?;
        self.load(&*store)?;
        self.controller.show_resting(ui);
        Ok(id)
    }

    /// Act on what the drag controller published: delete languages dropped on
    /// the delete zone. A language still used by a course stays and the user is
    /// told why.
    pub fn process_events<S: Persistence, P: Presentation>(&mut self, store: &mut S, ui: &mut P) -> StoreResult<()> {
        let mut reload = false;
        for event in self.controller.drain_events() {
            let SelectionEvent::LanguageDeleted(id) = event else { continue };
            reload = true;
            match store.delete_language(id) {
                Ok(()) => {}
                Err(StoreError::LanguageInUse(_)) => {
                    warn!("{id} is used by a course and was kept");
                    ui.notify(LANGUAGE_IN_USE_MESSAGE, Severity::Danger, self.config.store_error_toast_ms);
                }
                Err(e) => {
                    warn!("deleting {id} failed: {e}");
                    ui.notify(&e.to_string(), Severity::Danger, self.config.store_error_toast_ms);
                }
            }
        }
        if reload {
            self.load(&*store)?;
            self.controller.show_resting(ui);
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    /// Create the course from the two bound slots and release the screen.
    pub fn finish<S: Persistence>(&mut self, store: &mut S) -> Result<Course, CourseError> {
        let (source, target) = self.controller.selection().ok_or(CourseError::IncompleteSelection)?;
        let course = store.create_course(source, target)?;
        self.dispose();
        Ok(course)
    }

    pub fn dispose(&mut self) {
        self.controller.reset();
        self.languages.clear();
    }
}

// ---------------------------------------------------------------------------
// Course overview: round start, directions, progress, deletion
// ---------------------------------------------------------------------------

/// Questions in a round: the requested count, capped by what the pools hold.
pub fn round_size(requested: usize, pot_len: usize, failed_len: usize) -> usize {
    requested.min(pot_len + failed_len)
}

pub fn check_round_start(course: &Course, pot_len: usize, failed_len: usize) -> Result<(), RoundError> {
    if pot_len + failed_len == 0 {
        return Err(RoundError::Empty);
    }
    if !course.has_direction() {
        return Err(RoundError::NoDirectionEnabled);
    }
    Ok(())
}

/// Validate, persist the course's current settings and build the round.
/// Refusals are shown to the user as well as returned.
pub fn start_round<S: Persistence, P: Presentation>(
    config: &EngineConfig,
    store: &mut S,
    ui: &mut P,
    course: &Course,
    requested: usize,
    rng_seed: Option<u64>,
) -> Result<RoundEngine, RoundError> {
    let pot_len = store.vocabulary(course.pot_stack_id)?.len();
    let failed_len = store.vocabulary(course.failed_stack_id)?.len();
    if let Err(e) = check_round_start(course, pot_len, failed_len) {
        ui.notify(&e.to_string(), Severity::Danger, config.input_error_toast_ms);
        return Err(e);
    }
    store.update_course(course)?;
    let request = RoundRequest { count: round_size(requested, pot_len, failed_len), rng_seed };
    RoundEngine::start(config, &*store, *course, request)
}

pub fn set_directions<S: Persistence>(
    store: &mut S,
    course: &mut Course,
    use_source: bool,
    use_target: bool,
) -> StoreResult<()> {
    course.use_source_language = use_source;
    course.use_target_language = use_target;
    store.update_course(course)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub total: usize,
    pub mastered: usize,
    pub tier: ProgressTier,
}

pub fn progress_tier(mastered: usize, total: usize) -> ProgressTier {
    if total == 0 {
        return ProgressTier::Low;
    }
    let ratio = (mastered as f64 / total as f64 * 100.0).round() / 100.0;
    if ratio >= 0.67 {
        ProgressTier::High
    } else if ratio >= 0.34 {
        ProgressTier::Medium
    } else {
        ProgressTier::Low
    }
}

pub fn progress<S: Persistence>(store: &S, course: &Course) -> StoreResult<CourseProgress> {
    let mut total = 0;
    for stack in course.stack_ids() {
        total += store.vocabulary(stack)?.len();
    }
    let mastered = store.vocabulary(course.success_stack_id)?.len();
    Ok(CourseProgress { total, mastered, tier: progress_tier(mastered, total) })
}

/// Remove the course with everything it owns and tell the user how it went.
pub fn delete_course<S: Persistence, P: Presentation>(
    config: &EngineConfig,
    store: &mut S,
    ui: &mut P,
    course: &Course,
) -> StoreResult<()> {
    match store.delete_course_cascade(course.id) {
        Ok(()) => {
            ui.notify(COURSE_DELETED_MESSAGE, Severity::Success, config.info_toast_ms);
            Ok(())
        }
        Err(e) => {
            warn!("deleting {} failed: {e}", course.id);
            ui.notify(&e.to_string(), Severity::Danger, config.store_error_toast_ms);
            Err(e)
        }
    }
}

// ---------------------------------------------------------------------------
// Stack view
// ---------------------------------------------------------------------------

/// Browse one of a course's stacks as a swipeable deck.
pub struct StackView {
    config: EngineConfig,
    course: Course,
    status: StackStatus,
    card_handle: fn(VocabularyId) -> Handle,
    vocabulary: Vec<Vocabulary>,
    deck: Option<SwipeDeckController>,
}

impl StackView {
    pub fn new(
        config: EngineConfig,
        course: Course,
        status: StackStatus,
        card_handle: fn(VocabularyId) -> Handle,
    ) -> Self {
        StackView { config, course, status, card_handle, vocabulary: Vec::new(), deck: None }
    }

    pub fn status(&self) -> StackStatus {
        self.status
    }

    /// Vocabulary in deck order, newest first.
    pub fn vocabulary(&self) -> &[Vocabulary] {
        &self.vocabulary
    }

    pub fn deck_mut(&mut self) -> Option<&mut SwipeDeckController> {
        self.deck.as_mut()
    }

    /// Vocabulary item whose card is currently in front.
    pub fn front(&self) -> Option<&Vocabulary> {
        let front = self.deck.as_ref()?.front()?;
        self.vocabulary.iter().find(|v| (self.card_handle)(v.id) == front)
    }

    pub fn load<S: Persistence, P: Presentation>(&mut self, store: &S, ui: &mut P) -> StoreResult<()> {
        let mut vocabulary = store.vocabulary(self.course.stack_for(self.status))?;
        vocabulary.reverse();
        let cards = vocabulary.iter().map(|v| (self.card_handle)(v.id)).collect();
        self.vocabulary = vocabulary;
        self.deck = Some(SwipeDeckController::new(self.config.clone(), cards, ui));
        Ok(())
    }

    pub fn add_vocabulary<S: Persistence, P: Presentation>(
        &mut self,
        store: &mut S,
        ui: &mut P,
        input: NewVocabulary,
    ) -> Result<VocabularyId, CourseError> {
        let input = match validation::vocabulary(&self.config, input) {
            Ok(input) => input,
            Err(e) => {
                ui.notify(&e.to_string(), Severity::Danger, self.config.input_error_toast_ms);
                return Err(e.into());
            }
        };
        let id = store.add_vocabulary(input, self.course.stack_for(self.status))?;
        self.load(&*store, ui)?;
        Ok(id)
    }

    /// Put every item of this stack back into the pot.
    pub fn move_to_pot<S: Persistence>(&mut self, store: &mut S) -> StoreResult<usize> {
        if self.status == StackStatus::Pot {
            return Ok(0);
        }
        let moved = store.move_vocabulary(self.course.stack_for(self.status), self.course.pot_stack_id)?;
        info!("moved {moved} items from the {} stack of {} to the pot", self.status, self.course.id);
        self.vocabulary.clear();
        self.dispose();
        Ok(moved)
    }

    pub fn dispose(&mut self) {
        if let Some(deck) = self.deck.as_mut() {
            deck.reset();
        }
        self.deck = None;
    }
}
