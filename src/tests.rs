//! Scenario tests for the `vocab_deck` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`. Module-level unit tests live
//! next to each module; these walk whole user flows through the public API.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Round | Correct and wrong answers land in the right stacks; single-word round with both directions; failed items come first; completion iff the queue is empty |
//! | Determinism | Same seed → same directions; both-enabled rounds produce both directions across seeds |
//! | Course setup | Drag two languages into slots, finish, course persisted with default directions |
//! | Languages | A language used by a course survives a drop on the delete zone and can be dragged again |
//! | Deletion | Course cascade leaves no stacks or vocabulary behind |
//! | Deck | Swipe up then down restores the deck for every length; window capped at six |
//! | Exit | Leaving a finished round happens only after the configured delay |

use crate::card_engine::{
    course::{self, CourseCreation, ScreenZones, StackView},
    presentation::fake::RecordingUi,
    Course, Direction, DragSelectionController, DropOutcome, EngineConfig, Handle, LanguageId,
    MemoryStore, NewVocabulary, Persistence, Rect, RoundEngine, RoundEvent, RoundRequest,
    RoundState, RoundTask, Slot, StackStatus, SwipeDeckController, VocabularyId,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const DELETE: Handle = Handle(500);
const SOURCE: Handle = Handle(501);
const LEARNING: Handle = Handle(502);

fn word(term: &str, translation: &str) -> NewVocabulary {
    NewVocabulary { term: term.into(), translation: translation.into(), description: None }
}

/// Store with English → Spanish and the given pot vocabulary.
fn spanish_course(words: &[(&str, &str)]) -> (MemoryStore, Course) {
    let mut store = MemoryStore::new();
    let en = store.create_language("English").unwrap();
    let es = store.create_language("Spanish").unwrap();
    let course = store.create_course(en, es).unwrap();
    for (term, translation) in words {
        store.add_vocabulary(word(term, translation), course.pot_stack_id).unwrap();
    }
    (store, course)
}

fn request(count: usize, seed: u64) -> RoundRequest {
    RoundRequest { count, rng_seed: Some(seed) }
}

fn terms(store: &MemoryStore, course: &Course, status: StackStatus) -> Vec<String> {
    store
        .vocabulary(course.stack_for(status))
        .unwrap()
        .into_iter()
        .map(|v| v.term)
        .collect()
}

fn screen_ui() -> RecordingUi {
    RecordingUi::default()
        .with(SOURCE, Rect::new(0.0, 0.0, 120.0, 60.0))
        .with(LEARNING, Rect::new(200.0, 0.0, 120.0, 60.0))
        .with(DELETE, Rect::new(300.0, 700.0, 60.0, 60.0))
}

fn zones() -> ScreenZones {
    ScreenZones {
        delete_zone: DELETE,
        source_zone: Some(SOURCE),
        learning_zone: Some(LEARNING),
        darken: vec![],
    }
}

fn language_card(id: LanguageId) -> Handle {
    Handle(id.0)
}

fn vocabulary_card(id: VocabularyId) -> Handle {
    Handle(100 + id.0)
}

fn drag(
    c: &mut DragSelectionController,
    ui: &mut RecordingUi,
    store: &mut MemoryStore,
    h: Handle,
    dx: f32,
    dy: f32,
) -> DropOutcome {
    c.on_drag_start(ui, h);
    c.on_drag_move(ui, h, dx, dy);
    c.on_drag_end(ui, store, h)
}

// ── round ────────────────────────────────────────────────────────────────────

#[test]
fn right_and_wrong_answers_sort_into_stacks() {
    let (mut store, mut course) = spanish_course(&[("dog", "perro"), ("cat", "gato")]);
    course::set_directions(&mut store, &mut course, true, false).unwrap();

    let mut round = RoundEngine::start(&EngineConfig::default(), &store, course, request(10, 1)).unwrap();
    assert_eq!(round.current().unwrap().prompt, "dog");
    let first = round.submit_answer(&mut store, "  Perro ").unwrap();
    assert!(first.correct);
    assert_eq!(first.remaining, 1);

    let second = round.submit_answer(&mut store, "perro").unwrap();
    assert!(!second.correct);
    assert_eq!(second.expected, "gato");

    assert_eq!(terms(&store, &course, StackStatus::Success), vec!["dog"]);
    assert_eq!(terms(&store, &course, StackStatus::Failed), vec!["cat"]);
    assert!(terms(&store, &course, StackStatus::Pot).is_empty());
}

#[test]
fn single_word_round_with_both_directions() {
    let (mut store, mut course) = spanish_course(&[("dog", "perro")]);
    course::set_directions(&mut store, &mut course, true, true).unwrap();
    let config = EngineConfig::default();

    // First seed whose coin flip asks English → Spanish.
    let seed = (0..64)
        .find(|&s| {
            let round = RoundEngine::start(&config, &store, course, request(1, s)).unwrap();
            let all_forward = round.items().all(|i| i.direction == Direction::SourceToTarget);
            all_forward
        })
        .unwrap();

    let mut round = RoundEngine::start(&config, &store, course, request(1, seed)).unwrap();
    let question = round.current().unwrap();
    assert_eq!((question.prompt, question.expected), ("dog", "perro"));

    let outcome = round.submit_answer(&mut store, "Perro").unwrap();
    assert!(outcome.correct);
    assert_eq!(round.state(), RoundState::Completed);
    assert_eq!(terms(&store, &course, StackStatus::Success), vec!["dog"]);
    assert!(terms(&store, &course, StackStatus::Pot).is_empty());
}

#[test]
fn failed_items_are_asked_before_the_pot() {
    let (mut store, course) = spanish_course(&[("house", "casa")]);
    store.add_vocabulary(word("tree", "árbol"), course.failed_stack_id).unwrap();

    let round = RoundEngine::start(&EngineConfig::default(), &store, course, request(10, 3)).unwrap();
    let order: Vec<&str> = round.items().map(|i| i.vocabulary.term.as_str()).collect();
    assert_eq!(order, vec!["tree", "house"]);
}

#[test]
fn round_is_completed_exactly_when_queue_is_empty() {
    let (mut store, course) = spanish_course(&[("a", "1"), ("b", "2"), ("c", "3")]);
    let mut round = RoundEngine::start(&EngineConfig::default(), &store, course, request(2, 9)).unwrap();
    assert_eq!(round.remaining(), 2);

    while round.remaining() > 0 {
        assert_eq!(round.state(), RoundState::Active);
        round.submit_skip(&mut store).unwrap();
    }
    assert_eq!(round.state(), RoundState::Completed);
    assert!(round.current().is_none());
    assert!(round.drain_events().contains(&RoundEvent::Completed));
    // The item beyond `count` stays in the pot.
    assert_eq!(terms(&store, &course, StackStatus::Pot), vec!["c"]);
}

#[test]
fn finished_round_exits_after_delay() {
    let (mut store, course) = spanish_course(&[("dog", "perro")]);
    let mut round = RoundEngine::start(&EngineConfig::default(), &store, course, request(1, 5)).unwrap();
    round.submit_skip(&mut store).unwrap();

    assert!(round.advance_clock(1999).is_empty());
    assert_eq!(round.advance_clock(1), vec![RoundTask::Exit]);
    assert!(round.advance_clock(5000).is_empty());
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_gives_same_directions() {
    let words: Vec<(String, String)> = (0..20).map(|i| (format!("t{i}"), format!("r{i}"))).collect();
    let pairs: Vec<(&str, &str)> = words.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let (mut store, mut course) = spanish_course(&pairs);
    course::set_directions(&mut store, &mut course, true, true).unwrap();

    let directions = |seed| -> Vec<Direction> {
        RoundEngine::start(&EngineConfig::default(), &store, course, request(20, seed))
            .unwrap()
            .items()
            .map(|i| i.direction)
            .collect()
    };
    assert_eq!(directions(42), directions(42));

    let all: Vec<Direction> = [1, 2, 3].into_iter().flat_map(directions).collect();
    assert!(all.contains(&Direction::SourceToTarget));
    assert!(all.contains(&Direction::TargetToSource));
}

// ── course setup ─────────────────────────────────────────────────────────────

#[test]
fn dragging_two_languages_creates_a_course() {
    let mut store = MemoryStore::new();
    let mut ui = screen_ui();
    let mut screen = CourseCreation::new(EngineConfig::default(), zones(), language_card);
    screen.load(&store).unwrap();
    let en = screen.add_language(&mut store, &mut ui, " English ").unwrap();
    let es = screen.add_language(&mut store, &mut ui, "Spanish").unwrap();
    ui.base.insert(language_card(en), Rect::new(0.0, 400.0, 80.0, 40.0));
    ui.base.insert(language_card(es), Rect::new(100.0, 400.0, 80.0, 40.0));

    let c = screen.controller_mut();
    assert_eq!(drag(c, &mut ui, &mut store, language_card(es), 110.0, -390.0), DropOutcome::Bound(Slot::Learning));
    assert_eq!(drag(c, &mut ui, &mut store, language_card(en), 10.0, -390.0), DropOutcome::Bound(Slot::Source));

    let course = screen.finish(&mut store).unwrap();
    let stored = store.courses().unwrap();
    assert_eq!(stored, vec![course]);
    assert_eq!(store.language(en).unwrap().unwrap().name, "English");
    assert!(course.use_target_language && !course.use_source_language);
}

#[test]
fn language_in_use_survives_delete_drop() {
    let mut store = MemoryStore::new();
    let mut ui = screen_ui();
    let mut screen = CourseCreation::new(EngineConfig::default(), zones(), language_card);
    let en = screen.add_language(&mut store, &mut ui, "English").unwrap();
    let es = screen.add_language(&mut store, &mut ui, "Spanish").unwrap();
    let de = screen.add_language(&mut store, &mut ui, "German").unwrap();
    store.create_course(en, de).unwrap();
    ui.base.insert(language_card(de), Rect::new(300.0, 400.0, 60.0, 40.0));

    let outcome = drag(screen.controller_mut(), &mut ui, &mut store, language_card(de), 0.0, 300.0);
    assert_eq!(outcome, DropOutcome::Deleted);
    screen.process_events(&mut store, &mut ui).unwrap();

    assert!(store.language(de).unwrap().is_some());
    assert!(store.language(es).unwrap().is_some());
    assert_eq!(screen.controller().cards().len(), 3);
    assert_eq!(ui.visible[&language_card(de)], true);
    assert_eq!(ui.transform(language_card(de)), (0.0, 0.0, 1.0));
    assert_eq!(ui.opacity[&language_card(de)], 0.8);

    // The kept card can be picked up again.
    let outcome = drag(screen.controller_mut(), &mut ui, &mut store, language_card(de), -90.0, -390.0);
    assert_eq!(outcome, DropOutcome::Bound(Slot::Learning));
    assert_eq!(ui.notifications.len(), 1);
    assert_eq!(ui.notifications[0].0, course::LANGUAGE_IN_USE_MESSAGE);
}

// ── deletion ─────────────────────────────────────────────────────────────────

#[test]
fn deleting_a_course_leaves_nothing_behind() {
    let (mut store, course) = spanish_course(&[("dog", "perro"), ("cat", "gato")]);
    let mut round = RoundEngine::start(&EngineConfig::default(), &store, course, request(1, 1)).unwrap();
    round.submit_skip(&mut store).unwrap();

    let mut ui = RecordingUi::default();
    course::delete_course(&EngineConfig::default(), &mut store, &mut ui, &course).unwrap();
    assert!(store.courses().unwrap().is_empty());
    assert!(store.stacks().is_empty());
    for stack in course.stack_ids() {
        assert!(store.vocabulary(stack).unwrap().is_empty());
    }
}

// ── deck ─────────────────────────────────────────────────────────────────────

#[test]
fn swipe_up_then_down_restores_any_deck() {
    for len in 2..15u32 {
        let mut ui = RecordingUi::default();
        let cards: Vec<Handle> = (0..len).map(Handle).collect();
        let mut deck = SwipeDeckController::new(EngineConfig::default(), cards.clone(), &mut ui);
        assert!(deck.window_size() <= 6);

        deck.on_swipe_start();
        deck.on_swipe_end(&mut ui, -30.0);
        deck.on_swipe_start();
        deck.on_swipe_end(&mut ui, 30.0);
        assert_eq!(deck.cards(), cards.as_slice(), "len={len}");
    }
}

#[test]
fn stack_view_browses_what_the_round_failed() {
    let (mut store, mut course) = spanish_course(&[("dog", "perro"), ("cat", "gato"), ("cow", "vaca")]);
    course::set_directions(&mut store, &mut course, true, false).unwrap();
    let mut round = RoundEngine::start(&EngineConfig::default(), &store, course, request(3, 1)).unwrap();
    while round.remaining() > 0 {
        round.submit_skip(&mut store).unwrap();
    }

    let mut ui = RecordingUi::default();
    let mut view = StackView::new(EngineConfig::default(), course, StackStatus::Failed, vocabulary_card);
    view.load(&store, &mut ui).unwrap();
    assert_eq!(view.vocabulary().len(), 3);
    assert_eq!(view.front().unwrap().term, "cow");

    assert_eq!(view.move_to_pot(&mut store).unwrap(), 3);
    let progress = course::progress(&store, &course).unwrap();
    assert_eq!((progress.total, progress.mastered), (3, 0));
}
