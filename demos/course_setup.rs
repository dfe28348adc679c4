//! Creating a course by dragging language cards, then browsing its pot.
//!
//! Run with: `RUST_LOG=debug cargo run --example course_setup`
//!
//! The "screen" is a table of rectangles; gestures are replayed as drag deltas
//! the way a touch layer would report them.

use std::collections::HashMap;

use vocab_deck::{
    card_engine::course::{self, CourseCreation, ScreenZones, StackView},
    EngineConfig, Handle, LanguageId, MemoryStore, NewVocabulary, Presentation, Rect, Severity,
    StackStatus, VocabularyId,
};

const DELETE: Handle = Handle(1000);
const SOURCE: Handle = Handle(1001);
const LEARNING: Handle = Handle(1002);

#[derive(Default)]
struct Screen {
    rects: HashMap<Handle, Rect>,
    offsets: HashMap<Handle, (f32, f32)>,
}

impl Presentation for Screen {
    fn bounding_rect(&self, handle: Handle) -> Rect {
        let rect = self.rects.get(&handle).copied().unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        let (dx, dy) = self.offsets.get(&handle).copied().unwrap_or((0.0, 0.0));
        rect.translated(dx, dy)
    }
    fn set_transform(&mut self, handle: Handle, dx: f32, dy: f32, _scale: f32) {
        self.offsets.insert(handle, (dx, dy));
    }
    fn set_z_index(&mut self, _: Handle, _: i32) {}
    fn set_opacity(&mut self, _: Handle, _: f32) {}
    fn set_visible(&mut self, _: Handle, _: bool) {}
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64) {
        println!("  toast [{severity}, {duration_ms}ms]: {message}");
    }
}

fn language_card(id: LanguageId) -> Handle {
    Handle(id.0)
}

fn vocabulary_card(id: VocabularyId) -> Handle {
    Handle(2000 + id.0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EngineConfig::default();
    let mut store = MemoryStore::new();
    let mut screen = Screen::default();
    screen.rects.insert(SOURCE, Rect::new(20.0, 40.0, 140.0, 60.0));
    screen.rects.insert(LEARNING, Rect::new(200.0, 40.0, 140.0, 60.0));
    screen.rects.insert(DELETE, Rect::new(150.0, 700.0, 60.0, 60.0));

    let zones = ScreenZones {
        delete_zone: DELETE,
        source_zone: Some(SOURCE),
        learning_zone: Some(LEARNING),
        darken: vec![],
    };
    let mut creation = CourseCreation::new(config.clone(), zones, language_card);
    creation.load(&store)?;

    let mut ids = Vec::new();
    for name in ["English", "Spanish", "Klingon"] {
        ids.push(creation.add_language(&mut store, &mut screen, name)?);
    }
    // Too long; rejected with a toast.
    let _ = creation.add_language(&mut store, &mut screen, "Old High German");

    // Lay the cards out in a row at y = 400.
    for (i, &id) in ids.iter().enumerate() {
        screen.rects.insert(language_card(id), Rect::new(20.0 + i as f32 * 110.0, 400.0, 100.0, 40.0));
    }
    let (en, es, tlh) = (ids[0], ids[1], ids[2]);

    let gestures = [
        (tlh, (-70.0, 320.0)),  // onto the delete zone
        (en, (10.0, -350.0)),   // onto the source slot
        (es, (80.0, -350.0)),   // onto the learning slot
    ];
    for (id, (dx, dy)) in gestures {
        let card = language_card(id);
        let c = creation.controller_mut();
        c.on_drag_start(&mut screen, card);
        c.on_drag_move(&mut screen, card, dx, dy);
        let outcome = c.on_drag_end(&mut screen, &mut store, card);
        println!("  dragged {id}: {outcome:?}");
        creation.process_events(&mut store, &mut screen)?;
        if outcome == vocab_deck::DropOutcome::Deleted {
            // Reload rebuilt the cards; lay the survivors out in a row again.
            for (i, l) in creation.languages().iter().enumerate() {
                screen.rects.insert(language_card(l.id), Rect::new(20.0 + i as f32 * 110.0, 400.0, 100.0, 40.0));
            }
        }
    }

    let c = creation.finish(&mut store)?;
    println!("  created {} → stacks {:?}", c.id, c.stack_ids().map(|s| s.to_string()));

    let mut pot = StackView::new(config.clone(), c, StackStatus::Pot, vocabulary_card);
    pot.load(&store, &mut screen)?;
    for (term, translation) in [("dog", "perro"), ("cat", "gato"), ("bird", "pájaro")] {
        let word = NewVocabulary { term: term.into(), translation: translation.into(), description: None };
        pot.add_vocabulary(&mut store, &mut screen, word)?;
    }
    let blank = NewVocabulary { term: "  ".into(), translation: "x".into(), description: None };
    let _ = pot.add_vocabulary(&mut store, &mut screen, blank);

    if let Some(deck) = pot.deck_mut() {
        deck.on_swipe_start();
        deck.on_swipe_move(&mut screen, 60.0);
        deck.on_swipe_end(&mut screen, 60.0);
    }
    if let Some(front) = pot.front() {
        println!("  front card after one swipe down: {} / {}", front.term, front.translation);
    }

    let progress = course::progress(&store, &c)?;
    println!("  progress: {}/{} ({:?})", progress.mastered, progress.total, progress.tier);

    pot.dispose();
    course::delete_course(&config, &mut store, &mut screen, &c)?;
    Ok(())
}
