//! One scripted round over a small English → Spanish course.
//!
//! Run with: `RUST_LOG=debug cargo run --example round`
//!
//! ## Key concepts demonstrated
//!
//! - `RoundRequest { rng_seed: Some(u64) }` makes the question directions
//!   reproducible.
//! - Failed items are asked before pot items; each answer moves the item to the
//!   success or failed stack immediately.
//! - Leaving the finished round is a deferred task driven by `advance_clock`.

use vocab_deck::{
    card_engine::course, EngineConfig, Handle, MemoryStore, NewVocabulary, Persistence,
    Presentation, Rect, RoundEngine, RoundRequest, RoundTask, Severity, StackStatus,
};

/// Console host: prints toasts, ignores visual changes.
struct Console;

impl Presentation for Console {
    fn bounding_rect(&self, _: Handle) -> Rect {
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
    fn set_transform(&mut self, _: Handle, _: f32, _: f32, _: f32) {}
    fn set_z_index(&mut self, _: Handle, _: i32) {}
    fn set_opacity(&mut self, _: Handle, _: f32) {}
    fn set_visible(&mut self, _: Handle, _: bool) {}
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64) {
        println!("  [{severity} {duration_ms}ms] {message}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EngineConfig::default();
    let mut store = MemoryStore::new();
    let mut ui = Console;

    let en = store.create_language("English")?;
    let es = store.create_language("Spanish")?;
    let mut c = store.create_course(en, es)?;
    for (term, translation) in [("dog", "perro"), ("cat", "gato"), ("house", "casa"), ("tree", "árbol")] {
        let word = NewVocabulary { term: term.into(), translation: translation.into(), description: None };
        store.add_vocabulary(word, c.pot_stack_id)?;
    }
    let retry = NewVocabulary { term: "water".into(), translation: "agua".into(), description: None };
    store.add_vocabulary(retry, c.failed_stack_id)?;

    course::set_directions(&mut store, &mut c, true, true)?;
    let mut round = course::start_round(&config, &mut store, &mut ui, &c, 10, Some(2024))?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Round over {} with {} questions", c.id, round.remaining());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut turn = 0;
    while let Some(question) = round.current() {
        // Get every third one wrong.
        let answer = if turn % 3 == 2 { "no idea".to_string() } else { question.expected.to_uppercase() };
        println!("  Q ({}): {:<8} A: {answer}", question.direction, question.prompt);
        let outcome = round.submit_answer(&mut store, &answer)?;
        let mark = if outcome.correct { "✓" } else { "✗" };
        println!("     {mark} expected {:?}, {} left", outcome.expected, outcome.remaining);
        round.notify_failures(&mut ui);
        turn += 1;
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&round.summary())?);

    for status in [StackStatus::Pot, StackStatus::Failed, StackStatus::Success] {
        let terms: Vec<String> = store.vocabulary(c.stack_for(status))?.into_iter().map(|v| v.term).collect();
        println!("  {status:<8} {}", terms.join(", "));
    }
    let progress = course::progress(&store, &c)?;
    println!("  progress: {}/{} ({:?})", progress.mastered, progress.total, progress.tier);

    let mut waited = 0;
    while !round.advance_clock(500).contains(&RoundTask::Exit) {
        waited += 500;
    }
    println!("  left the round after {}ms", waited + 500);
    Ok(())
}
