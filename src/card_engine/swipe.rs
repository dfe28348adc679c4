use log::{debug, error};

use crate::card_engine::{
    config::EngineConfig,
    presentation::{Handle, Presentation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Back of the deck comes to the front.
    Up,
    /// Front card goes to the back.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    Advanced { direction: SwipeDirection, front: Handle },
}

/// Number of cards that receive stacking transforms for a deck of `len` cards.
pub fn window_size(len: usize, max_visible: usize) -> usize {
    len.min(max_visible)
}

/// An ordered deck shown as a fanned stack: front card on top, up to
/// `max_visible_cards` receding behind it.
#[derive(Debug)]
pub struct SwipeDeckController {
    config: EngineConfig,
    cards: Vec<Handle>,
    swiping: bool,
    moving: Option<Handle>,
    events: Vec<DeckEvent>,
}

impl SwipeDeckController {
    /// Build the deck and lay out its window.
    pub fn new<P: Presentation>(config: EngineConfig, cards: Vec<Handle>, ui: &mut P) -> Self {
        let deck = SwipeDeckController {
            config,
            cards,
            swiping: false,
            moving: None,
            events: Vec::new(),
        };
        deck.apply_window(ui);
        deck
    }

    pub fn cards(&self) -> &[Handle] {
        &self.cards
    }

    pub fn front(&self) -> Option<Handle> {
        self.cards.first().copied()
    }

    pub fn window_size(&self) -> usize {
        window_size(self.cards.len(), self.config.max_visible_cards)
    }

    /// A single card (or none) has nothing to cycle through.
    pub fn is_swipeable(&self) -> bool {
        self.cards.len() > 1
    }

    pub fn drain_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the last card of the deck to the front.
    ///
    /// For decks longer than the window this is not the card lifted during
    /// the gesture: [`Self::on_swipe_move`] lifts the back card of the window,
    /// while the rotation covers the whole deck so up and down stay inverse.
    pub fn rotate_up(&mut self) {
        if !self.cards.is_empty() {
            self.cards.rotate_right(1);
        }
    }

    /// Move the front card to the end of the deck.
    pub fn rotate_down(&mut self) {
        if !self.cards.is_empty() {
            self.cards.rotate_left(1);
        }
    }

    /// Stacking pose of window position `i`: (z-index, vertical offset, scale).
    fn pose(&self, i: usize) -> (i32, f32, f32) {
        let w = self.window_size();
        let z = (w - i) as i32;
        let dy = -(i as f32) * self.config.card_offset_step;
        let scale = 1.0 - i as f32 * self.config.card_scale_step;
        (z, dy, scale)
    }

    fn apply_window<P: Presentation>(&self, ui: &mut P) {
        for (i, &card) in self.cards.iter().take(self.window_size()).enumerate() {
            let (z, dy, scale) = self.pose(i);
            ui.set_z_index(card, z);
            ui.set_transform(card, 0.0, dy, scale);
        }
    }

    fn clear_poses<P: Presentation>(&self, ui: &mut P) {
        for &card in &self.cards {
            ui.set_z_index(card, 1);
            ui.set_transform(card, 0.0, 0.0, 1.0);
        }
    }

    // -----------------------------------------------------------------------
    // Gesture callbacks
    // -----------------------------------------------------------------------

    pub fn on_swipe_start(&mut self) {
        if !self.is_swipeable() {
            return;
        }
        if self.swiping {
            debug_assert!(false, "swipe started while another swipe is unresolved");
            error!("ignoring swipe start: another swipe is unresolved");
            return;
        }
        self.swiping = true;
    }

    /// Visual feedback only. Moving up lifts the back card of the window (the
    /// last visible one, not the deck's last card); moving down pushes the front.
    pub fn on_swipe_move<P: Presentation>(&mut self, ui: &mut P, dy: f32) {
        if !self.swiping {
            return;
        }
        let (index, scale) = if dy < 0.0 {
            (self.window_size() - 1, 1.0 + dy.abs() / self.config.lift_scale_divisor)
        } else {
            (0, 1.0 - dy.abs() / self.config.push_scale_divisor)
        };
        let card = self.cards[index];

        if let Some(previous) = self.moving.filter(|&h| h != card) {
            if let Some(i) = self.cards.iter().position(|&h| h == previous) {
                let (_, rest_dy, rest_scale) = self.pose(i);
                ui.set_transform(previous, 0.0, rest_dy, rest_scale);
            }
        }
        ui.set_transform(card, 0.0, dy, scale);
        self.moving = Some(card);
    }

    /// Finish the gesture: rotate according to the release direction and re-lay
    /// out the window. Returns `None` if no swipe was in progress.
    pub fn on_swipe_end<P: Presentation>(&mut self, ui: &mut P, dy: f32) -> Option<SwipeDirection> {
        if !self.swiping {
            return None;
        }
        self.swiping = false;
        self.moving = None;

        let direction = if dy < 0.0 {
            self.rotate_up();
            SwipeDirection::Up
        } else {
            self.rotate_down();
            SwipeDirection::Down
        };

        self.clear_poses(ui);
        self.apply_window(ui);

        if let Some(front) = self.front() {
            debug!("deck swiped {direction:?}, front is now {front}");
            self.events.push(DeckEvent::Advanced { direction, front });
        }
        Some(direction)
    }

    /// Release every card reference.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.swiping = false;
        self.moving = None;
    }
}
