//! Drag selection: drop a card on the delete zone or on one of two selection slots.
//!
//! ## Drop priority
//!
//! | Order | Target      | Condition             | Result |
//! |-------|-------------|-----------------------|--------|
//! | 1     | delete zone | overlap               | intro banner hidden / language deleted |
//! | 2     | source slot | overlap, slot empty   | card centered on slot, slot bound |
//! | 3     | learning    | overlap, slot empty   | card centered on slot, slot bound |
//! | 4     | none        | otherwise             | card reverts to its resting pose |
//!
//! A card overlapping the delete zone and a slot at the same time is deleted.

use std::collections::HashMap;

use log::{debug, error, warn};

use crate::card_engine::{
    config::EngineConfig,
    geometry::{centering_offset, overlaps, Rect},
    models::LanguageId,
    presentation::{Handle, Preferences, Presentation, HIDE_INTRO},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Language(LanguageId),
    IntroBanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCard {
    pub handle: Handle,
    pub kind: CardKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The language the user already speaks.
    Source,
    /// The language being learned.
    Learning,
}

/// Elements of one screen the controller works with.
#[derive(Debug, Clone)]
pub struct DragLayout {
    pub cards: Vec<DragCard>,
    pub delete_zone: Handle,
    pub source_zone: Option<Handle>,
    pub learning_zone: Option<Handle>,
    /// Siblings faded out while a card is lifted.
    pub darken: Vec<Handle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Deleted,
    Bound(Slot),
    Reverted,
    /// The call did not belong to an active gesture and changed nothing.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    LanguageDeleted(LanguageId),
    IntroDismissed,
    SlotBound { slot: Slot, language: LanguageId },
    SlotCleared { slot: Slot },
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    card: DragCard,
    start_rect: Rect,
    /// Offset already applied to the card when the drag began.
    origin: (f32, f32),
    delta: (f32, f32),
}

impl ActiveDrag {
    fn current_rect(&self) -> Rect {
        self.start_rect.translated(self.delta.0, self.delta.1)
    }
}

/// One instance per screen. Call [`DragSelectionController::reset`] when the
/// screen goes away or is rebuilt.
#[derive(Debug)]
pub struct DragSelectionController {
    config: EngineConfig,
    layout: Option<DragLayout>,
    offsets: HashMap<Handle, (f32, f32)>,
    source: Option<LanguageId>,
    learning: Option<LanguageId>,
    active: Option<ActiveDrag>,
    events: Vec<SelectionEvent>,
}

impl DragSelectionController {
    pub fn new(config: EngineConfig, layout: DragLayout) -> Self {
        DragSelectionController {
            config,
            layout: Some(layout),
            offsets: HashMap::new(),
            source: None,
            learning: None,
            active: None,
            events: Vec::new(),
        }
    }

    /// Swap in a freshly built layout (e.g. after the language list reloads).
    /// Slot bindings and any in-flight drag are dropped.
    pub fn rebind(&mut self, layout: DragLayout) {
        self.reset();
        self.layout = Some(layout);
    }

    /// Put every card of the current layout back in its resting pose, visible.
    /// Call after [`Self::rebind`] when the new layout reuses rendered cards,
    /// including ones hidden by an earlier drop on the delete zone.
    pub fn show_resting<P: Presentation>(&self, ui: &mut P) {
        for card in self.cards() {
            ui.set_visible(card.handle, true);
            ui.set_transform(card.handle, 0.0, 0.0, 1.0);
            ui.set_z_index(card.handle, 0);
            ui.set_opacity(card.handle, self.config.resting_opacity);
        }
    }

    pub fn cards(&self) -> &[DragCard] {
        self.layout.as_ref().map(|l| l.cards.as_slice()).unwrap_or(&[])
    }

    pub fn gesture_state(&self, handle: Handle) -> GestureState {
        match self.active {
            Some(a) if a.card.handle == handle => GestureState::Dragging,
            _ => GestureState::Idle,
        }
    }

    pub fn binding(&self, slot: Slot) -> Option<LanguageId> {
        match slot {
            Slot::Source   => self.source,
            Slot::Learning => self.learning,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some() && self.learning.is_some()
    }

    /// `(source, learning)` once both slots are bound.
    pub fn selection(&self) -> Option<(LanguageId, LanguageId)> {
        Some((self.source?, self.learning?))
    }

    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear slot bindings and release every element reference.
    pub fn reset(&mut self) {
        self.layout = None;
        self.offsets.clear();
        self.source = None;
        self.learning = None;
        self.active = None;
    }

    fn find_card(&self, handle: Handle) -> Option<DragCard> {
        self.layout.as_ref()?.cards.iter().find(|c| c.handle == handle).copied()
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<LanguageId> {
        match slot {
            Slot::Source   => &mut self.source,
            Slot::Learning => &mut self.learning,
        }
    }

    // -----------------------------------------------------------------------
    // Gesture callbacks
    // -----------------------------------------------------------------------

    pub fn on_drag_start<P: Presentation>(&mut self, ui: &mut P, handle: Handle) {
        if let Some(active) = self.active {
            debug_assert!(false, "drag started on {handle} while {} is still dragging", active.card.handle);
            error!("ignoring drag start on {handle}: {} is still dragging", active.card.handle);
            return;
        }
        let Some(card) = self.find_card(handle) else {
            warn!("drag start on unknown {handle}");
            return;
        };
        let Some(layout) = self.layout.as_ref() else { return };

        let start_rect = ui.bounding_rect(handle);
        let origin = self.offsets.get(&handle).copied().unwrap_or((0.0, 0.0));

        ui.set_opacity(handle, 1.0);
        ui.set_z_index(handle, self.config.elevated_z_index);
        for &sibling in &layout.darken {
            ui.set_opacity(sibling, 0.0);
        }
        ui.set_visible(layout.delete_zone, true);

        debug!("drag start {handle} at ({}, {})", start_rect.left, start_rect.top);
        self.active = Some(ActiveDrag { card, start_rect, origin, delta: (0.0, 0.0) });
    }

    pub fn on_drag_move<P: Presentation>(&mut self, ui: &mut P, handle: Handle, dx: f32, dy: f32) {
        let Some(layout) = self.layout.as_ref() else { return };
        let Some(active) = self.active.as_mut().filter(|a| a.card.handle == handle) else {
            warn!("drag move on {handle} without an active drag");
            return;
        };
        active.delta = (dx, dy);
        ui.set_transform(handle, active.origin.0 + dx, active.origin.1 + dy, 1.0);

        let primed = overlaps(&active.current_rect(), &ui.bounding_rect(layout.delete_zone));
        let scale = if primed { self.config.primed_delete_scale } else { 1.0 };
        ui.set_transform(layout.delete_zone, 0.0, 0.0, scale);
    }

    pub fn on_drag_end<P: Presentation, S: Preferences>(
        &mut self,
        ui: &mut P,
        prefs: &mut S,
        handle: Handle,
    ) -> DropOutcome {
        let Some(active) = self.active.filter(|a| a.card.handle == handle) else {
            warn!("drag end on {handle} without an active drag");
            return DropOutcome::Ignored;
        };
        self.active = None;
        let Some(layout) = self.layout.clone() else {
            return DropOutcome::Ignored;
        };

        let rect = active.current_rect();
        let over = |zone: Handle| overlaps(&rect, &ui.bounding_rect(zone));

        let target = if over(layout.delete_zone) {
            Some(None)
        } else if let CardKind::Language(_) = active.card.kind {
            let free_over = |slot: Slot, zone: Option<Handle>| {
                zone.filter(|&z| self.binding(slot).is_none() && over(z)).map(|z| (slot, z))
            };
            free_over(Slot::Source, layout.source_zone)
                .or_else(|| free_over(Slot::Learning, layout.learning_zone))
                .map(Some)
        } else {
            None
        };

        let outcome = match target {
            Some(None) => self.drop_on_delete(ui, prefs, &layout, active.card),
            Some(Some((slot, zone))) => self.drop_on_slot(ui, &active, slot, zone),
            None => self.revert(ui, active.card),
        };

        ui.set_transform(layout.delete_zone, 0.0, 0.0, 1.0);
        ui.set_visible(layout.delete_zone, false);
        for &sibling in &layout.darken {
            ui.set_opacity(sibling, 1.0);
        }
        debug!("drag end {handle}: {outcome:?}");
        outcome
    }

    // -----------------------------------------------------------------------
    // Drop actions
    // -----------------------------------------------------------------------

    fn drop_on_delete<P: Presentation, S: Preferences>(
        &mut self,
        ui: &mut P,
        prefs: &mut S,
        layout: &DragLayout,
        card: DragCard,
    ) -> DropOutcome {
        ui.set_z_index(card.handle, 0);
        match card.kind {
            CardKind::IntroBanner => {
                prefs.set_flag(HIDE_INTRO, true);
                ui.set_visible(card.handle, false);
                self.events.push(SelectionEvent::IntroDismissed);
            }
            CardKind::Language(id) => {
                ui.set_visible(card.handle, false);
                if let Some(l) = self.layout.as_mut() {
                    l.cards.retain(|c| c.handle != card.handle);
                }
                self.events.push(SelectionEvent::LanguageDeleted(id));
                for slot in [Slot::Source, Slot::Learning] {
                    if self.slot_mut(slot).take().is_some() {
                        self.events.push(SelectionEvent::SlotCleared { slot });
                    }
                }
                self.offsets.clear();
                for remaining in layout.cards.iter().filter(|c| c.handle != card.handle) {
                    ui.set_transform(remaining.handle, 0.0, 0.0, 1.0);
                }
            }
        }
        DropOutcome::Deleted
    }

    fn drop_on_slot<P: Presentation>(
        &mut self,
        ui: &mut P,
        active: &ActiveDrag,
        slot: Slot,
        zone: Handle,
    ) -> DropOutcome {
        let CardKind::Language(id) = active.card.kind else {
            return self.revert(ui, active.card);
        };
        let (dx, dy) = centering_offset(&active.start_rect, &ui.bounding_rect(zone));
        let offset = (active.origin.0 + dx, active.origin.1 + dy);
        ui.set_transform(active.card.handle, offset.0, offset.1, 1.0);
        ui.set_z_index(active.card.handle, 0);
        self.offsets.insert(active.card.handle, offset);

        // A card moved from one slot to the other releases the first.
        for other in [Slot::Source, Slot::Learning] {
            if other != slot && self.binding(other) == Some(id) {
                *self.slot_mut(other) = None;
                self.events.push(SelectionEvent::SlotCleared { slot: other });
            }
        }
        *self.slot_mut(slot) = Some(id);
        self.events.push(SelectionEvent::SlotBound { slot, language: id });
        DropOutcome::Bound(slot)
    }

    fn revert<P: Presentation>(&mut self, ui: &mut P, card: DragCard) -> DropOutcome {
        ui.set_opacity(card.handle, self.config.resting_opacity);
        ui.set_z_index(card.handle, 0);
        ui.set_transform(card.handle, 0.0, 0.0, 1.0);
        self.offsets.remove(&card.handle);

        if let CardKind::Language(id) = card.kind {
            for slot in [Slot::Source, Slot::Learning] {
                if self.binding(slot) == Some(id) {
                    *self.slot_mut(slot) = None;
                    self.events.push(SelectionEvent::SlotCleared { slot });
                }
            }
        }
        DropOutcome::Reverted
    }
}
