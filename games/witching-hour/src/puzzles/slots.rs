//! Prophecy ordering: drag five runes into five slots in the foretold order.

use glam::Vec2;
use witching_engine::{Bounds, Rng};

pub const SLOT_COUNT: usize = 5;
/// Moon wanes, Star shines, Lightning strikes, Crystal glows, Moon waxes.
pub const CORRECT_ORDER: [&str; SLOT_COUNT] = ["☽", "✦", "⚡", "🔮", "☾"];

#[derive(Debug, Clone, PartialEq)]
pub struct SlotRune {
    pub symbol: &'static str,
    pub origin: Vec2,
    pub position: Vec2,
    pub slot: Option<usize>,
}

/// Result of releasing a dragged rune.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotsOutcome {
    /// Nothing was being dragged, or the puzzle is solved.
    Ignored,
    Placed { slot: usize },
    /// Dropped away from every slot; back to its origin.
    Returned,
    /// All slots filled in the correct order.
    Solved,
    /// All slots filled, but the order is wrong.
    Wrong,
}

#[derive(Debug, Clone)]
pub struct SlotsPuzzle {
    slots: [Vec2; SLOT_COUNT],
    slot_size: f32,
    rune_size: f32,
    runes: Vec<SlotRune>,
    dragging: Option<usize>,
    solved: bool,
}

impl SlotsPuzzle {
    /// Lay out the slot row and a shuffled row of runes above it.
    pub fn new(bounds: Bounds, rng: &mut Rng) -> Self {
        let (w, h) = (bounds.width, bounds.height);
        let column = |i: usize| w * 0.15 + i as f32 * w * 0.15;
        let slots = std::array::from_fn(|i| Vec2::new(column(i), h * 0.5));

        let mut symbols = CORRECT_ORDER;
        rng.shuffle(&mut symbols);
        let runes = symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                let origin = Vec2::new(column(i), h * 0.4);
                SlotRune { symbol, origin, position: origin, slot: None }
            })
            .collect();

        Self {
            slots,
            slot_size: (w * 0.08).min(80.0),
            rune_size: (w * 0.06).min(48.0),
            runes,
            dragging: None,
            solved: false,
        }
    }

    pub fn slots(&self) -> &[Vec2; SLOT_COUNT] {
        &self.slots
    }

    pub fn slot_size(&self) -> f32 {
        self.slot_size
    }

    pub fn rune_size(&self) -> f32 {
        self.rune_size
    }

    pub fn runes(&self) -> &[SlotRune] {
        &self.runes
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Symbols currently in each slot, left to right.
    pub fn order(&self) -> [Option<&'static str>; SLOT_COUNT] {
        let mut order = [None; SLOT_COUNT];
        for rune in &self.runes {
            if let Some(slot) = rune.slot {
                order[slot] = Some(rune.symbol);
            }
        }
        order
    }

    /// Pick up the rune under `point`. The most recently drawn rune wins
    /// when several overlap.
    pub fn grab(&mut self, point: Vec2) -> Option<usize> {
        if self.solved {
            return None;
        }
        let hit = self
            .runes
            .iter()
            .rposition(|r| r.position.distance(point) <= self.rune_size);
        self.dragging = hit;
        hit
    }

    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(i) = self.dragging {
            self.runes[i].position = point;
        }
    }

    /// Drop the dragged rune at `point`.
    pub fn release(&mut self, point: Vec2) -> SlotsOutcome {
        let Some(index) = self.dragging.take() else {
            return SlotsOutcome::Ignored;
        };
        if self.solved {
            return SlotsOutcome::Ignored;
        }

        let reach = self.slot_size / 1.5;
        let target = self.slots.iter().position(|s| s.distance(point) < reach);

        let Some(slot) = target else {
            let rune = &mut self.runes[index];
            rune.position = rune.origin;
            rune.slot = None;
            return SlotsOutcome::Returned;
        };

        // Evict whoever held this slot.
        for (i, other) in self.runes.iter_mut().enumerate() {
            if i != index && other.slot == Some(slot) {
                other.position = other.origin;
                other.slot = None;
            }
        }
        let rune = &mut self.runes[index];
        rune.position = self.slots[slot];
        rune.slot = Some(slot);

        self.check(slot)
    }

    fn check(&mut self, placed: usize) -> SlotsOutcome {
        let order = self.order();
        if order.iter().any(Option::is_none) {
            return SlotsOutcome::Placed { slot: placed };
        }
        let correct = order
            .iter()
            .zip(CORRECT_ORDER)
            .all(|(have, want)| *have == Some(want));
        if correct {
            self.solved = true;
            SlotsOutcome::Solved
        } else {
            SlotsOutcome::Wrong
        }
    }
}
