use glam::Vec2;
use witching_engine::{Handoff, InputEvent, InputQueue};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::challenge::{Challenge, ChallengeRules};
use crate::events::SOUND_CLICK;
use crate::puzzles::slots::{SlotsOutcome, SlotsPuzzle};
use crate::view::{ProphecyView, SceneView, SlotRuneView};

const RULES: ChallengeRules = ChallengeRules {
    scene: SceneKey::Prophecy,
    title: "THE HAUNTED VAULT",
    instructions: "Arrange the ancient runes in the correct order to unlock the prophecy.\nDrag the runes to the slots below in the proper sequence.",
    hint: "The prophecy whispers: \"Moon wanes, Star shines, Lightning strikes, Crystal glows, Moon waxes\"",
    success_banner: "PROPHECY UNLOCKED!",
    seconds: 120,
    show_next: true,
};

/// Drag the five runes into the foretold order.
pub struct ProphecyScene {
    challenge: Challenge,
    puzzle: SlotsPuzzle,
}

impl ProphecyScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        Self {
            challenge: Challenge::start(RULES, handoff, cx),
            puzzle: SlotsPuzzle::new(cx.bounds, cx.rng),
        }
    }

    fn pointer(&mut self, cx: &mut SceneContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if self.puzzle.grab(Vec2::new(x, y)).is_some() {
                    cx.sound(SOUND_CLICK);
                }
            }
            InputEvent::PointerMove { x, y } => self.puzzle.drag_to(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => match self.puzzle.release(Vec2::new(x, y)) {
                SlotsOutcome::Solved => self.challenge.complete(cx),
                SlotsOutcome::Wrong => self.challenge.wrong(cx, "The runes resist. The order is wrong."),
                SlotsOutcome::Placed { slot } => log::debug!("prophecy: rune placed in slot {slot}"),
                SlotsOutcome::Returned | SlotsOutcome::Ignored => {}
            },
            _ => {}
        }
    }
}

impl Scene for ProphecyScene {
    fn key(&self) -> SceneKey {
        SceneKey::Prophecy
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        let cmd = self.challenge.update(cx);
        if cmd != SceneCommand::Stay {
            return cmd;
        }
        if self.challenge.is_running() {
            for event in input.iter() {
                self.pointer(cx, event);
            }
        }
        self.challenge.navigate(input)
    }

    fn view(&self) -> SceneView {
        let dragging = self.puzzle.dragging();
        SceneView::Prophecy(ProphecyView {
            challenge: self.challenge.view(),
            slots: self.puzzle.slots().iter().map(|&s| s.into()).collect(),
            slot_size: self.puzzle.slot_size(),
            rune_size: self.puzzle.rune_size(),
            runes: self
                .puzzle
                .runes()
                .iter()
                .enumerate()
                .map(|(i, r)| SlotRuneView {
                    symbol: r.symbol,
                    position: r.position.into(),
                    slot: r.slot,
                    dragging: dragging == Some(i),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CUSTOM_NEXT, EVENT_SOLVED, EVENT_WRONG};
    use crate::puzzles::slots::CORRECT_ORDER;
    use crate::scenes::testing::{custom, Harness};

    fn drag(scene: &ProphecyScene, symbol: &str, slot: usize) -> Vec<InputEvent> {
        let rune = scene.puzzle.runes().iter().find(|r| r.symbol == symbol).unwrap();
        let to = scene.puzzle.slots()[slot];
        vec![
            InputEvent::PointerDown { x: rune.position.x, y: rune.position.y },
            InputEvent::PointerMove { x: to.x, y: to.y },
            InputEvent::PointerUp { x: to.x, y: to.y },
        ]
    }

    #[test]
    fn arranging_the_prophecy_solves_it() {
        let mut h = Harness::new();
        let mut scene = ProphecyScene::enter(Handoff::empty(), &mut h.cx());
        for (slot, symbol) in CORRECT_ORDER.iter().enumerate() {
            let events = drag(&scene, symbol, slot);
            h.step(&mut scene, events);
        }
        assert!(h.has_event(EVENT_SOLVED));
        assert_eq!(
            h.step(&mut scene, vec![custom(CUSTOM_NEXT)]),
            SceneCommand::Next(Handoff::empty())
        );
    }

    #[test]
    fn wrong_order_counts_a_failure() {
        let mut h = Harness::new();
        let mut scene = ProphecyScene::enter(Handoff::empty(), &mut h.cx());
        for (slot, symbol) in CORRECT_ORDER.iter().rev().enumerate() {
            let events = drag(&scene, symbol, slot);
            h.step(&mut scene, events);
        }
        assert!(h.has_event(EVENT_WRONG));
        assert_eq!(scene.challenge.failures(), 1);
        assert!(scene.challenge.is_running());
    }

    #[test]
    fn runs_for_two_minutes() {
        let mut h = Harness::new();
        let scene = ProphecyScene::enter(Handoff::empty(), &mut h.cx());
        assert_eq!(scene.challenge.remaining(), 120);
    }
}
