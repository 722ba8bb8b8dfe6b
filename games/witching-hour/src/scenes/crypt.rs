use glam::Vec2;
use witching_engine::{Handoff, InputEvent, InputQueue};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::challenge::{Challenge, ChallengeRules};
use crate::events::{SOUND_CLICK, SOUND_SUCCESS};
use crate::puzzles::rotation::{RotateOutcome, RotationPuzzle, RUNES};
use crate::view::{CryptRuneView, CryptView, SceneView};

const RULES: ChallengeRules = ChallengeRules {
    scene: SceneKey::Crypt,
    title: "THE ANCIENT CRYPT",
    instructions: "Rotate the floating runes to their correct positions.\nClick each rune to rotate it until all align properly.",
    hint: "The ancient text reads: \"When all symbols face their destined direction, the seal shall break\"",
    success_banner: "THE ANCIENT SEAL IS BROKEN!",
    seconds: 180,
    show_next: true,
};

/// Turn each floating rune until it faces its direction.
pub struct CryptScene {
    challenge: Challenge,
    puzzle: RotationPuzzle,
}

impl CryptScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        Self {
            challenge: Challenge::start(RULES, handoff, cx),
            puzzle: RotationPuzzle::new(cx.bounds, cx.rng),
        }
    }

    fn click(&mut self, cx: &mut SceneContext, point: Vec2) {
        let Some(index) = self.puzzle.rune_at(point) else {
            return;
        };
        match self.puzzle.rotate(index) {
            RotateOutcome::Turned => cx.sound(SOUND_CLICK),
            RotateOutcome::Locked => {
                log::debug!("crypt: rune {index} locked");
                cx.sound(SOUND_SUCCESS);
            }
            RotateOutcome::Completed => self.challenge.complete(cx),
            RotateOutcome::Ignored => {}
        }
    }
}

impl Scene for CryptScene {
    fn key(&self) -> SceneKey {
        SceneKey::Crypt
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        let cmd = self.challenge.update(cx);
        if cmd != SceneCommand::Stay {
            return cmd;
        }
        if self.challenge.is_running() {
            for event in input.iter() {
                if let InputEvent::PointerDown { x, y } = *event {
                    self.click(cx, Vec2::new(x, y));
                }
            }
        }
        self.challenge.navigate(input)
    }

    fn view(&self) -> SceneView {
        SceneView::Crypt(CryptView {
            challenge: self.challenge.view(),
            runes: self
                .puzzle
                .runes()
                .iter()
                .zip(RUNES)
                .map(|(r, def)| CryptRuneView {
                    symbol: def.symbol,
                    position: r.position.into(),
                    rotation_deg: r.rotation_deg,
                    target_deg: r.target_deg,
                    locked: r.locked,
                })
                .collect(),
            locked: self.puzzle.locked_count(),
        })
    }
}
