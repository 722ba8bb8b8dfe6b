use glam::Vec2;
use witching_engine::{Handoff, InputEvent, InputQueue, Timeline};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::challenge::{Challenge, ChallengeRules};
use crate::events::SOUND_CLICK;
use crate::puzzles::sequence::{SequencePuzzle, SequenceStep, CONNECTIONS, ELEMENTS};
use crate::view::{ForestView, NodeView, SceneView};

const RULES: ChallengeRules = ChallengeRules {
    scene: SceneKey::Forest,
    title: "THE ANCIENT FOREST",
    instructions: "Activate the ancient symbols in the correct order to reveal the hidden path.\nClick symbols to trace the mystical sequence.",
    hint: "The spirits whisper: \"Earth to Air, Air to Spirit, Spirit to Fire, Fire to Water, Water completes the circle\"",
    success_banner: "THE PATH IS REVEALED!",
    seconds: 150,
    show_next: true,
};

/// How long a wrongly clicked symbol stays red.
const FLASH_MS: u32 = 500;

/// Click the pentagram's elements in sequence.
pub struct ForestScene {
    challenge: Challenge,
    puzzle: SequencePuzzle,
    flash: Option<usize>,
    flash_timer: Timeline<()>,
}

impl ForestScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        Self {
            challenge: Challenge::start(RULES, handoff, cx),
            puzzle: SequencePuzzle::new(cx.bounds),
            flash: None,
            flash_timer: Timeline::new(),
        }
    }

    fn click(&mut self, cx: &mut SceneContext, point: Vec2) {
        let Some(index) = self.puzzle.node_at(point) else {
            return;
        };
        match self.puzzle.activate(index) {
            SequenceStep::Advanced => cx.sound(SOUND_CLICK),
            SequenceStep::Completed => self.challenge.complete(cx),
            SequenceStep::Reset => {
                self.flash = Some(index);
                self.flash_timer.clear();
                self.flash_timer.after(FLASH_MS, ());
                self.challenge.wrong(cx, "The path collapses! Start again.");
            }
            SequenceStep::Ignored => {}
        }
    }
}

impl Scene for ForestScene {
    fn key(&self) -> SceneKey {
        SceneKey::Forest
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        if !self.flash_timer.advance(cx.dt()).is_empty() {
            self.flash = None;
        }
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
        let positions = self.puzzle.positions();
        SceneView::Forest(ForestView {
            challenge: self.challenge.view(),
            nodes: ELEMENTS
                .iter()
                .enumerate()
                .map(|(i, e)| NodeView {
                    symbol: e.symbol,
                    name: e.name,
                    position: positions[i].into(),
                    active: self.puzzle.is_active(i),
                    flash: self.flash == Some(i),
                })
                .collect(),
            star: self.puzzle.star_segments().into_iter().map(Into::into).collect(),
            path: self.puzzle.path_segments().into_iter().map(Into::into).collect(),
            connections: CONNECTIONS.to_vec(),
        })
    }
}
