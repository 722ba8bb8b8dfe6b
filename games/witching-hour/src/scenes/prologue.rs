use witching_engine::{Handoff, InputQueue, Timeline, KEY_ENTER};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::view::{SceneView, StoryView};

const TITLE: &str = "Prologue: Echoes from the Kernel";
const PROMPT: &str = "[ Press ENTER to Continue ]";
pub const FADE_MS: u32 = 800;

/// Title card. Enter fades out to the next scene.
pub struct PrologueScene {
    timeline: Timeline<()>,
    fading: bool,
}

impl PrologueScene {
    pub fn enter() -> Self {
        Self {
            timeline: Timeline::new(),
            fading: false,
        }
    }
}

impl Scene for PrologueScene {
    fn key(&self) -> SceneKey {
        SceneKey::Prologue
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        if !self.timeline.advance(cx.dt()).is_empty() {
            return SceneCommand::Next(Handoff::empty());
        }
        if self.fading {
            return SceneCommand::Stay;
        }
        if input.has_key_down(KEY_ENTER) {
            self.fading = true;
            self.timeline.after(FADE_MS, ());
        }
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        SceneView::Story(StoryView {
            title: TITLE,
            lines: Vec::new(),
            prompt: Some(PROMPT),
            button: None,
            fading: self.fading,
        })
    }
}
