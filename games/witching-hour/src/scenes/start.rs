use witching_engine::{Handoff, InputQueue, Timeline, KEY_ENTER};

use super::prologue::FADE_MS;
use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::view::{SceneView, StoryView};

const TITLE: &str = "ROUND 1: THE CRYPT OF RIDDLES";
const STORY: [&str; 3] = [
    "A terminal flickers alive:",
    ">>> ERROR: SIGIL OF SYNTAX CORRUPTED",
    ">>> SOLVE OR BE SEALED FOREVER",
];
const PROMPT: &str = "[ Press ENTER to Continue ]";
/// Typewriter speed, one line per tick.
const LINE_MS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartTimer {
    RevealLine,
    ShowPrompt,
    Leave,
}

/// Round title with a typewriter story reveal.
pub struct StartScene {
    timeline: Timeline<StartTimer>,
    revealed: usize,
    prompt_visible: bool,
    fading: bool,
}

impl StartScene {
    pub fn enter() -> Self {
        let mut timeline = Timeline::new();
        timeline.every(LINE_MS, StartTimer::RevealLine);
        timeline.after(STORY.len() as u32 * 100 + 1000, StartTimer::ShowPrompt);
        Self {
            timeline,
            revealed: 0,
            prompt_visible: false,
            fading: false,
        }
    }
}

impl Scene for StartScene {
    fn key(&self) -> SceneKey {
        SceneKey::Start
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        for timer in self.timeline.advance(cx.dt()) {
            match timer {
                StartTimer::RevealLine => self.revealed = (self.revealed + 1).min(STORY.len()),
                StartTimer::ShowPrompt => self.prompt_visible = true,
                StartTimer::Leave => return SceneCommand::Next(Handoff::empty()),
            }
        }
        if self.fading {
            return SceneCommand::Stay;
        }
        if input.has_key_down(KEY_ENTER) {
            self.fading = true;
            self.timeline.clear();
            self.timeline.after(FADE_MS, StartTimer::Leave);
        }
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        SceneView::Story(StoryView {
            title: TITLE,
            lines: STORY[..self.revealed].to_vec(),
            prompt: self.prompt_visible.then_some(PROMPT),
            button: None,
            fading: self.fading,
        })
    }
}
