use witching_engine::{Handoff, InputQueue, Timeline};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::events::{CUSTOM_START, SOUND_CLICK};
use crate::view::{SceneView, StoryView};

const TITLE: &str = "The Haunted Quest begins!";
const STORY: [&str; 4] = [
    "It's Halloween night, and the evil Necromancer Varkon has cursed the nearby village.",
    "Only a brave adventurer (you) can stop him by solving magical coding puzzles.",
    "As soon as you are ready, click \"Start\" to begin your quest.",
    "This will start the timer.",
];
const BUTTON: &str = "Start";
const FADE_MS: u32 = 700;

/// Story screen. The Start button stamps the run's start time.
pub struct IntroScene {
    timeline: Timeline<()>,
    start_time: Option<f64>,
}

impl IntroScene {
    pub fn enter() -> Self {
        Self {
            timeline: Timeline::new(),
            start_time: None,
        }
    }
}

impl Scene for IntroScene {
    fn key(&self) -> SceneKey {
        SceneKey::Intro
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        if !self.timeline.advance(cx.dt()).is_empty() {
            if let Some(start_time) = self.start_time {
                return SceneCommand::Next(Handoff::with_start_time(start_time));
            }
        }
        if self.start_time.is_some() {
            return SceneCommand::Stay;
        }
        if input.has_custom(CUSTOM_START) {
            let now = cx.now_ms();
            log::info!("quest started at {now}");
            self.start_time = Some(now);
            cx.sound(SOUND_CLICK);
            self.timeline.after(FADE_MS, ());
        }
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        SceneView::Story(StoryView {
            title: TITLE,
            lines: STORY.to_vec(),
            prompt: None,
            button: Some(BUTTON),
            fading: self.start_time.is_some(),
        })
    }
}
