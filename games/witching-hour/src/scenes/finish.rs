use witching_engine::{Handoff, InputQueue};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::events::{CUSTOM_NEXT_ROUND, SOUND_CLICK};
use crate::view::{FinishView, SceneView};

const TITLE: &str = "✨ Round 1 Complete! ✨";
const BUTTON: &str = "NEXT ROUND";

/// Round summary: time from the quest start to completion (or now), and
/// the quiz score.
pub struct FinishScene {
    time_taken: String,
    score: Option<u32>,
}

impl FinishScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        let now = cx.now_ms();
        let start = handoff.start_time.unwrap_or(now);
        let end = handoff.completion_time.unwrap_or(now);
        let time_taken = format!("{:.2}", (end - start) / 1000.0);
        log::info!("round finished in {time_taken} seconds");
        Self { time_taken, score: handoff.score }
    }
}

impl Scene for FinishScene {
    fn key(&self) -> SceneKey {
        SceneKey::Finish
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        if input.has_custom(CUSTOM_NEXT_ROUND) {
            cx.sound(SOUND_CLICK);
            return SceneCommand::Back(Handoff::with_start_time(cx.now_ms()));
        }
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        SceneView::Finish(FinishView {
            title: TITLE,
            time_taken: format!("⏱️ Time taken: {} seconds", self.time_taken),
            score_text: self.score.map(|s| format!("Your score: {s} / 10")),
            button: BUTTON,
        })
    }
}
