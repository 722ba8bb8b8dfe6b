use witching_engine::{Handoff, InputEvent, InputQueue};

use super::{Scene, SceneCommand, SceneContext, SceneKey};
use crate::events::{CUSTOM_NEXT, CUSTOM_SUBMIT, EVENT_SCORE, SOUND_CLICK, SOUND_SUCCESS};
use crate::puzzles::quiz::{Quiz, QUESTIONS};
use crate::view::{QuestionView, QuizView, SceneView};

const TITLE: &str = "Company Aptitude Quiz";

/// Ten typed answers, scored once on submit. Host text fields report
/// under the question id.
pub struct QuizScene {
    quiz: Quiz,
    start_time: f64,
    /// Wall clock at submit.
    completed_at: Option<f64>,
}

impl QuizScene {
    pub fn enter(handoff: Handoff, cx: &mut SceneContext) -> Self {
        Self {
            quiz: Quiz::new(),
            start_time: handoff.start_time.unwrap_or_else(|| cx.now_ms()),
            completed_at: None,
        }
    }

    fn submit(&mut self, cx: &mut SceneContext) {
        let Some(result) = self.quiz.submit() else {
            return;
        };
        let now = cx.now_ms();
        self.completed_at = Some(now);
        let seconds = (now - self.start_time) / 1000.0;
        log::info!("Quiz completed in {seconds:.2} seconds");
        log::info!("quiz score {} / {}", result.score, result.total);
        cx.emit_with(EVENT_SCORE, result.score as f32, result.total as f32);
        cx.sound(SOUND_SUCCESS);
    }
}

impl Scene for QuizScene {
    fn key(&self) -> SceneKey {
        SceneKey::Quiz
    }

    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand {
        for event in input.iter() {
            match event {
                InputEvent::Text { field, value } => {
                    if !self.quiz.answer(*field, value) {
                        log::debug!("quiz: ignored answer for field {field}");
                    }
                }
                InputEvent::Custom { kind, .. } if *kind == CUSTOM_SUBMIT => self.submit(cx),
                InputEvent::Custom { kind, .. } if *kind == CUSTOM_NEXT => {
                    if let Some(result) = self.quiz.result() {
                        cx.sound(SOUND_CLICK);
                        return SceneCommand::Next(Handoff {
                            start_time: Some(self.start_time),
                            completion_time: self.completed_at,
                            score: Some(result.score),
                            ..Handoff::default()
                        });
                    }
                }
                _ => {}
            }
        }
        SceneCommand::Stay
    }

    fn view(&self) -> SceneView {
        let result = self.quiz.result();
        SceneView::Quiz(QuizView {
            title: TITLE,
            questions: QUESTIONS
                .iter()
                .map(|q| QuestionView {
                    id: q.id,
                    prompt: q.prompt,
                    answer: self.quiz.answer_for(q.id).unwrap_or_default().to_string(),
                })
                .collect(),
            submitted: result.is_some(),
            score_text: result.map(|r| format!("Your score: {} / {}", r.score, r.total)),
            next_visible: result.is_some(),
        })
    }
}
