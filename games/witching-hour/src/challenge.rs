//! The timed chassis shared by every puzzle scene: countdown, save
//! mirroring, attempts and hints, success and failure banners, and the
//! Back/Next buttons.

use witching_engine::{Countdown, CountdownTick, Handoff, InputEvent, InputQueue, Timeline};

use crate::events::*;
use crate::scenes::{SceneCommand, SceneContext, SceneKey};
use crate::view::{ChallengeStatus, ChallengeView};

pub const ELIMINATED: &str = "OOPS! ELIMINATED!";
/// Delay before an eliminated player is sent away.
pub const LEAVE_AFTER_MS: u32 = 3000;
pub const AUTO_ADVANCE_MS: u32 = 2500;
const FEEDBACK_MS: u32 = 1500;

/// Fixed description of one timed puzzle.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeRules {
    pub scene: SceneKey,
    pub title: &'static str,
    pub instructions: &'static str,
    pub hint: &'static str,
    pub success_banner: &'static str,
    pub seconds: u32,
    /// Reveal a Next button once solved.
    pub show_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChallengeTimer {
    Leave,
    AutoAdvance,
    ClearFeedback,
}

pub struct Challenge {
    rules: ChallengeRules,
    countdown: Countdown,
    timeline: Timeline<ChallengeTimer>,
    status: ChallengeStatus,
    banner: Option<&'static str>,
    feedback: Option<String>,
    failures: u32,
    hint_shown: bool,
    hint_after: u32,
    max_attempts: Option<u32>,
    warning_seconds: u32,
}

impl Challenge {
    /// Start the countdown, carrying `handoff.time_left` when present.
    pub fn start(rules: ChallengeRules, handoff: Handoff, cx: &mut SceneContext) -> Self {
        let seconds = handoff.time_left.unwrap_or(rules.seconds);
        if handoff.time_left.is_some() {
            cx.save_progress(rules.scene, seconds);
        }
        log::info!("{}: {} seconds on the clock", rules.scene.name(), seconds);
        cx.emit(EVENT_TIMER, seconds as f32);

        let hint_after = cx.settings.hint_after_failures;
        let mut challenge = Self {
            rules,
            countdown: Countdown::new(seconds),
            timeline: Timeline::new(),
            status: ChallengeStatus::Running,
            banner: None,
            feedback: None,
            failures: 0,
            hint_shown: hint_after == 0,
            hint_after,
            max_attempts: cx.settings.max_attempts,
            warning_seconds: cx.settings.warning_seconds,
        };
        if challenge.countdown.is_expired() {
            challenge.fail(cx);
        }
        challenge
    }

    pub fn is_running(&self) -> bool {
        self.status == ChallengeStatus::Running
    }

    pub fn is_complete(&self) -> bool {
        self.status == ChallengeStatus::Complete
    }

    pub fn status(&self) -> ChallengeStatus {
        self.status
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// Advance the countdown and any pending timers.
    pub fn update(&mut self, cx: &mut SceneContext) -> SceneCommand {
        let dt = cx.dt();
        match self.countdown.advance(dt) {
            CountdownTick::Idle => {}
            CountdownTick::Ticked(left) => {
                cx.save_progress(self.rules.scene, left);
                cx.emit(EVENT_TIMER, left as f32);
            }
            CountdownTick::Expired => {
                cx.emit(EVENT_TIMER, 0.0);
                self.fail(cx);
            }
        }

        for timer in self.timeline.advance(dt) {
            match timer {
                ChallengeTimer::ClearFeedback => self.feedback = None,
                ChallengeTimer::AutoAdvance => return SceneCommand::Next(Handoff::empty()),
                ChallengeTimer::Leave => {
                    return SceneCommand::Goto(cx.settings.timeout_scene, Handoff::empty());
                }
            }
        }
        SceneCommand::Stay
    }

    /// Handle the Back and Next buttons.
    pub fn navigate(&mut self, input: &InputQueue) -> SceneCommand {
        for event in input.iter() {
            let InputEvent::Custom { kind, .. } = event else {
                continue;
            };
            match *kind {
                CUSTOM_BACK if self.status != ChallengeStatus::Failed => {
                    return SceneCommand::Back(Handoff::with_time_left(self.remaining()));
                }
                CUSTOM_NEXT if self.next_visible() => {
                    return SceneCommand::Next(Handoff::empty());
                }
                _ => {}
            }
        }
        SceneCommand::Stay
    }

    pub fn complete(&mut self, cx: &mut SceneContext) {
        if !self.is_running() {
            return;
        }
        self.status = ChallengeStatus::Complete;
        self.countdown.pause();
        self.banner = Some(self.rules.success_banner);
        self.feedback = None;
        cx.clear_progress();
        cx.sound(SOUND_SUCCESS);
        cx.emit_with(EVENT_SOLVED, self.rules.scene.index() as f32, self.remaining() as f32);
        log::info!("{}: solved with {}s left", self.rules.scene.name(), self.remaining());

        if self.rules.show_next && cx.settings.auto_advance {
            self.timeline.after(AUTO_ADVANCE_MS, ChallengeTimer::AutoAdvance);
        }
    }

    /// Count a wrong answer: feedback, maybe the hint, maybe elimination.
    pub fn wrong(&mut self, cx: &mut SceneContext, feedback: &str) {
        if !self.is_running() {
            return;
        }
        self.failures += 1;
        self.feedback = Some(feedback.to_string());
        self.timeline.after(FEEDBACK_MS, ChallengeTimer::ClearFeedback);
        cx.sound(SOUND_FAILURE);
        cx.emit(EVENT_WRONG, self.failures as f32);
        log::debug!("{}: wrong answer #{}", self.rules.scene.name(), self.failures);

        if !self.hint_shown && self.failures >= self.hint_after {
            self.hint_shown = true;
            cx.emit(EVENT_HINT, self.rules.scene.index() as f32);
        }
        if self.max_attempts.is_some_and(|max| self.failures >= max) {
            self.fail(cx);
        }
    }

    fn fail(&mut self, cx: &mut SceneContext) {
        self.status = ChallengeStatus::Failed;
        self.countdown.pause();
        self.banner = Some(ELIMINATED);
        self.feedback = None;
        cx.clear_progress();
        cx.sound(SOUND_FAILURE);
        cx.emit(EVENT_ELIMINATED, self.rules.scene.index() as f32);
        log::info!("{}: eliminated", self.rules.scene.name());

        self.timeline.clear();
        self.timeline.after(LEAVE_AFTER_MS, ChallengeTimer::Leave);
    }

    fn next_visible(&self) -> bool {
        self.rules.show_next && self.is_complete()
    }

    pub fn view(&self) -> ChallengeView {
        ChallengeView {
            title: self.rules.title,
            instructions: self.rules.instructions,
            time_left: self.remaining(),
            warning: self.is_running() && self.countdown.is_warning(self.warning_seconds),
            status: self.status,
            banner: self.banner,
            feedback: self.feedback.clone(),
            hint: self.hint_shown.then_some(self.rules.hint),
            failures: self.failures,
            attempts_left: self.max_attempts.map(|max| max.saturating_sub(self.failures)),
            back_enabled: self.status != ChallengeStatus::Failed,
            next_visible: self.next_visible(),
        }
    }
}
