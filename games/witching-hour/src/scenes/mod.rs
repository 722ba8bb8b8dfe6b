//! Scene keys, the per-scene contract and the scene factory.

mod crypt;
mod finish;
mod forest;
mod game_over;
mod intro;
mod prologue;
mod prophecy;
mod quiz;
mod ritual;
mod start;

use serde::{Deserialize, Serialize};
use witching_engine::{Bounds, EngineContext, GameEvent, Handoff, InputQueue, KeyValueStore, Rng, SoundEvent};

use crate::save;
use crate::settings::Settings;
use crate::view::SceneView;

pub use crypt::CryptScene;
pub use finish::FinishScene;
pub use forest::ForestScene;
pub use game_over::GameOverScene;
pub use intro::IntroScene;
pub use prologue::PrologueScene;
pub use prophecy::ProphecyScene;
pub use quiz::QuizScene;
pub use ritual::RitualScene;
pub use start::StartScene;

/// Every screen in the game. Serialized by its stable scene name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKey {
    Prologue,
    #[serde(rename = "StartScene")]
    Start,
    #[serde(rename = "IntroScene")]
    Intro,
    #[serde(rename = "ProphecyScene")]
    Prophecy,
    #[serde(rename = "ForestScene")]
    Forest,
    #[serde(rename = "CryptScene")]
    Crypt,
    #[serde(rename = "RitualScene")]
    Ritual,
    #[serde(rename = "QuizScene")]
    Quiz,
    #[serde(rename = "FinishScene")]
    Finish,
    GameOver,
}

impl SceneKey {
    pub const ALL: [SceneKey; 10] = [
        SceneKey::Prologue,
        SceneKey::Start,
        SceneKey::Intro,
        SceneKey::Prophecy,
        SceneKey::Forest,
        SceneKey::Crypt,
        SceneKey::Ritual,
        SceneKey::Quiz,
        SceneKey::Finish,
        SceneKey::GameOver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKey::Prologue => "Prologue",
            SceneKey::Start => "StartScene",
            SceneKey::Intro => "IntroScene",
            SceneKey::Prophecy => "ProphecyScene",
            SceneKey::Forest => "ForestScene",
            SceneKey::Crypt => "CryptScene",
            SceneKey::Ritual => "RitualScene",
            SceneKey::Quiz => "QuizScene",
            SceneKey::Finish => "FinishScene",
            SceneKey::GameOver => "GameOver",
        }
    }

    /// Stable numeric id sent with scene-change events.
    pub fn index(self) -> u32 {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0) as u32
    }
}

/// What a scene asks the game to do after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    Stay,
    /// Start the following scene in the round.
    Next(Handoff),
    /// Start the preceding scene in the round.
    Back(Handoff),
    /// Start a specific scene, in or out of the round.
    Goto(SceneKey, Handoff),
}

/// Everything a scene may touch while it runs.
pub struct SceneContext<'a> {
    pub engine: &'a mut EngineContext,
    pub settings: &'a Settings,
    pub rng: &'a mut Rng,
    pub bounds: Bounds,
}

impl SceneContext<'_> {
    pub fn dt(&self) -> f32 {
        self.engine.dt()
    }

    pub fn now_ms(&self) -> f64 {
        self.engine.now_ms()
    }

    pub fn emit(&mut self, kind: f32, a: f32) {
        self.engine.emit_event(GameEvent::new(kind, a));
    }

    pub fn emit_with(&mut self, kind: f32, a: f32, b: f32) {
        self.engine.emit_event(GameEvent::new(kind, a).with_b(b));
    }

    pub fn sound(&mut self, sound: SoundEvent) {
        self.engine.emit_sound(sound);
    }

    pub fn storage(&mut self) -> &mut dyn KeyValueStore {
        self.engine.storage.as_mut()
    }

    /// Mirror `{scene, timeLeft}` to storage, when progress persistence is on.
    pub fn save_progress(&mut self, scene: SceneKey, time_left: u32) {
        if self.settings.persist_progress {
            save::store(self.engine.storage.as_mut(), scene, time_left);
        }
    }

    pub fn clear_progress(&mut self) {
        save::clear(self.engine.storage.as_mut());
    }
}

/// One screen of the game.
pub trait Scene {
    fn key(&self) -> SceneKey;

    /// One fixed step: timers first, then input.
    fn update(&mut self, cx: &mut SceneContext, input: &InputQueue) -> SceneCommand;

    fn view(&self) -> SceneView;
}

/// Build and enter the scene for `key`.
pub fn enter(key: SceneKey, handoff: Handoff, cx: &mut SceneContext) -> Box<dyn Scene> {
    match key {
        SceneKey::Prologue => Box::new(PrologueScene::enter()),
        SceneKey::Start => Box::new(StartScene::enter()),
        SceneKey::Intro => Box::new(IntroScene::enter()),
        SceneKey::Prophecy => Box::new(ProphecyScene::enter(handoff, cx)),
        SceneKey::Forest => Box::new(ForestScene::enter(handoff, cx)),
        SceneKey::Crypt => Box::new(CryptScene::enter(handoff, cx)),
        SceneKey::Ritual => Box::new(RitualScene::enter(handoff, cx)),
        SceneKey::Quiz => Box::new(QuizScene::enter(handoff, cx)),
        SceneKey::Finish => Box::new(FinishScene::enter(handoff, cx)),
        SceneKey::GameOver => Box::new(GameOverScene::enter(cx)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use witching_engine::{EngineContext, InputEvent, InputQueue, Rng};

    use super::*;

    /// Owns what a [`SceneContext`] borrows, for driving scenes in tests.
    pub struct Harness {
        pub engine: EngineContext,
        pub settings: Settings,
        pub rng: Rng,
        pub bounds: Bounds,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_settings(Settings::default())
        }

        pub fn with_settings(settings: Settings) -> Self {
            let mut engine = EngineContext::new();
            engine.set_now(1_000_000.0);
            Self {
                engine,
                settings,
                rng: Rng::new(7),
                bounds: Bounds::new(1024.0, 768.0),
            }
        }

        pub fn cx(&mut self) -> SceneContext<'_> {
            SceneContext {
                engine: &mut self.engine,
                settings: &self.settings,
                rng: &mut self.rng,
                bounds: self.bounds,
            }
        }

        /// Run one update with `events`, clearing last step's output first.
        pub fn step<S: Scene + ?Sized>(&mut self, scene: &mut S, events: Vec<InputEvent>) -> SceneCommand {
            self.engine.clear_frame_data();
            let input = InputQueue::from_events(events);
            let mut cx = self.cx();
            scene.update(&mut cx, &input)
        }

        /// Advance `seconds` of idle time in fixed steps, returning the
        /// first command that is not `Stay`.
        pub fn idle<S: Scene + ?Sized>(&mut self, scene: &mut S, seconds: f32) -> SceneCommand {
            let steps = (seconds / self.engine.dt()).round() as u32;
            for _ in 0..steps {
                let now = self.engine.now_ms() + self.engine.dt() as f64 * 1000.0;
                self.engine.set_now(now);
                let cmd = self.step(scene, Vec::new());
                if cmd != SceneCommand::Stay {
                    return cmd;
                }
            }
            SceneCommand::Stay
        }

        pub fn has_event(&self, kind: f32) -> bool {
            self.engine.events.iter().any(|e| e.kind == kind)
        }
    }

    pub fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    pub fn click(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { x, y }
    }
}
