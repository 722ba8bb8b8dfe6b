use witching_engine::*;

use crate::events::EVENT_SCENE_CHANGED;
use crate::save;
use crate::scenes::{self, Scene, SceneCommand, SceneContext, SceneKey};
use crate::settings::Settings;
use crate::view::GameView;

const WORLD_WIDTH: f32 = 1024.0;
const WORLD_HEIGHT: f32 = 768.0;

pub struct WitchingHour {
    settings: Settings,
    flow: SceneFlow<SceneKey>,
    rng: Rng,
    bounds: Bounds,
    active: Option<Box<dyn Scene>>,
}

impl WitchingHour {
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            flow: SceneFlow::new(settings.round.scenes()),
            settings,
            rng: Rng::new(1),
            bounds: Bounds::new(WORLD_WIDTH, WORLD_HEIGHT),
            active: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current(&self) -> Option<SceneKey> {
        self.active.as_ref().map(|s| s.key())
    }

    /// Where a fresh boot lands: the Game Over lock, a resumable save, or
    /// the first scene of the round.
    fn boot_scene(&self, storage: &mut dyn KeyValueStore) -> (SceneKey, Handoff) {
        if self.settings.lock_after_game_over && save::is_game_over(storage) {
            log::info!("game over flag set; staying on the game over screen");
            return (SceneKey::GameOver, Handoff::empty());
        }
        if let Some(saved) = save::restore(storage) {
            if self.flow.contains(saved.scene) {
                log::info!("resuming {} with {}s left", saved.scene.name(), saved.time_left);
                return (saved.scene, Handoff::with_time_left(saved.time_left));
            }
            log::warn!("saved scene {} is not part of this round; clearing", saved.scene.name());
            save::clear(storage);
        }
        (self.flow.first().unwrap_or(SceneKey::Prologue), Handoff::empty())
    }

    /// Tear down the running scene and start `key`.
    fn enter(&mut self, ctx: &mut EngineContext, key: SceneKey, handoff: Handoff) {
        if let Some(old) = self.current() {
            log::info!("leaving {}", old.name());
        }
        log::info!("entering {} {:?}", key.name(), handoff);
        self.active = None;
        ctx.emit_event(GameEvent::new(EVENT_SCENE_CHANGED, key.index() as f32));
        let mut cx = SceneContext {
            engine: &mut *ctx,
            settings: &self.settings,
            rng: &mut self.rng,
            bounds: self.bounds,
        };
        self.active = Some(scenes::enter(key, handoff, &mut cx));
    }

    /// The scene after `current` in the round, if there is one.
    pub fn next_scene(&self, current: SceneKey) -> Option<SceneKey> {
        let next = self.flow.next(current);
        if next.is_none() {
            log::debug!("{} has no next scene", current.name());
        }
        next
    }

    /// The scene before `current` in the round, if there is one.
    pub fn prev_scene(&self, current: SceneKey) -> Option<SceneKey> {
        let prev = self.flow.prev(current);
        if prev.is_none() {
            log::debug!("{} has no previous scene", current.name());
        }
        prev
    }

    fn apply(&mut self, ctx: &mut EngineContext, current: SceneKey, command: SceneCommand) {
        match command {
            SceneCommand::Stay => {}
            SceneCommand::Next(handoff) => {
                if let Some(next) = self.next_scene(current) {
                    self.enter(ctx, next, handoff);
                }
            }
            SceneCommand::Back(handoff) => {
                let Some(prev) = self.prev_scene(current) else {
                    return;
                };
                if let Some(time_left) = handoff.time_left {
                    if self.settings.persist_progress {
                        save::store(ctx.storage.as_mut(), prev, time_left);
                    }
                }
                self.enter(ctx, prev, handoff);
            }
            SceneCommand::Goto(key, handoff) => self.enter(ctx, key, handoff),
        }
    }
}

impl Default for WitchingHour {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for WitchingHour {
    type View = Option<GameView>;

    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ..GameConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.settings = Settings::from_json(json)?;
        log::info!("settings loaded: {:?}", self.settings);
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let seed = self.settings.seed.unwrap_or(ctx.now_ms() as u64);
        self.rng = Rng::new(seed);
        self.flow = SceneFlow::new(self.settings.round.scenes());
        self.active = None;

        let (key, handoff) = self.boot_scene(ctx.storage.as_mut());
        self.enter(ctx, key, handoff);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(scene) = self.active.as_mut() else {
            return;
        };
        let current = scene.key();
        let mut cx = SceneContext {
            engine: &mut *ctx,
            settings: &self.settings,
            rng: &mut self.rng,
            bounds: self.bounds,
        };
        let command = scene.update(&mut cx, input);
        self.apply(ctx, current, command);
    }

    fn view(&self) -> Option<GameView> {
        let scene = self.active.as_ref()?;
        Some(GameView {
            scene: scene.key(),
            round: self.settings.round,
            view: scene.view(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CUSTOM_BACK, CUSTOM_NEXT, CUSTOM_NEXT_ROUND, CUSTOM_START, CUSTOM_SUBMIT};
    use crate::settings::Round;
    use crate::view::SceneView;

    const NOW: f64 = 1_700_000_000_000.0;

    fn ctx() -> EngineContext {
        let mut ctx = EngineContext::new();
        ctx.set_now(NOW);
        ctx
    }

    fn booted(settings: Settings, ctx: &mut EngineContext) -> WitchingHour {
        let mut game = WitchingHour::new();
        game.settings = Settings { seed: Some(5), ..settings };
        game.init(ctx);
        game
    }

    fn press(game: &mut WitchingHour, ctx: &mut EngineContext, event: InputEvent) {
        ctx.clear_frame_data();
        game.update(ctx, &InputQueue::from_events(vec![event]));
    }

    fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    fn enter_key() -> InputEvent {
        InputEvent::KeyDown { key_code: KEY_ENTER }
    }

    /// Run idle fixed steps for `seconds`, moving the wall clock along.
    fn idle(game: &mut WitchingHour, ctx: &mut EngineContext, seconds: f32) {
        let steps = (seconds * 60.0).round() as u32;
        let empty = InputQueue::new();
        for _ in 0..steps {
            ctx.set_now(ctx.now_ms() + 1000.0 / 60.0);
            ctx.clear_frame_data();
            game.update(ctx, &empty);
        }
    }

    #[test]
    fn fresh_boot_starts_at_prologue() {
        let mut ctx = ctx();
        let game = booted(Settings::default(), &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::Prologue));
        assert!(ctx.events.iter().any(|e| e.kind == EVENT_SCENE_CHANGED && e.a == 0.0));
    }

    #[test]
    fn walks_the_story_into_the_first_challenge() {
        let mut ctx = ctx();
        let mut game = booted(Settings::default(), &mut ctx);
        press(&mut game, &mut ctx, enter_key());
        idle(&mut game, &mut ctx, 1.0);
        assert_eq!(game.current(), Some(SceneKey::Start));

        // The continue prompt shows after the story lines are revealed.
        idle(&mut game, &mut ctx, 1.5);
        press(&mut game, &mut ctx, enter_key());
        idle(&mut game, &mut ctx, 1.0);
        assert_eq!(game.current(), Some(SceneKey::Intro));

        press(&mut game, &mut ctx, custom(CUSTOM_START));
        idle(&mut game, &mut ctx, 1.0);
        assert_eq!(game.current(), Some(SceneKey::Prophecy));
    }

    #[test]
    fn resumes_saved_challenge_with_its_time() {
        let mut ctx = ctx();
        save::store(ctx.storage.as_mut(), SceneKey::Crypt, 97);
        let game = booted(Settings::default(), &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::Crypt));
        let Some(GameView { view: SceneView::Crypt(view), .. }) = game.view() else {
            panic!("expected crypt view");
        };
        assert_eq!(view.challenge.time_left, 97);
    }

    #[test]
    fn malformed_save_is_cleared() {
        let mut ctx = ctx();
        ctx.storage.set("witchingHourState", "{oops").unwrap();
        let game = booted(Settings::default(), &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::Prologue));
        assert!(ctx.storage.get("witchingHourState").is_none());
    }

    #[test]
    fn save_from_another_round_is_cleared() {
        let mut ctx = ctx();
        save::store(ctx.storage.as_mut(), SceneKey::Forest, 40);
        let settings = Settings { round: Round::Quiz, ..Settings::default() };
        let game = booted(settings, &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::Prologue));
        assert!(save::restore(ctx.storage.as_mut()).is_none());
    }

    #[test]
    fn game_over_flag_locks_the_game() {
        let mut ctx = ctx();
        save::mark_game_over(ctx.storage.as_mut());
        save::store(ctx.storage.as_mut(), SceneKey::Crypt, 97);
        let mut game = booted(Settings::default(), &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::GameOver));
        press(&mut game, &mut ctx, custom(CUSTOM_BACK));
        assert_eq!(game.current(), Some(SceneKey::GameOver));
    }

    #[test]
    fn game_over_flag_ignored_without_lock() {
        let mut ctx = ctx();
        save::mark_game_over(ctx.storage.as_mut());
        let settings = Settings { lock_after_game_over: false, ..Settings::default() };
        let game = booted(settings, &mut ctx);
        assert_eq!(game.current(), Some(SceneKey::Prologue));
    }

    #[test]
    fn back_carries_time_and_saves_it() {
        let mut ctx = ctx();
        save::store(ctx.storage.as_mut(), SceneKey::Crypt, 97);
        let mut game = booted(Settings::default(), &mut ctx);
        press(&mut game, &mut ctx, custom(CUSTOM_BACK));
        assert_eq!(game.current(), Some(SceneKey::Forest));
        assert_eq!(
            save::restore(ctx.storage.as_mut()),
            Some(save::SavedState { scene: SceneKey::Forest, time_left: 97 })
        );
        let Some(GameView { view: SceneView::Forest(view), .. }) = game.view() else {
            panic!("expected forest view");
        };
        assert_eq!(view.challenge.time_left, 97);
    }

    #[test]
    fn next_is_hidden_until_solved() {
        let mut ctx = ctx();
        save::store(ctx.storage.as_mut(), SceneKey::Forest, 100);
        let mut game = booted(Settings::default(), &mut ctx);
        press(&mut game, &mut ctx, custom(CUSTOM_NEXT));
        assert_eq!(game.current(), Some(SceneKey::Forest));
    }

    #[test]
    fn timeout_sends_player_to_the_configured_scene() {
        let mut ctx = ctx();
        save::store(ctx.storage.as_mut(), SceneKey::Prophecy, 2);
        let settings = Settings { timeout_scene: SceneKey::GameOver, ..Settings::default() };
        let mut game = booted(settings, &mut ctx);
        idle(&mut game, &mut ctx, 2.5);
        assert_eq!(game.current(), Some(SceneKey::Prophecy));
        assert!(save::restore(ctx.storage.as_mut()).is_none());

        idle(&mut game, &mut ctx, 3.1);
        assert_eq!(game.current(), Some(SceneKey::GameOver));
        assert!(save::is_game_over(ctx.storage.as_ref()));
    }

    #[test]
    fn quiz_round_reaches_finish_and_loops_back() {
        let mut ctx = ctx();
        let settings = Settings { round: Round::Quiz, ..Settings::default() };
        let mut game = booted(settings, &mut ctx);
        assert_eq!(game.flow.order(), Round::Quiz.scenes());

        // Jump past the story screens.
        game.enter(&mut ctx, SceneKey::Intro, Handoff::empty());
        press(&mut game, &mut ctx, custom(CUSTOM_START));
        idle(&mut game, &mut ctx, 1.0);
        assert_eq!(game.current(), Some(SceneKey::Quiz));

        press(&mut game, &mut ctx, InputEvent::Text { field: 4, value: "6".into() });
        press(&mut game, &mut ctx, custom(CUSTOM_SUBMIT));
        press(&mut game, &mut ctx, custom(CUSTOM_NEXT));
        assert_eq!(game.current(), Some(SceneKey::Finish));
        let Some(GameView { view: SceneView::Finish(view), .. }) = game.view() else {
            panic!("expected finish view");
        };
        assert_eq!(view.score_text.as_deref(), Some("Your score: 1 / 10"));

        press(&mut game, &mut ctx, custom(CUSTOM_NEXT_ROUND));
        assert_eq!(game.current(), Some(SceneKey::Quiz));
    }

    #[test]
    fn configure_rejects_bad_json_and_keeps_settings() {
        let mut game = WitchingHour::new();
        assert!(game.configure("{\"round\": \"bonus\"}").is_err());
        assert_eq!(game.settings().round, Round::Ritual);
        game.configure("{\"round\": \"quiz\"}").unwrap();
        assert_eq!(game.settings().round, Round::Quiz);
    }

    #[test]
    fn view_serializes_for_the_host() {
        let mut ctx = ctx();
        let game = booted(Settings::default(), &mut ctx);
        let json = serde_json::to_value(game.view()).unwrap();
        assert_eq!(json["scene"], "Prologue");
        assert_eq!(json["view"]["kind"], "story");
        assert!(serde_json::to_value(WitchingHour::new().view()).unwrap().is_null());
    }
}
