use witching_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    KeyValueStore,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, storage: Box<dyn KeyValueStore>) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_storage(storage),
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx.set_dt(self.timestep.dt());
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Apply game settings from JSON. A running game is restarted so the
    /// new settings take effect; invalid JSON is logged and ignored.
    pub fn load_config(&mut self, json: &str) {
        match self.game.configure(json) {
            Ok(()) => {
                log::info!("settings loaded");
                if self.initialized {
                    self.ctx.clear_frame_data();
                    self.input.drain();
                    self.init();
                }
            }
            Err(err) => log::warn!("ignoring invalid settings: {err}"),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Record the host wall clock (epoch milliseconds) for the next tick.
    pub fn set_now(&mut self, now_ms: f64) {
        self.ctx.set_now(now_ms);
    }

    /// Run one frame tick: update the game for each fixed step, then pack
    /// the frame's sound events.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation. Input is only seen by the first step.
        let steps = self.timestep.accumulate(dt);
        self.ctx.set_dt(self.timestep.dt());
        for step in 0..steps {
            if step == 1 {
                self.input.drain();
            }
            self.game.update(&mut self.ctx, &self.input);
        }

        // Input that arrived on a frame with zero steps waits for the next one.
        if steps > 0 {
            self.input.drain();
        }

        self.ctx.events.truncate(self.config.max_events);

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.config.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    /// The game's view serialized to JSON.
    pub fn view_json(&self) -> String {
        match serde_json::to_string(&self.game.view()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize view: {err}");
                String::from("null")
            }
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for host reads ----

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn game_events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use witching_engine::{MemoryStore, SoundEvent};

    #[derive(Serialize)]
    struct CounterView {
        steps: u32,
        clicks: u32,
    }

    #[derive(Default)]
    struct Counter {
        steps: u32,
        clicks: u32,
        label: String,
    }

    impl Game for Counter {
        type View = CounterView;

        fn configure(&mut self, json: &str) -> Result<(), serde_json::Error> {
            self.label = serde_json::from_str(json)?;
            Ok(())
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            self.steps = 0;
            ctx.storage.set("booted", &self.label).ok();
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.steps += 1;
            for event in input.iter() {
                if let InputEvent::PointerDown { .. } = event {
                    self.clicks += 1;
                    ctx.emit_sound(SoundEvent(3));
                    ctx.emit_event(GameEvent::new(1.0, self.clicks as f32));
                }
            }
        }

        fn view(&self) -> CounterView {
            CounterView { steps: self.steps, clicks: self.clicks }
        }
    }

    fn runner() -> GameRunner<Counter> {
        let mut r = GameRunner::new(Counter::default(), Box::new(MemoryStore::new()));
        r.init();
        r
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = GameRunner::new(Counter::default(), Box::new(MemoryStore::new()));
        r.tick(1.0);
        assert_eq!(r.game().steps, 0);
    }

    #[test]
    fn input_is_seen_once_even_with_several_steps() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        r.tick(3.5 / 60.0);
        assert_eq!(r.game().steps, 3);
        assert_eq!(r.game().clicks, 1);
        assert_eq!(r.sound_events(), &[3]);
        assert_eq!(r.game_events_len(), 1);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        r.tick(0.001);
        assert_eq!(r.game().clicks, 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().clicks, 1);
    }

    #[test]
    fn view_serializes_to_json() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.view_json(), r#"{"steps":1,"clicks":0}"#);
    }

    #[test]
    fn valid_config_restarts_the_game() {
        let mut r = runner();
        r.tick(2.0 / 60.0);
        r.load_config(r#""again""#);
        assert_eq!(r.game().steps, 0);
        assert_eq!(r.context().storage.get("booted").as_deref(), Some("again"));
    }

    #[test]
    fn invalid_config_is_ignored() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        r.load_config("{nope");
        assert_eq!(r.game().steps, 1);
    }
}
