use serde::{Deserialize, Serialize};

use crate::api::types::{GameEvent, SoundEvent};
use crate::core::storage::{KeyValueStore, MemoryStore};
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units. Scene layouts scale from this.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1024.0,
            world_height: 768.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Serializable snapshot handed to the host page for drawing.
    type View: Serialize;

    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply game-specific settings from JSON. Unknown games ignore it.
    fn configure(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Setup initial state: restore progress, enter the first scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. React to input, advance timers, switch scenes.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only snapshot of what should be on screen.
    fn view(&self) -> Self::View;
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Persistent key-value storage (localStorage in the browser).
    pub storage: Box<dyn KeyValueStore>,
    /// Wall clock in milliseconds since the Unix epoch, as reported by the host.
    now_ms: f64,
    /// Seconds of the current fixed step.
    dt: f32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_storage(Box::new(MemoryStore::new()))
    }

    /// Create a context backed by the given store.
    pub fn with_storage(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            storage,
            now_ms: 0.0,
            dt: 1.0 / 60.0,
        }
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.dt = dt;
    }

    /// Length of the current fixed step in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
