pub mod api;
pub mod core;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{SoundEvent, GameEvent};
pub use core::geometry::{Bounds, RayHit, Segment};
pub use core::rng::Rng;
pub use core::scene::{Handoff, SceneFlow};
pub use core::storage::{KeyValueStore, MemoryStore, SaveSlot, StorageError};
pub use core::time::{Countdown, CountdownTick, FixedTimestep, Timeline, TimerId};
pub use input::queue::{InputEvent, InputQueue, KEY_ENTER};
