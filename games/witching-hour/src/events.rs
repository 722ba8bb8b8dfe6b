//! Numeric ids shared with the host page.

use witching_engine::SoundEvent;

// Game event kinds (Rust → host)
pub const EVENT_SCENE_CHANGED: f32 = 1.0;
pub const EVENT_TIMER: f32 = 2.0;
pub const EVENT_SOLVED: f32 = 3.0;
pub const EVENT_ELIMINATED: f32 = 4.0;
pub const EVENT_WRONG: f32 = 5.0;
pub const EVENT_HINT: f32 = 6.0;
pub const EVENT_TARGET_LIT: f32 = 7.0;
pub const EVENT_SCORE: f32 = 8.0;

// Sound cues
pub const SOUND_SUCCESS: SoundEvent = SoundEvent(1);
pub const SOUND_FAILURE: SoundEvent = SoundEvent(2);
pub const SOUND_CLICK: SoundEvent = SoundEvent(3);
pub const SOUND_VICTORY: SoundEvent = SoundEvent(4);

// Custom event kinds (host buttons → Rust)
pub const CUSTOM_BACK: u32 = 1;
pub const CUSTOM_NEXT: u32 = 2;
pub const CUSTOM_START: u32 = 3;
pub const CUSTOM_SUBMIT: u32 = 4;
pub const CUSTOM_NEXT_ROUND: u32 = 5;
