//! Persisted progress: the running challenge and its countdown, plus the
//! Game Over lock flag.

use serde::{Deserialize, Serialize};
use witching_engine::{KeyValueStore, SaveSlot};

use crate::scenes::SceneKey;

/// Progress blob, `{"scene": "...", "timeLeft": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub scene: SceneKey,
    #[serde(rename = "timeLeft")]
    pub time_left: u32,
}

pub const STATE_SLOT: SaveSlot<SavedState> = SaveSlot::new("witchingHourState");

pub const GAME_OVER_KEY: &str = "gameOver";

pub fn store(storage: &mut dyn KeyValueStore, scene: SceneKey, time_left: u32) {
    if let Err(err) = STATE_SLOT.save(storage, &SavedState { scene, time_left }) {
        log::warn!("could not save progress: {err}");
    }
}

/// The saved state, if any. A malformed blob is logged and removed.
pub fn restore(storage: &mut dyn KeyValueStore) -> Option<SavedState> {
    STATE_SLOT.restore(storage)
}

pub fn clear(storage: &mut dyn KeyValueStore) {
    STATE_SLOT.clear(storage);
}

pub fn is_game_over(storage: &dyn KeyValueStore) -> bool {
    storage.get(GAME_OVER_KEY).as_deref() == Some("true")
}

pub fn mark_game_over(storage: &mut dyn KeyValueStore) {
    if let Err(err) = storage.set(GAME_OVER_KEY, "true") {
        log::warn!("could not record game over: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witching_engine::MemoryStore;

    #[test]
    fn stores_scene_name_and_camel_case_time() {
        let mut storage = MemoryStore::new();
        store(&mut storage, SceneKey::Crypt, 97);
        assert_eq!(
            storage.get("witchingHourState").as_deref(),
            Some(r#"{"scene":"CryptScene","timeLeft":97}"#)
        );
        assert_eq!(
            restore(&mut storage),
            Some(SavedState { scene: SceneKey::Crypt, time_left: 97 })
        );
    }

    #[test]
    fn unknown_scene_is_treated_as_malformed() {
        let mut storage = MemoryStore::new();
        storage
            .set("witchingHourState", r#"{"scene":"BonusScene","timeLeft":3}"#)
            .unwrap();
        assert_eq!(restore(&mut storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn game_over_flag() {
        let mut storage = MemoryStore::new();
        assert!(!is_game_over(&storage));
        mark_game_over(&mut storage);
        assert!(is_game_over(&storage));
    }
}
