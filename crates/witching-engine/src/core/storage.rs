//! Key-value persistence for small per-browser state.
//!
//! The browser backs this with `window.localStorage` (see `witching-web`);
//! native runs and tests use [`MemoryStore`]. Writes are last-writer-wins.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while reading or writing a [`SaveSlot`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored blob could not be decoded.
    #[error("malformed value under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be encoded to JSON.
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing store refused the operation (quota, privacy mode, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str);
}

/// In-memory store. Contents vanish with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// A typed JSON value stored under one fixed key.
pub struct SaveSlot<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SaveSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(key: &'static str) -> Self {
        Self { key, _marker: PhantomData }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Serialize `value` and write it, replacing whatever was there.
    pub fn save(&self, store: &mut dyn KeyValueStore, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        store.set(self.key, &json)
    }

    /// Read and decode the slot. `Ok(None)` when nothing is stored.
    pub fn load(&self, store: &dyn KeyValueStore) -> Result<Option<T>, StorageError> {
        let Some(raw) = store.get(self.key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                key: self.key.to_string(),
                source,
            })
    }

    /// Like [`load`](Self::load), but a malformed blob is logged and
    /// removed instead of surfacing as an error.
    pub fn restore(&self, store: &mut dyn KeyValueStore) -> Option<T> {
        match self.load(store) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("{err}; clearing saved state");
                self.clear(store);
                None
            }
        }
    }

    pub fn clear(&self, store: &mut dyn KeyValueStore) {
        store.remove(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Progress {
        scene: String,
        #[serde(rename = "timeLeft")]
        time_left: u32,
    }

    const SLOT: SaveSlot<Progress> = SaveSlot::new("progress");

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let progress = Progress { scene: "CryptScene".into(), time_left: 97 };
        SLOT.save(&mut store, &progress).unwrap();

        assert_eq!(store.get("progress").unwrap(), r#"{"scene":"CryptScene","timeLeft":97}"#);
        assert_eq!(SLOT.load(&store).unwrap(), Some(progress));
    }

    #[test]
    fn empty_slot_loads_none() {
        let store = MemoryStore::new();
        assert!(SLOT.load(&store).unwrap().is_none());
    }

    #[test]
    fn malformed_blob_is_an_error_on_load() {
        let mut store = MemoryStore::new();
        store.set("progress", "{not json").unwrap();
        let err = SLOT.load(&store).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn restore_clears_malformed_blob() {
        let mut store = MemoryStore::new();
        store.set("progress", r#"{"scene": 5}"#).unwrap();
        assert!(SLOT.restore(&mut store).is_none());
        assert!(store.get("progress").is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut store = MemoryStore::new();
        SLOT.save(&mut store, &Progress { scene: "A".into(), time_left: 3 }).unwrap();
        SLOT.save(&mut store, &Progress { scene: "B".into(), time_left: 2 }).unwrap();
        assert_eq!(SLOT.load(&store).unwrap().unwrap().scene, "B");
        assert_eq!(store.len(), 1);
    }
}
