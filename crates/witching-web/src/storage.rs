//! `window.localStorage` as a [`KeyValueStore`].

use witching_engine::{KeyValueStore, MemoryStore, StorageError};

/// Browser local storage. Values survive reloads for the same origin.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// `None` when there is no window or storage is disabled (privacy mode).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            log::warn!("failed to remove '{key}' from localStorage: {err:?}");
        }
    }
}

/// The best store available: localStorage, or memory when it is blocked.
pub fn browser_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("localStorage unavailable; progress will not persist");
            Box::new(MemoryStore::new())
        }
    }
}
