//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform.
//! The browser runs it on a single thread, so a batch of writes cannot
//! interleave with another reader.
//!
//! Errors (storage disabled, quota exceeded, private mode) are logged and
//! otherwise ignored.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("localStorage unavailable: {:?}", e);
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    async fn set_all(&self, entries: &[(&str, &str)]) {
        let Some(storage) = self.storage() else {
            return;
        };
        for (key, value) in entries {
            if let Err(e) = storage.set_item(key, value) {
                tracing::error!("Failed to persist {}: {:?}", key, e);
            }
        }
    }

    async fn remove_all(&self, keys: &[&str]) {
        let Some(storage) = self.storage() else {
            return;
        };
        for key in keys {
            if let Err(e) = storage.remove_item(key) {
                tracing::error!("Failed to remove {}: {:?}", key, e);
            }
        }
    }
}
