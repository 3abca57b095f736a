use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and as a last-resort fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    async fn set_all(&self, entries: &[(&str, &str)]) {
        let mut map = self.entries();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
    }

    async fn remove_all(&self, keys: &[&str]) {
        let mut map = self.entries();
        for key in keys {
            map.remove(*key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{ACCESS_TOKEN, REFRESH_TOKEN, SESSION_KEYS, USER_ID, USER_ROLE};

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        assert!(store.get(ACCESS_TOKEN).await.is_none());

        store.set_all(&[(ACCESS_TOKEN, "abc")]).await;
        assert_eq!(store.get(ACCESS_TOKEN).await.as_deref(), Some("abc"));

        store.set_all(&[(ACCESS_TOKEN, "def")]).await;
        assert_eq!(store.get(ACCESS_TOKEN).await.as_deref(), Some("def"));
    }

    #[tokio::test]
    async fn test_remove_all_clears_session_keys_only() {
        let store = MemoryStore::new();
        store
            .set_all(&[
                (ACCESS_TOKEN, "a"),
                (REFRESH_TOKEN, "r"),
                (USER_ROLE, "admin"),
                (USER_ID, "42"),
                ("theme", "dark"),
            ])
            .await;
        assert_eq!(store.len(), 5);

        store.remove_all(&SESSION_KEYS).await;

        for key in SESSION_KEYS {
            assert!(store.get(key).await.is_none());
        }
        assert_eq!(store.get("theme").await.as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set_all(&[(USER_ID, "7")]).await;
        assert_eq!(other.get(USER_ID).await.as_deref(), Some("7"));
    }
}
