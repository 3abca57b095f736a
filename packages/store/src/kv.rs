//! # Durable key-value storage
//!
//! [`KeyValueStore`] is the only persistence seam the client has. It stores
//! small string values under fixed string keys (see [`crate::keys`]).
//!
//! Implementations:
//!
//! | Type | Platform | Backing |
//! |------|----------|---------|
//! | [`crate::MemoryStore`] | any | `HashMap` behind a mutex, for tests |
//! | [`crate::FileStore`] | desktop | a single TOML file, replaced atomically |
//! | `LocalStorageStore` | web (`web` feature) | `window.localStorage` |
//!
//! Writes and removals take a batch of keys so that a backend can apply them
//! as one unit. Backends never surface I/O errors: they log and degrade to
//! "nothing persisted", which the session layer treats as signed out.

use std::future::Future;

/// Async interface to a durable string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;

    /// Write every entry. Existing values are overwritten.
    fn set_all(&self, entries: &[(&str, &str)]) -> impl Future<Output = ()>;

    /// Remove every listed key. Missing keys are ignored.
    fn remove_all(&self, keys: &[&str]) -> impl Future<Output = ()>;
}
