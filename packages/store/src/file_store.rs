//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used on desktop. All keys live in a
//! single TOML table so a batch write or removal lands as one file
//! replacement: the new table is written to a sibling temp file and renamed
//! over the old one.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── storage.toml      # accessToken = "...", userRole = "admin", ...
//! ```
//!
//! Use [`dirs::data_dir()`] for a platform-appropriate base, e.g.
//! `~/.local/share/decisionlog/` on Linux.
//!
//! [`dirs::data_dir()`]: https://docs.rs/dirs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

const STORAGE_FILE: &str = "storage.toml";

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn storage_path(&self) -> PathBuf {
        self.base.join(STORAGE_FILE)
    }

    fn load(&self) -> BTreeMap<String, String> {
        let path = self.storage_path();
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return BTreeMap::new();
        };
        match toml::from_str(&raw) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, table: &BTreeMap<String, String>) {
        if let Err(e) = self.try_save(table) {
            tracing::error!("Failed to write {}: {}", self.storage_path().display(), e);
        }
    }

    fn try_save(&self, table: &BTreeMap<String, String>) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)?;
        let body = toml::to_string(table)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let tmp = self.base.join(format!("{STORAGE_FILE}.tmp"));
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, self.storage_path())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    async fn set_all(&self, entries: &[(&str, &str)]) {
        let mut table = self.load();
        for (key, value) in entries {
            table.insert((*key).to_string(), (*value).to_string());
        }
        self.save(&table);
    }

    async fn remove_all(&self, keys: &[&str]) {
        let mut table = self.load();
        let before = table.len();
        for key in keys {
            table.remove(*key);
        }
        if table.len() != before {
            self.save(&table);
        }
    }
}
