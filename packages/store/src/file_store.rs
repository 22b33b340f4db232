//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used on desktop and mobile builds so the
//! session survives app restarts. All keys live in a single TOML file:
//!
//! ```toml
//! [entries]
//! auth_token = "eyJhbGciOi..."
//! ```
//!
//! ## Platform data directories
//!
//! [`FileStore::in_data_dir`] resolves the base through [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/posifeed/storage.toml` |
//! | Linux | `~/.local/share/posifeed/storage.toml` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\posifeed\storage.toml` |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;

const FILENAME: &str = "storage.toml";
const APP_DIR: &str = "posifeed";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// TOML-file-backed store for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serialises read-modify-write cycles between clones.
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Store backed by `<dir>/storage.toml`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(FILENAME),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store in the platform data directory, falling back to the working directory.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StorageFile {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return StorageFile::default();
        };
        match toml::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring unreadable storage file {}: {}", self.path.display(), e);
                StorageFile::default()
            }
        }
    }

    fn write(&self, file: &StorageFile) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!("Failed to create {}: {}", parent.display(), e);
                return;
            }
        }
        let content = match toml::to_string_pretty(file) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to serialise storage file: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, content) {
            tracing::error!("Failed to write {}: {}", self.path.display(), e);
        }
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) {
        let _guard = self.lock.lock();
        let mut file = self.read();
        f(&mut file.entries);
        self.write(&file);
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        self.read().entries.remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path());
        store.set("auth_token", "token-123");

        // Re-open from the same directory
        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("auth_token").as_deref(), Some("token-123"));

        reopened.remove("auth_token");
        assert!(store.get("auth_token").is_none());
    }

    #[test]
    fn test_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("a", "1");
        store.set("b", "2");
        store.remove("a");

        assert!(store.get("a").is_none());
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("er");
        let store = FileStore::new(&nested);

        store.set("k", "v");
        assert!(nested.join(FILENAME).exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FILENAME), "not = [valid").unwrap();

        let store = FileStore::new(dir.path());
        assert!(store.get("auth_token").is_none());

        // Writing replaces the corrupt content
        store.set("auth_token", "fresh");
        assert_eq!(store.get("auth_token").as_deref(), Some("fresh"));
    }
}
