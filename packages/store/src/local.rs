//! # Browser localStorage store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It
//! is a zero-size handle that looks up `window.localStorage` on every call, which
//! keeps it `Send + Sync` even though the underlying `web_sys::Storage` is not.
//!
//! Reads return `None` and writes are dropped (with a log line) when storage is
//! unavailable, e.g. in private browsing modes that block it.

use web_sys::Storage;

use crate::kv::KeyValueStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, dropping write of {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write of {key}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
