//! # Key/value storage trait
//!
//! [`KeyValueStore`] mirrors the browser `Storage` API: string keys, string
//! values, synchronous access. Every implementation is infallible from the
//! caller's point of view. A backend that cannot read returns `None`, and a
//! backend that cannot write logs the failure and carries on, so a broken
//! storage degrades to "logged out" instead of crashing the app.
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemoryStore`] | any | `HashMap` behind a mutex |
//! | `FileStore` | native | TOML file on disk |
//! | `LocalStorageStore` | wasm + `web` | `window.localStorage` |

use std::fmt::Debug;

/// Synchronous string key/value storage.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}
