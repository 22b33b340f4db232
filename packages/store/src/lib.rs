//! Durable client-side key/value storage.
//!
//! The browser build persists into `window.localStorage`, native builds persist
//! into a TOML file under the platform data directory, and tests use an
//! in-memory map. All of them sit behind [`KeyValueStore`], and [`TokenStore`]
//! layers the session-token key on top.

pub mod kv;
pub mod token;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use kv::KeyValueStore;
pub use token::{TokenStore, AUTH_TOKEN_KEY};
