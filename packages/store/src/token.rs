//! Session token persistence.

use std::sync::Arc;

use crate::kv::KeyValueStore;
use crate::memory::MemoryStore;

/// The fixed storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Reads and writes the session token in a [`KeyValueStore`].
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone, Debug)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A token store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// The persisted token. An empty value counts as no token.
    pub fn load(&self) -> Option<String> {
        self.backend
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn save(&self, token: &str) {
        self.backend.set(AUTH_TOKEN_KEY, token);
    }

    pub fn clear(&self) {
        self.backend.remove(AUTH_TOKEN_KEY);
    }

    pub fn is_present(&self) -> bool {
        self.load().is_some()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let tokens = TokenStore::in_memory();
        assert!(tokens.load().is_none());

        tokens.save("abc");
        assert_eq!(tokens.load().as_deref(), Some("abc"));
        assert!(tokens.is_present());

        tokens.clear();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_uses_fixed_key() {
        let backend = MemoryStore::new();
        let tokens = TokenStore::new(backend.clone());

        tokens.save("abc");
        assert_eq!(backend.get(AUTH_TOKEN_KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let backend = MemoryStore::new();
        backend.set(AUTH_TOKEN_KEY, "");

        let tokens = TokenStore::new(backend);
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_clones_share_backend() {
        let tokens = TokenStore::in_memory();
        let other = tokens.clone();

        tokens.save("abc");
        assert_eq!(other.load().as_deref(), Some("abc"));
    }
}
