//! Platform-appropriate session storage and data source.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Native**: `<data_dir>/posifeed/storage.toml` via [`store::FileStore`]

use api::{ApiConfig, Source};
use store::TokenStore;

/// Token storage for the current platform.
pub fn make_token_store() -> TokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        TokenStore::new(store::LocalStorageStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        TokenStore::in_memory()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        TokenStore::new(store::FileStore::in_data_dir())
    }
}

/// The data source selected by the build configuration.
pub fn make_source() -> Source {
    let config = ApiConfig::from_env();
    let tokens = make_token_store();
    tracing::debug!(
        "Creating {:?} source, stored session present: {}",
        config.source,
        tokens.is_present()
    );
    Source::from_config(&config, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::SourceKind;

    #[test]
    fn test_make_source_uses_compiled_kind() {
        assert_eq!(make_source().kind(), SourceKind::compiled());
    }
}
