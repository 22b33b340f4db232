//! # Client configuration
//!
//! | Setting | Source | Default |
//! |---------|--------|---------|
//! | API base URL | `POSIFEED_API_URL` at runtime (native, `.env` honoured), else the same variable at compile time | `http://localhost:3001/api/v1` |
//! | Data source | `live` cargo feature | fixtures |
//!
//! Web builds cannot read the environment at runtime, so for them the override
//! is baked in when the crate is compiled.

/// Base URL used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/v1";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "POSIFEED_API_URL";

/// Which backend pages read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The HTTP API at the configured base URL.
    Live,
    /// Bundled sample data; login accepts any non-empty credentials.
    Fixture,
}

impl SourceKind {
    /// The kind selected at compile time through the `live` feature.
    pub fn compiled() -> Self {
        if cfg!(feature = "live") {
            SourceKind::Live
        } else {
            SourceKind::Fixture
        }
    }
}

impl Default for SourceKind {
    fn default() -> Self {
        Self::compiled()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub source: SourceKind,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            source: SourceKind::compiled(),
        }
    }

    /// Resolve the configuration from the environment.
    pub fn from_env() -> Self {
        Self::new(resolve_base_url(runtime_override(), option_env!("POSIFEED_API_URL")))
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    None
}

/// Runtime override first, then the compile-time one, then the default.
fn resolve_base_url(runtime: Option<String>, compiled: Option<&str>) -> String {
    runtime
        .filter(|url| !url.trim().is_empty())
        .or_else(|| {
            compiled
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(resolve_base_url(None, None), DEFAULT_API_URL);
        assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_runtime_override_wins() {
        let url = resolve_base_url(
            Some("https://posifeed.example.com/api/v1".to_string()),
            Some("http://compiled"),
        );
        assert_eq!(url, "https://posifeed.example.com/api/v1");
    }

    #[test]
    fn test_compiled_override() {
        assert_eq!(resolve_base_url(None, Some("http://compiled")), "http://compiled");
        assert_eq!(
            resolve_base_url(Some("  ".to_string()), Some("http://compiled")),
            "http://compiled"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::new("http://localhost:3001/api/v1/");
        assert_eq!(config.base_url, "http://localhost:3001/api/v1");
    }

    #[test]
    fn test_with_source() {
        let config = ApiConfig::default().with_source(SourceKind::Live);
        assert_eq!(config.source, SourceKind::Live);
    }
}
