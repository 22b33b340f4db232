use crate::error::ApiError;
use crate::models::{User, UserPatch};
use crate::source::DataSource;

use super::session::AuthState;

/// Resolve the persisted session, if any.
///
/// Without a stored token this returns `None` without touching the network.
/// A failed lookup means the token is stale, so it is cleared.
pub async fn restore_session<S: DataSource>(source: &S) -> Option<User> {
    if !source.tokens().is_present() {
        return None;
    }
    match source.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("Stored session could not be restored: {e}");
            source.clear_session();
            None
        }
    }
}

pub async fn login<S: DataSource>(source: &S, email: &str, password: &str) -> Result<User, ApiError> {
    let response = source.login(email, password).await?;
    Ok(response.user)
}

/// End the session on the server, then locally whatever the server said.
pub async fn logout<S: DataSource>(source: &S) {
    if let Err(e) = source.logout().await {
        tracing::error!("Logout failed: {e}");
    }
    source.clear_session();
}

/// Framework-independent owner of an [`AuthState`].
#[derive(Debug)]
pub struct AuthStore<S> {
    source: S,
    state: AuthState,
}

impl<S: DataSource> AuthStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: AuthState::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Run the startup session check. Only the first call does anything.
    pub async fn initialize(&mut self) {
        if !self.state.begin() {
            return;
        }
        let user = restore_session(&self.source).await;
        self.state.resolve(user);
    }

    /// On failure the previous state is kept.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let user = login(&self.source, email, password).await?;
        self.state.sign_in(user);
        Ok(())
    }

    pub async fn logout(&mut self) {
        logout(&self.source).await;
        self.state.sign_out();
    }

    pub fn update_user(&mut self, patch: UserPatch) {
        self.state.update_user(patch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::config::ApiConfig;
    use crate::source::{FixtureSource, LiveSource};
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TokenStore, AUTH_TOKEN_KEY};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json() -> serde_json::Value {
        json!({
            "id": 2,
            "email": "taro@tech.example.com",
            "name": "田中太郎",
            "role": "user",
            "active": true,
            "department": {"id": 1, "name": "開発部"},
            "createdAt": "2024-04-01T09:00:00Z",
            "updatedAt": "2024-04-01T09:00:00Z"
        })
    }

    fn live(base_url: &str, backend: &MemoryStore) -> LiveSource {
        let client = ApiClient::new(&ApiConfig::new(base_url), TokenStore::new(backend.clone()));
        LiveSource::new(client)
    }

    #[tokio::test]
    async fn test_initialize_without_token() {
        let mut auth = AuthStore::new(FixtureSource::new(TokenStore::in_memory()));
        assert!(auth.is_loading());

        auth.initialize().await;
        assert!(!auth.is_loading());
        assert_eq!(auth.state(), &AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_restores_fixture_user() {
        let tokens = TokenStore::in_memory();
        tokens.save("mock-jwt-token-1");

        let mut auth = AuthStore::new(FixtureSource::new(tokens));
        auth.initialize().await;
        assert_eq!(auth.user().map(|u| u.name.as_str()), Some("田中太郎"));
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let backend = MemoryStore::new();
        backend.set(AUTH_TOKEN_KEY, "jwt-123");
        let mut auth = AuthStore::new(live(&format!("{}/api/v1", server.uri()), &backend));

        auth.initialize().await;
        auth.initialize().await;
        assert_eq!(auth.user().map(|u| u.id), Some(2));
    }

    #[tokio::test]
    async fn test_initialize_clears_stale_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = MemoryStore::new();
        backend.set(AUTH_TOKEN_KEY, "expired");
        let mut auth = AuthStore::new(live(&format!("{}/api/v1", server.uri()), &backend));

        auth.initialize().await;
        assert_eq!(auth.state(), &AuthState::Unauthenticated);
        assert!(backend.get(AUTH_TOKEN_KEY).is_none());
        assert!(auth.source().client().token().is_none());
    }

    #[tokio::test]
    async fn test_login_stores_server_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"user": user_json(), "token": "jwt-456"})),
            )
            .mount(&server)
            .await;

        let backend = MemoryStore::new();
        let mut auth = AuthStore::new(live(&format!("{}/api/v1", server.uri()), &backend));
        auth.initialize().await;

        auth.login("taro@tech.example.com", "secret").await.unwrap();

        let expected: User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(backend.get(AUTH_TOKEN_KEY).as_deref(), Some("jwt-456"));
        assert_eq!(auth.user(), Some(&expected));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let backend = MemoryStore::new();
        let mut auth = AuthStore::new(live(&format!("{}/api/v1", server.uri()), &backend));
        auth.initialize().await;

        let err = auth.login("taro@tech.example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(auth.state(), &AuthState::Unauthenticated);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_logout_when_server_unreachable() {
        let backend = MemoryStore::new();
        let source = live("http://127.0.0.1:9/api/v1", &backend);
        source.client().set_token("jwt-123");

        let mut auth = AuthStore::new(source);
        auth.state = AuthState::Authenticated(serde_json::from_value(user_json()).unwrap());

        auth.logout().await;
        assert!(auth.user().is_none());
        assert!(backend.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_fixture_login_logout_cycle() {
        let backend = MemoryStore::new();
        let mut auth = AuthStore::new(FixtureSource::new(TokenStore::new(backend.clone())));
        auth.initialize().await;

        assert!(auth.login("", "").await.is_err());
        assert!(auth.user().is_none());

        auth.login("admin@tech.example.com", "pw").await.unwrap();
        assert!(auth.user().unwrap().is_admin());
        assert!(backend.get(AUTH_TOKEN_KEY).unwrap().starts_with("mock-jwt-token-"));

        auth.update_user(UserPatch::default().name("管理者 太郎"));
        assert_eq!(auth.user().unwrap().name, "管理者 太郎");
        assert_eq!(auth.user().unwrap().email, "admin@tech.example.com");

        auth.logout().await;
        assert!(auth.user().is_none());
        assert!(backend.is_empty());
    }
}
