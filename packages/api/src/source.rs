//! # Data sources
//!
//! Pages never talk to [`ApiClient`] directly. They go through a
//! [`DataSource`], which has two implementations:
//!
//! - [`LiveSource`] calls the HTTP API.
//! - [`FixtureSource`] serves the bundled sample data from
//!   [`crate::fixtures`] and simulates login: any non-empty email and password
//!   succeed, the role is admin when the email contains `admin`, and a
//!   `mock-jwt-token-<millis>` token is persisted like a real one.
//!
//! [`Source`] picks one of them from [`ApiConfig::source`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use store::TokenStore;

use crate::client::{ApiClient, FeedbackQuery};
use crate::config::{ApiConfig, SourceKind};
use crate::dashboard::{self, DashboardSummary, Metric};
use crate::error::ApiError;
use crate::filter::TimeWindow;
use crate::fixtures;
use crate::models::{
    AuthResponse, Feedback, FeedbackFormData, FeedbackScope, LoginRequest, NotificationSettings,
    OrganizationStatistics, Party, PasswordChange, User, UserPatch,
};

/// Page size used when a page wants "everything".
pub const LIST_PAGE_SIZE: u32 = 100;

/// Everything the pages read and write.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Durable token storage behind this source.
    fn tokens(&self) -> &TokenStore;

    /// Drop the session token from memory and durable storage.
    fn clear_session(&self);

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn current_user(&self) -> Result<User, ApiError>;

    async fn received_feedback(&self) -> Result<Vec<Feedback>, ApiError>;

    async fn sent_feedback(&self) -> Result<Vec<Feedback>, ApiError>;

    async fn send_feedback(&self, data: &FeedbackFormData) -> Result<Feedback, ApiError>;

    async fn mark_read(&self, id: u64) -> Result<(), ApiError>;

    async fn users(&self) -> Result<Vec<User>, ApiError>;

    async fn set_user_active(&self, id: u64, active: bool) -> Result<User, ApiError>;

    async fn statistics(&self, window: TimeWindow) -> Result<OrganizationStatistics, ApiError>;

    async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError>;

    async fn update_notifications(&self, settings: &NotificationSettings) -> Result<(), ApiError>;

    async fn dashboard(&self, user: &User) -> Result<DashboardSummary, ApiError>;
}

/// [`DataSource`] backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct LiveSource {
    client: ApiClient,
}

impl LiveSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn list(&self, scope: FeedbackScope) -> Result<Vec<Feedback>, ApiError> {
        let page = self
            .client
            .feedbacks(FeedbackQuery::scope(scope).page(1).per_page(LIST_PAGE_SIZE))
            .await?;
        Ok(page.data)
    }
}

impl DataSource for LiveSource {
    fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    fn clear_session(&self) {
        self.client.clear_token();
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.login(&credentials).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.client.logout().await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.client.current_user().await
    }

    async fn received_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.list(FeedbackScope::Received).await
    }

    async fn sent_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.list(FeedbackScope::Sent).await
    }

    async fn send_feedback(&self, data: &FeedbackFormData) -> Result<Feedback, ApiError> {
        self.client.create_feedback(data).await
    }

    async fn mark_read(&self, id: u64) -> Result<(), ApiError> {
        self.client.mark_feedback_read(id).await.map(|_| ())
    }

    async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.client.users().await
    }

    async fn set_user_active(&self, id: u64, active: bool) -> Result<User, ApiError> {
        self.client
            .update_user(id, &UserPatch::default().active(active))
            .await
    }

    /// The API has no organisation-wide report, so the statistics page reads
    /// the sample report in both modes.
    async fn statistics(&self, window: TimeWindow) -> Result<OrganizationStatistics, ApiError> {
        Ok(fixtures::statistics(window, Utc::now().date_naive()))
    }

    async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        self.client.update_profile(patch).await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.client.change_password(change).await
    }

    async fn update_notifications(&self, settings: &NotificationSettings) -> Result<(), ApiError> {
        self.client.update_notifications(settings).await
    }

    async fn dashboard(&self, user: &User) -> Result<DashboardSummary, ApiError> {
        let received = self.received_feedback().await?;
        let sent = self.sent_feedback().await?;
        let stats = self.client.user_stats(user.id, Some(7)).await?;
        let organization = self.client.organization().await?;

        let score = stats.overall_stats.positivity_score.round() as u32;
        let change = match stats.weekly_trends.as_slice() {
            [.., previous, latest] => (latest.positivity_score - previous.positivity_score).round() as i64,
            _ => 0,
        };

        Ok(DashboardSummary::from_parts(
            &received,
            &sent,
            Metric::new(score, change),
            Metric::new(organization.stats.total_users, 0),
            Utc::now(),
        ))
    }
}

/// Mutable state behind a [`FixtureSource`].
#[derive(Debug, Clone)]
pub struct FixtureData {
    pub current: Option<User>,
    pub received: Vec<Feedback>,
    pub sent: Vec<Feedback>,
    pub users: Vec<User>,
    pub notifications: NotificationSettings,
    pub created_at: DateTime<Utc>,
}

impl FixtureData {
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            current: None,
            received: fixtures::received(now),
            sent: fixtures::sent(now),
            users: fixtures::users(now),
            notifications: NotificationSettings::default(),
            created_at: now,
        }
    }
}

/// [`DataSource`] serving in-process sample data. Clones share state.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    tokens: TokenStore,
    data: Arc<Mutex<FixtureData>>,
}

impl FixtureSource {
    pub fn new(tokens: TokenStore) -> Self {
        Self::with_data(tokens, FixtureData::sample(Utc::now()))
    }

    pub fn with_data(tokens: TokenStore, data: FixtureData) -> Self {
        Self {
            tokens,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Snapshot of the current fixture state.
    pub fn snapshot(&self) -> Result<FixtureData, ApiError> {
        self.with(|data| Ok(data.clone()))
    }

    fn with<T>(&self, f: impl FnOnce(&mut FixtureData) -> Result<T, ApiError>) -> Result<T, ApiError> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| ApiError::Invalid("fixture state is poisoned".to_string()))?;
        f(&mut data)
    }
}

impl DataSource for FixtureSource {
    fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn clear_session(&self) {
        self.tokens.clear();
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Invalid(
                "メールアドレスとパスワードを入力してください".to_string(),
            ));
        }
        let now = Utc::now();
        let token = format!("mock-jwt-token-{}", now.timestamp_millis());
        self.tokens.save(&token);

        let user = fixtures::login_user(email, now);
        self.with(|data| {
            data.current = Some(user.clone());
            Ok(())
        })?;
        tracing::info!("Fixture login as {}", user.email);
        Ok(AuthResponse { user, token })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear();
        self.with(|data| {
            data.current = None;
            Ok(())
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        if !self.tokens.is_present() {
            return Err(ApiError::Http {
                status: 401,
                message: "Unauthorized".to_string(),
            });
        }
        self.with(|data| {
            Ok(data
                .current
                .clone()
                .unwrap_or_else(|| fixtures::placeholder_user(data.created_at)))
        })
    }

    async fn received_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.with(|data| Ok(data.received.clone()))
    }

    async fn sent_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.with(|data| Ok(data.sent.clone()))
    }

    async fn send_feedback(&self, form: &FeedbackFormData) -> Result<Feedback, ApiError> {
        self.with(|data| {
            let recipient = data
                .users
                .iter()
                .find(|u| u.id.to_string() == form.recipient_id)
                .map(|u| Party {
                    id: u.id,
                    name: u.name.clone(),
                })
                .ok_or_else(|| ApiError::Invalid("送信先が見つかりません".to_string()))?;

            let now = Utc::now();
            let id = data.sent.iter().map(|f| f.id).max().unwrap_or(0) + 1;
            let feedback = Feedback {
                id,
                content: form.content.clone(),
                category: form.category,
                is_anonymous: form.is_anonymous,
                is_read: false,
                reactions_count: 0,
                created_at: now,
                updated_at: now,
                sender: None,
                recipient: Some(recipient),
            };
            data.sent.insert(0, feedback.clone());
            Ok(feedback)
        })
    }

    async fn mark_read(&self, id: u64) -> Result<(), ApiError> {
        self.with(|data| {
            if let Some(feedback) = data.received.iter_mut().find(|f| f.id == id) {
                feedback.is_read = true;
            }
            Ok(())
        })
    }

    async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.with(|data| Ok(data.users.clone()))
    }

    async fn set_user_active(&self, id: u64, active: bool) -> Result<User, ApiError> {
        self.with(|data| {
            let user = data
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| ApiError::Http {
                    status: 404,
                    message: "User not found".to_string(),
                })?;
            user.active = active;
            user.updated_at = Utc::now();
            Ok(user.clone())
        })
    }

    async fn statistics(&self, window: TimeWindow) -> Result<OrganizationStatistics, ApiError> {
        Ok(fixtures::statistics(window, Utc::now().date_naive()))
    }

    async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        self.with(|data| {
            let mut user = data
                .current
                .clone()
                .unwrap_or_else(|| fixtures::placeholder_user(data.created_at));
            user.merge(patch.clone());
            user.updated_at = Utc::now();
            data.current = Some(user.clone());
            Ok(user)
        })
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        if change.current_password.is_empty() {
            return Err(ApiError::Invalid(
                "現在のパスワードを入力してください".to_string(),
            ));
        }
        Ok(())
    }

    async fn update_notifications(&self, settings: &NotificationSettings) -> Result<(), ApiError> {
        self.with(|data| {
            data.notifications = *settings;
            Ok(())
        })
    }

    async fn dashboard(&self, _user: &User) -> Result<DashboardSummary, ApiError> {
        self.with(|data| {
            let mut summary = fixtures::dashboard(data.created_at);
            summary.recent = dashboard::recent(&data.received);
            Ok(summary)
        })
    }
}

/// The data source selected by configuration.
#[derive(Debug, Clone)]
pub enum Source {
    Live(LiveSource),
    Fixture(FixtureSource),
}

impl Source {
    pub fn from_config(config: &ApiConfig, tokens: TokenStore) -> Self {
        match config.source {
            SourceKind::Live => {
                tracing::info!("Using API at {}", config.base_url);
                Source::Live(LiveSource::new(ApiClient::new(config, tokens)))
            }
            SourceKind::Fixture => {
                tracing::info!("Using fixture data");
                Source::Fixture(FixtureSource::new(tokens))
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Live(_) => SourceKind::Live,
            Source::Fixture(_) => SourceKind::Fixture,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            Source::Live($inner) => $call,
            Source::Fixture($inner) => $call,
        }
    };
}

impl DataSource for Source {
    fn tokens(&self) -> &TokenStore {
        dispatch!(self, s => s.tokens())
    }

    fn clear_session(&self) {
        dispatch!(self, s => s.clear_session())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        dispatch!(self, s => s.login(email, password).await)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        dispatch!(self, s => s.logout().await)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        dispatch!(self, s => s.current_user().await)
    }

    async fn received_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        dispatch!(self, s => s.received_feedback().await)
    }

    async fn sent_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        dispatch!(self, s => s.sent_feedback().await)
    }

    async fn send_feedback(&self, data: &FeedbackFormData) -> Result<Feedback, ApiError> {
        dispatch!(self, s => s.send_feedback(data).await)
    }

    async fn mark_read(&self, id: u64) -> Result<(), ApiError> {
        dispatch!(self, s => s.mark_read(id).await)
    }

    async fn users(&self) -> Result<Vec<User>, ApiError> {
        dispatch!(self, s => s.users().await)
    }

    async fn set_user_active(&self, id: u64, active: bool) -> Result<User, ApiError> {
        dispatch!(self, s => s.set_user_active(id, active).await)
    }

    async fn statistics(&self, window: TimeWindow) -> Result<OrganizationStatistics, ApiError> {
        dispatch!(self, s => s.statistics(window).await)
    }

    async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        dispatch!(self, s => s.update_profile(patch).await)
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        dispatch!(self, s => s.change_password(change).await)
    }

    async fn update_notifications(&self, settings: &NotificationSettings) -> Result<(), ApiError> {
        dispatch!(self, s => s.update_notifications(settings).await)
    }

    async fn dashboard(&self, user: &User) -> Result<DashboardSummary, ApiError> {
        dispatch!(self, s => s.dashboard(user).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, AUTH_TOKEN_KEY};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fixture_login_rejects_empty_credentials() {
        let backend = MemoryStore::new();
        let source = FixtureSource::new(TokenStore::new(backend.clone()));

        let err = source.login("", "secret").await.unwrap_err();
        assert_eq!(err.to_string(), "メールアドレスとパスワードを入力してください");
        assert!(source.login("taro@tech.example.com", "").await.is_err());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_fixture_login_persists_mock_token() {
        let backend = MemoryStore::new();
        let source = FixtureSource::new(TokenStore::new(backend.clone()));

        let response = source.login("admin@tech.example.com", "pw").await.unwrap();
        assert!(response.token.starts_with("mock-jwt-token-"));
        assert!(response.user.is_admin());
        assert_eq!(backend.get(AUTH_TOKEN_KEY), Some(response.token.clone()));
        assert_eq!(source.current_user().await.unwrap(), response.user);

        source.logout().await.unwrap();
        assert!(backend.is_empty());
        assert!(source.current_user().await.is_err());
    }

    #[tokio::test]
    async fn test_fixture_restores_placeholder_user() {
        let tokens = TokenStore::in_memory();
        tokens.save("mock-jwt-token-1");

        let source = FixtureSource::new(tokens);
        let user = source.current_user().await.unwrap();
        assert_eq!(user.name, "田中太郎");
        assert_eq!(user.email, "taro@tech.example.com");
    }

    #[tokio::test]
    async fn test_fixture_mutations() {
        let source = FixtureSource::new(TokenStore::in_memory());

        source.mark_read(1).await.unwrap();
        let received = source.received_feedback().await.unwrap();
        assert!(received.iter().find(|f| f.id == 1).unwrap().is_read);

        let user = source.set_user_active(3, false).await.unwrap();
        assert!(!user.active);
        assert!(!source.users().await.unwrap()[2].active);
        assert!(source.set_user_active(99, false).await.is_err());

        let sent = source
            .send_feedback(&FeedbackFormData {
                recipient_id: "3".to_string(),
                category: Category::Respect,
                content: "レビューの観点がいつも的確です".to_string(),
                is_anonymous: false,
            })
            .await
            .unwrap();
        assert_eq!(sent.id, 4);
        assert_eq!(sent.recipient_label(), "佐藤花子");
        assert_eq!(source.sent_feedback().await.unwrap()[0].id, 4);
    }

    #[tokio::test]
    async fn test_fixture_update_profile_merges() {
        let source = FixtureSource::new(TokenStore::in_memory());
        source.login("taro@tech.example.com", "pw").await.unwrap();

        let user = source
            .update_profile(&UserPatch::default().name("田中 太郎"))
            .await
            .unwrap();
        assert_eq!(user.name, "田中 太郎");
        assert_eq!(user.email, "taro@tech.example.com");
        assert_eq!(source.snapshot().unwrap().current, Some(user));
    }

    #[tokio::test]
    async fn test_source_from_config() {
        let config = ApiConfig::default().with_source(SourceKind::Fixture);
        let source = Source::from_config(&config, TokenStore::in_memory());
        assert_eq!(source.kind(), SourceKind::Fixture);

        let stats = source.statistics(TimeWindow::ThirtyDays).await.unwrap();
        assert_eq!(stats.total_feedbacks, 156);
    }

    #[tokio::test]
    async fn test_live_source_lists_and_toggles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/feedbacks/sent"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [],
                "meta": {"current_page": 1, "total_pages": 0, "total_count": 0, "per_page": 100}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/users/3"))
            .and(body_json(json!({"user": {"active": false}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "email": "hanako@tech.example.com",
                "name": "佐藤花子",
                "role": "user",
                "active": false,
                "createdAt": "2024-04-01T09:00:00Z",
                "updatedAt": "2024-04-02T09:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig::new(format!("{}/api/v1", server.uri())).with_source(SourceKind::Live);
        let source = Source::from_config(&config, TokenStore::in_memory());
        assert_eq!(source.kind(), SourceKind::Live);

        assert!(source.sent_feedback().await.unwrap().is_empty());
        assert!(!source.set_user_active(3, false).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_live_statistics_use_sample_report_without_requests() {
        let server = MockServer::start().await;
        let config = ApiConfig::new(format!("{}/api/v1", server.uri())).with_source(SourceKind::Live);
        let source = Source::from_config(&config, TokenStore::in_memory());

        let stats = source.statistics(TimeWindow::SevenDays).await.unwrap();
        let expected = fixtures::statistics(TimeWindow::SevenDays, Utc::now().date_naive());
        assert_eq!(stats.total_feedbacks, expected.total_feedbacks);
        assert_eq!(stats.top_senders, expected.top_senders);

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_fixture_dashboard_lists_newest_received_first() {
        let now = Utc::now();
        let mut data = FixtureData::sample(now);
        let template = data.received[0].clone();
        data.received = (1..=6)
            .map(|id| Feedback {
                id,
                created_at: now - chrono::Duration::hours(10 - id as i64),
                ..template.clone()
            })
            .rev()
            .chain(std::iter::once(Feedback {
                id: 7,
                created_at: now,
                ..template.clone()
            }))
            .collect();
        let source = FixtureSource::with_data(TokenStore::in_memory(), data);
        let user = fixtures::placeholder_user(now);

        let summary = source.dashboard(&user).await.unwrap();
        let ids: Vec<u64> = summary.recent.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4]);
    }
}
