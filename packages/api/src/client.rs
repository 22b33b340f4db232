//! # HTTP client for the Posifeed API
//!
//! [`ApiClient`] is the only place the app talks HTTP. Every call goes through
//! [`ApiClient::request`], which
//!
//! 1. prefixes the endpoint with the configured base URL,
//! 2. merges headers: `Content-Type: application/json`, then
//!    `Authorization: Bearer <token>` when a token is held, then the caller's
//!    overrides (later entries win),
//! 3. sends the request and reads the whole body,
//! 4. turns a non-2xx status into [`ApiError::Http`] carrying the server's
//!    `message` or `HTTP Error: <status>`,
//! 5. decodes a success body as JSON into the caller's type without further
//!    validation. An empty body decodes as `null`, so `()` works for 204s.
//!
//! ## Token handling
//!
//! The bearer token lives in memory and in a [`TokenStore`] at the same time.
//! [`set_token`](ApiClient::set_token) and [`clear_token`](ApiClient::clear_token)
//! always update both, synchronously, before returning. A client constructed
//! over a store that already holds a token picks it up immediately.
//!
//! There is no retry, caching, or timeout at this level.

use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use store::TokenStore;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, Feedback, FeedbackFormData, FeedbackPatch, FeedbackScope, Health, LoginRequest,
    NotificationSettings, Organization, OrganizationUsers, Paginated,
    PasswordChange, Reaction, ReactionType, User, UserPatch, UserStats, Users,
};

/// Per-request options for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header that overrides the defaults.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Query for the paginated feedback listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackQuery {
    pub scope: Option<FeedbackScope>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl FeedbackQuery {
    pub fn scope(scope: FeedbackScope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// `/feedbacks[/sent|/received][?page=..&per_page=..]`
    pub fn endpoint(&self) -> String {
        let mut endpoint = match self.scope {
            Some(scope) => format!("/feedbacks/{}", scope.as_str()),
            None => "/feedbacks".to_string(),
        };
        let params: Vec<String> = [("page", self.page), ("per_page", self.per_page)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect();
        if !params.is_empty() {
            endpoint.push('?');
            endpoint.push_str(&params.join("&"));
        }
        endpoint
    }
}

/// Client for the Posifeed HTTP API. Clones share the token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<Mutex<Option<String>>>,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> Self {
        let token = tokens.load();
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            token: Arc::new(Mutex::new(token)),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The durable store behind this client.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// The in-memory token.
    pub fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    pub fn set_token(&self, token: &str) {
        if let Ok(mut current) = self.token.lock() {
            *current = Some(token.to_string());
        }
        self.tokens.save(token);
    }

    pub fn clear_token(&self) {
        if let Ok(mut current) = self.token.lock() {
            *current = None;
        }
        self.tokens.clear();
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Default JSON header, bearer header, then `overrides`.
    pub fn headers(&self, overrides: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Stored token is not a valid header value, sending without it"),
            }
        }
        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!("{} {}", options.method, url);

        let mut builder = self
            .http
            .request(options.method.clone(), &url)
            .headers(self.headers(&options.headers));
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &bytes);
            tracing::debug!("{} {} failed: {}", options.method, url, err);
            return Err(err);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::new(Method::POST).json(serde_json::to_value(body)?);
        self.request(endpoint, options).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::new(Method::PATCH).json(serde_json::to_value(body)?);
        self.request(endpoint, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::new(Method::DELETE)).await
    }

    // Authentication

    /// Log in and keep the returned token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.post("/auth/login", credentials).await?;
        if !response.token.is_empty() {
            self.set_token(&response.token);
        }
        Ok(response)
    }

    /// Tell the server to end the session. The local token is cleared whatever
    /// the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.delete::<serde_json::Value>("/auth/logout").await;
        self.clear_token();
        result.map(|_| ())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn update_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        self.patch("/auth/me", &json!({ "user": patch })).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.patch::<serde_json::Value, _>("/auth/password", change)
            .await
            .map(|_| ())
    }

    pub async fn update_notifications(
        &self,
        settings: &NotificationSettings,
    ) -> Result<(), ApiError> {
        self.patch::<serde_json::Value, _>(
            "/settings/notifications",
            &json!({ "notifications": settings }),
        )
        .await
        .map(|_| ())
    }

    // Feedback

    pub async fn feedbacks(&self, query: FeedbackQuery) -> Result<Paginated<Feedback>, ApiError> {
        self.get(&query.endpoint()).await
    }

    pub async fn create_feedback(&self, data: &FeedbackFormData) -> Result<Feedback, ApiError> {
        self.post("/feedbacks", &json!({ "feedback": data })).await
    }

    pub async fn update_feedback(&self, id: u64, data: &FeedbackPatch) -> Result<Feedback, ApiError> {
        self.patch(&format!("/feedbacks/{id}"), &json!({ "feedback": data }))
            .await
    }

    pub async fn delete_feedback(&self, id: u64) -> Result<(), ApiError> {
        self.delete::<serde_json::Value>(&format!("/feedbacks/{id}"))
            .await
            .map(|_| ())
    }

    pub async fn mark_feedback_read(&self, id: u64) -> Result<Feedback, ApiError> {
        self.request(
            &format!("/feedbacks/{id}/read"),
            RequestOptions::new(Method::PATCH),
        )
        .await
    }

    pub async fn add_reaction(
        &self,
        feedback_id: u64,
        reaction_type: ReactionType,
    ) -> Result<Reaction, ApiError> {
        #[derive(serde::Deserialize)]
        struct Created {
            reaction: Reaction,
        }
        let created: Created = self
            .post(
                &format!("/feedbacks/{feedback_id}/reaction"),
                &json!({ "reaction": { "reaction_type": reaction_type } }),
            )
            .await?;
        Ok(created.reaction)
    }

    pub async fn remove_reaction(&self, feedback_id: u64) -> Result<(), ApiError> {
        self.delete::<serde_json::Value>(&format!("/feedbacks/{feedback_id}/reaction"))
            .await
            .map(|_| ())
    }

    // Users

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let users: Users = self.get("/users").await?;
        Ok(users.users)
    }

    pub async fn user(&self, id: u64) -> Result<User, ApiError> {
        self.get(&format!("/users/{id}")).await
    }

    pub async fn update_user(&self, id: u64, patch: &UserPatch) -> Result<User, ApiError> {
        self.patch(&format!("/users/{id}"), &json!({ "user": patch }))
            .await
    }

    /// `period` is a number of days; `None` asks for the server default (30).
    pub async fn user_stats(&self, id: u64, period: Option<i64>) -> Result<UserStats, ApiError> {
        let period = period.unwrap_or(30);
        self.get(&format!("/users/{id}/stats?period={period}")).await
    }

    // Organization

    pub async fn organization(&self) -> Result<Organization, ApiError> {
        self.get("/organization").await
    }

    pub async fn organization_users(&self) -> Result<OrganizationUsers, ApiError> {
        self.get("/organization/users").await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health").await
    }
}
