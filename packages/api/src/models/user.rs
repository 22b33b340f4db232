//! # User model
//!
//! [`User`] is the identity record the server returns from `/auth/login`,
//! `/auth/me` and the `/users` endpoints. The client never creates users; it
//! only reads them and sends partial updates as a [`UserPatch`].
//!
//! [`User::merge`] is the shallow merge behind the auth store's `update_user`:
//! every field set in the patch replaces the current value, every other field
//! is kept exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role. Only changeable through the admin user update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Japanese label used in the user directory.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "管理者",
            Role::User => "ユーザー",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub id: u64,
    pub name: String,
}

/// A user as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department.as_ref().map(|d| d.name.as_str())
    }

    /// First character of the name, for avatar placeholders.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }

    /// Shallow-merge `patch` into this user.
    pub fn merge(&mut self, patch: UserPatch) {
        let UserPatch {
            email,
            name,
            role,
            active,
            department,
            organization,
            updated_at,
        } = patch;
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(active) = active {
            self.active = active;
        }
        if let Some(department) = department {
            self.department = Some(department);
        }
        if let Some(organization) = organization {
            self.organization = Some(organization);
        }
        if let Some(updated_at) = updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// Partial user update. Unset fields are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(default)]
    pub token: String,
}

/// `GET /users` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Users {
    pub users: Vec<User>,
}

/// `PATCH /auth/password` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        serde_json::from_str(
            r#"{
                "id": 2,
                "email": "taro@tech.example.com",
                "name": "田中太郎",
                "role": "user",
                "active": true,
                "department": {"id": 1, "name": "開発部"},
                "createdAt": "2024-04-01T09:00:00Z",
                "updatedAt": "2024-04-02T09:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_user() {
        let user = sample();
        assert_eq!(user.id, 2);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.department_name(), Some("開発部"));
        assert!(user.organization.is_none());
        assert!(!user.is_admin());
        assert_eq!(user.initial(), "田");
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut user = sample();
        let before = user.clone();

        user.merge(UserPatch::default().name("田中 太郎"));

        assert_eq!(user.name, "田中 太郎");
        assert_eq!(user.email, before.email);
        assert_eq!(user.role, before.role);
        assert_eq!(user.department, before.department);
        assert_eq!(user.created_at, before.created_at);
        assert_eq!(user.updated_at, before.updated_at);
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let mut user = sample();
        let before = user.clone();
        user.merge(UserPatch::default());
        assert_eq!(user, before);
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = UserPatch::default().active(false);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"active": false}));
        assert!(!patch.is_empty());
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn test_auth_response_without_token() {
        let resp: AuthResponse = serde_json::from_value(serde_json::json!({
            "user": serde_json::to_value(sample()).unwrap()
        }))
        .unwrap();
        assert!(resp.token.is_empty());
    }
}
