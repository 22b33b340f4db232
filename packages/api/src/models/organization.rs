use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationStats {
    pub total_users: u32,
    pub total_feedbacks: u32,
    pub departments_count: u32,
}

/// `GET /organization` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    pub active: bool,
    pub stats: OrganizationStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /organization/users` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationUsers {
    pub organization: Organization,
    pub users: Vec<User>,
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub database: String,
    pub redis: String,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
