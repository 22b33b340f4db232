use serde::{Deserialize, Serialize};

/// Email notification preferences, sent as `{"notifications": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub feedback_received: bool,
    pub feedback_read: bool,
    pub weekly_report: bool,
    pub monthly_report: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            feedback_received: true,
            feedback_read: false,
            weekly_report: true,
            monthly_report: true,
        }
    }
}
