//! # Feedback model
//!
//! A [`Feedback`] is one recognition message. Its [`Category`] is one of four
//! fixed recognition types, each with a stable id, a Japanese label, an emoji
//! and a short description.
//!
//! Anonymity is decided by whoever produces the data. When `is_anonymous` is
//! set the server leaves `sender` out of the payload; the client only honours
//! the flag, see [`Feedback::sender_label`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recognition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gratitude,
    Admiration,
    Appreciation,
    Respect,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Gratitude,
        Category::Admiration,
        Category::Appreciation,
        Category::Respect,
    ];

    pub fn id(&self) -> u8 {
        match self {
            Category::Gratitude => 0,
            Category::Admiration => 1,
            Category::Appreciation => 2,
            Category::Respect => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gratitude => "gratitude",
            Category::Admiration => "admiration",
            Category::Appreciation => "appreciation",
            Category::Respect => "respect",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Gratitude => "ありがとう",
            Category::Admiration => "すごい！",
            Category::Appreciation => "お疲れさま",
            Category::Respect => "さすが",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Gratitude => "🙏",
            Category::Admiration => "✨",
            Category::Appreciation => "💪",
            Category::Respect => "👏",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Gratitude => "感謝の気持ちを伝える",
            Category::Admiration => "成果や頑張りを称える",
            Category::Appreciation => "努力をねぎらう",
            Category::Respect => "能力や判断力を評価する",
        }
    }

    /// Accent colour used by charts and badges.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Gratitude => "#10b981",
            Category::Admiration => "#f59e0b",
            Category::Appreciation => "#3b82f6",
            Category::Respect => "#8b5cf6",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feedback category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Sender or recipient reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: u64,
    pub name: String,
}

/// One recognition message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: u64,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub reactions_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Party>,
}

impl Feedback {
    pub const ANONYMOUS_LABEL: &'static str = "匿名";

    /// Who to show as the sender. Never reads `sender` for anonymous feedback.
    pub fn sender_label(&self) -> &str {
        if self.is_anonymous {
            return Self::ANONYMOUS_LABEL;
        }
        self.sender
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(Self::ANONYMOUS_LABEL)
    }

    pub fn recipient_label(&self) -> &str {
        self.recipient.as_ref().map(|r| r.name.as_str()).unwrap_or("")
    }
}

/// `POST /feedbacks` payload, wrapped as `{"feedback": ...}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackFormData {
    pub recipient_id: String,
    pub category: Category,
    pub content: String,
    pub is_anonymous: bool,
}

/// `PATCH /feedbacks/:id` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
}

/// Which feedback listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackScope {
    Sent,
    Received,
}

impl FeedbackScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackScope::Sent => "sent",
            FeedbackScope::Received => "received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Thanks,
    Like,
    Celebrate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionUser {
    pub id: u64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: u64,
    pub reaction_type: ReactionType,
    pub reaction_name: String,
    pub reaction_emoji: String,
    pub user: ReactionUser,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_metadata() {
        let ids: Vec<u8> = Category::ALL.iter().map(Category::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(Category::Gratitude.label(), "ありがとう");
        assert_eq!(Category::Respect.emoji(), "👏");
        assert_eq!("appreciation".parse::<Category>(), Ok(Category::Appreciation));
        assert!("kudos".parse::<Category>().is_err());
        assert_eq!(Category::Admiration.to_string(), "admiration");
    }

    #[test]
    fn test_anonymous_feedback_hides_sender() {
        let feedback: Feedback = serde_json::from_value(serde_json::json!({
            "id": 5,
            "content": "いつもありがとうございます",
            "category": "gratitude",
            "isAnonymous": true,
            "isRead": false,
            "reactionsCount": 0,
            "createdAt": "2024-05-01T00:00:00Z",
            "updatedAt": "2024-05-01T00:00:00Z",
            "sender": {"id": 9, "name": "佐藤 花子"}
        }))
        .unwrap();

        assert_eq!(feedback.sender_label(), "匿名");
    }

    #[test]
    fn test_named_sender() {
        let feedback: Feedback = serde_json::from_value(serde_json::json!({
            "id": 6,
            "content": "素晴らしい発表でした",
            "category": "admiration",
            "createdAt": "2024-05-01T00:00:00Z",
            "updatedAt": "2024-05-01T00:00:00Z",
            "sender": {"id": 9, "name": "佐藤 花子"}
        }))
        .unwrap();

        assert!(!feedback.is_anonymous);
        assert!(!feedback.is_read);
        assert_eq!(feedback.sender_label(), "佐藤 花子");
    }

    #[test]
    fn test_form_data_wire_names() {
        let form = FeedbackFormData {
            recipient_id: "3".to_string(),
            category: Category::Respect,
            content: "判断が的確でした。".to_string(),
            is_anonymous: false,
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["recipientId"], "3");
        assert_eq!(json["category"], "respect");
        assert_eq!(json["isAnonymous"], false);
    }
}
