//! Client-side form validation.
//!
//! Each form validates before anything is sent. Errors are collected per field
//! so the page can show them next to the inputs.

use std::collections::BTreeMap;

use crate::models::{Category, FeedbackFormData, LoginRequest, PasswordChange, UserPatch};

pub const CONTENT_MIN_CHARS: usize = 10;
pub const CONTENT_MAX_CHARS: usize = 500;
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.is_empty() {
            errors.add("email", "メールアドレスを入力してください");
        }
        if self.password.is_empty() {
            errors.add("password", "パスワードを入力してください");
        }
        errors.into_result()
    }
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub recipient_id: String,
    pub category: Option<Category>,
    pub content: String,
    pub is_anonymous: bool,
}

impl FeedbackForm {
    /// Length of the message as the counter under the textarea shows it.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// The request body, once the form is valid.
    pub fn to_data(&self) -> Result<FeedbackFormData, FieldErrors> {
        self.validate()?;
        let Some(category) = self.category else {
            return Err(FieldErrors::new());
        };
        Ok(FeedbackFormData {
            recipient_id: self.recipient_id.clone(),
            category,
            content: self.content.clone(),
            is_anonymous: self.is_anonymous,
        })
    }
}

impl Validate for FeedbackForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.recipient_id.is_empty() {
            errors.add("recipient_id", "送信先を選択してください");
        }
        if self.category.is_none() {
            errors.add("category", "カテゴリを選択してください");
        }
        let len = self.content_len();
        if len < CONTENT_MIN_CHARS {
            errors.add("content", "メッセージは10文字以上で入力してください");
        } else if len > CONTENT_MAX_CHARS {
            errors.add("content", "メッセージは500文字以下で入力してください");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn to_change(&self) -> Result<PasswordChange, FieldErrors> {
        self.validate()?;
        Ok(PasswordChange {
            current_password: self.current_password.clone(),
            password: self.new_password.clone(),
            password_confirmation: self.confirm_password.clone(),
        })
    }
}

impl Validate for PasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.new_password != self.confirm_password {
            errors.add("confirm_password", "新しいパスワードが一致しません");
        } else if self.new_password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add("new_password", "パスワードは8文字以上で設定してください");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

impl ProfileForm {
    pub fn to_patch(&self) -> Result<UserPatch, FieldErrors> {
        self.validate()?;
        Ok(UserPatch::default()
            .name(self.name.trim())
            .email(self.email.trim()))
    }
}

impl Validate for ProfileForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "名前を入力してください");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "メールアドレスを入力してください");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_form(content: &str) -> FeedbackForm {
        FeedbackForm {
            recipient_id: "3".to_string(),
            category: Some(Category::Gratitude),
            content: content.to_string(),
            is_anonymous: false,
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("メールアドレスを入力してください"));
        assert_eq!(errors.get("password"), Some("パスワードを入力してください"));

        let form = LoginForm {
            email: "taro@tech.example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.to_request().email, "taro@tech.example.com");
    }

    #[test]
    fn test_feedback_content_bounds_count_characters() {
        // ten multi-byte characters is long enough
        let ok = feedback_form("ありがとうございます");
        assert_eq!(ok.content_len(), 10);
        assert!(ok.validate().is_ok());

        let short = feedback_form("ありがとう");
        assert_eq!(
            short.validate().unwrap_err().get("content"),
            Some("メッセージは10文字以上で入力してください")
        );

        let long = feedback_form(&"あ".repeat(501));
        assert_eq!(
            long.validate().unwrap_err().get("content"),
            Some("メッセージは500文字以下で入力してください")
        );
        assert!(feedback_form(&"あ".repeat(500)).validate().is_ok());
    }

    #[test]
    fn test_feedback_requires_recipient_and_category() {
        let form = FeedbackForm {
            content: "素晴らしい発表でした！".to_string(),
            ..FeedbackForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("recipient_id"), Some("送信先を選択してください"));
        assert_eq!(errors.get("category"), Some("カテゴリを選択してください"));
        assert!(form.to_data().is_err());
    }

    #[test]
    fn test_feedback_to_data() {
        let data = feedback_form("いつも助けてくれてありがとう").to_data().unwrap();
        assert_eq!(data.recipient_id, "3");
        assert_eq!(data.category, Category::Gratitude);
        assert!(!data.is_anonymous);
    }

    #[test]
    fn test_password_rules() {
        let mismatch = PasswordForm {
            current_password: "old".to_string(),
            new_password: "newpassword".to_string(),
            confirm_password: "newpassw0rd".to_string(),
        };
        assert_eq!(
            mismatch.validate().unwrap_err().get("confirm_password"),
            Some("新しいパスワードが一致しません")
        );

        let short = PasswordForm {
            current_password: "old".to_string(),
            new_password: "short".to_string(),
            confirm_password: "short".to_string(),
        };
        assert_eq!(
            short.validate().unwrap_err().get("new_password"),
            Some("パスワードは8文字以上で設定してください")
        );

        let ok = PasswordForm {
            current_password: "old".to_string(),
            new_password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
        };
        let change = ok.to_change().unwrap();
        assert_eq!(change.password_confirmation, "longenough");
    }

    #[test]
    fn test_profile_form() {
        let errors = ProfileForm {
            name: "  ".to_string(),
            email: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.messages().count(), 2);

        let patch = ProfileForm {
            name: " 田中太郎 ".to_string(),
            email: "taro@tech.example.com".to_string(),
        }
        .to_patch()
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("田中太郎"));
    }
}
