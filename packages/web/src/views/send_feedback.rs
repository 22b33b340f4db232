use api::models::{Category, User};
use api::validation::{FeedbackForm, FieldErrors, CONTENT_MAX_CHARS};
use api::DataSource;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind};
use ui::{claim_submit, use_auth, use_source};

#[component]
pub fn SendFeedback() -> Element {
    let auth = use_auth();
    let source = use_source();

    let mut recipients = use_signal(Vec::<User>::new);
    let mut recipient_id = use_signal(String::new);
    let mut category = use_signal(|| Option::<Category>::None);
    let mut content = use_signal(String::new);
    let mut is_anonymous = use_signal(|| false);

    let mut field_errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let load_source = source.clone();
    let _loader = use_resource(move || {
        let source = load_source.clone();
        let me = auth().user().map(|u| u.id);
        async move {
            match source.users().await {
                Ok(users) => {
                    recipients.set(
                        users
                            .into_iter()
                            .filter(|u| u.active && Some(u.id) != me)
                            .collect(),
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to load users: {e}");
                    error.set(Some("ユーザー一覧の取得に失敗しました".to_string()));
                }
            }
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = FeedbackForm {
            recipient_id: recipient_id(),
            category: category(),
            content: content(),
            is_anonymous: is_anonymous(),
        };
        let data = match form.to_data() {
            Ok(data) => data,
            Err(errors) => {
                field_errors.set(errors);
                return;
            }
        };
        field_errors.set(FieldErrors::new());

        if !claim_submit(&mut submitting.write()) {
            return;
        }
        let source = source.clone();
        spawn(async move {
            error.set(None);
            success.set(None);
            match source.send_feedback(&data).await {
                Ok(_) => {
                    let name = recipients
                        .read()
                        .iter()
                        .find(|u| u.id.to_string() == data.recipient_id)
                        .map(|u| u.name.clone())
                        .unwrap_or_default();
                    success.set(Some(format!(
                        "{name}さんに「{}」フィードバックを送信しました！",
                        data.category.label()
                    )));
                    recipient_id.set(String::new());
                    category.set(None);
                    content.set(String::new());
                    is_anonymous.set(false);
                }
                Err(e) => {
                    tracing::error!("Failed to send feedback: {e}");
                    error.set(Some("フィードバックの送信に失敗しました".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    let errors = field_errors();
    let length = content().chars().count();

    rsx! {
        div {
            class: "page page-narrow",
            h1 { class: "page-title", "フィードバック送信" }

            Alert { kind: AlertKind::Success, message: success() }
            Alert { kind: AlertKind::Error, message: error() }

            form {
                class: "form panel",
                onsubmit: onsubmit,

                div {
                    class: "form-field",
                    label { r#for: "recipient", "送信先" }
                    select {
                        id: "recipient",
                        value: "{recipient_id}",
                        onchange: move |evt| recipient_id.set(evt.value()),
                        option { value: "", "送信先を選択してください" }
                        for user in recipients() {
                            option {
                                key: "{user.id}",
                                value: "{user.id}",
                                selected: recipient_id() == user.id.to_string(),
                                "{user.name}"
                            }
                        }
                    }
                    if let Some(message) = errors.get("recipient_id") {
                        p { class: "field-error", "{message}" }
                    }
                }

                div {
                    class: "form-field",
                    span { class: "form-label", "カテゴリ" }
                    div {
                        class: "category-picker",
                        for choice in Category::ALL {
                            button {
                                key: "{choice.as_str()}",
                                r#type: "button",
                                class: if category() == Some(choice) { "category-option active" } else { "category-option" },
                                onclick: move |_| category.set(Some(choice)),
                                span { class: "category-emoji", "{choice.emoji()}" }
                                span { class: "category-option-label", "{choice.label()}" }
                                span { class: "category-option-description", "{choice.description()}" }
                            }
                        }
                    }
                    if let Some(message) = errors.get("category") {
                        p { class: "field-error", "{message}" }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "content", "メッセージ" }
                    textarea {
                        id: "content",
                        rows: "5",
                        placeholder: "具体的なエピソードを添えて気持ちを伝えましょう",
                        value: "{content}",
                        oninput: move |evt| content.set(evt.value()),
                    }
                    p {
                        class: if length > CONTENT_MAX_CHARS { "char-count over" } else { "char-count" },
                        "{length}/{CONTENT_MAX_CHARS}"
                    }
                    if let Some(message) = errors.get("content") {
                        p { class: "field-error", "{message}" }
                    }
                }

                label {
                    class: "form-checkbox",
                    input {
                        r#type: "checkbox",
                        checked: is_anonymous(),
                        onchange: move |evt| is_anonymous.set(evt.checked()),
                    }
                    "匿名で送信する"
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "送信中..." } else { "フィードバックを送信" }
                }
            }
        }
    }
}
