use api::models::NotificationSettings;
use api::validation::{FieldErrors, PasswordForm, ProfileForm};
use api::DataSource;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind};
use ui::{claim_submit, use_auth, use_source};

#[component]
pub fn Settings() -> Element {
    rsx! {
        div {
            class: "page page-narrow",
            h1 { class: "page-title", "設定" }
            ProfileSection {}
            PasswordSection {}
            NotificationSection {}
        }
    }
}

#[component]
fn ProfileSection() -> Element {
    let mut auth = use_auth();
    let source = use_source();

    let initial = auth().user().cloned();
    let mut name = use_signal(|| initial.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let mut email = use_signal(|| initial.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let mut field_errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = ProfileForm {
            name: name(),
            email: email(),
        };
        let patch = match form.to_patch() {
            Ok(patch) => patch,
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
            match source.update_profile(&patch).await {
                Ok(_) => {
                    auth.write().update_user(patch);
                    success.set(Some("プロフィールを更新しました".to_string()));
                }
                Err(e) => {
                    tracing::error!("Failed to update profile: {e}");
                    error.set(Some("プロフィールの更新に失敗しました".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    let errors = field_errors();

    rsx! {
        section {
            class: "panel settings-section",
            h2 { class: "panel-title", "プロフィール" }
            Alert { kind: AlertKind::Success, message: success() }
            Alert { kind: AlertKind::Error, message: error() }
            form {
                class: "form",
                onsubmit: onsubmit,
                div {
                    class: "form-field",
                    label { r#for: "profile-name", "名前" }
                    input {
                        id: "profile-name",
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                    if let Some(message) = errors.get("name") {
                        p { class: "field-error", "{message}" }
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "profile-email", "メールアドレス" }
                    input {
                        id: "profile-email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                    if let Some(message) = errors.get("email") {
                        p { class: "field-error", "{message}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "保存中..." } else { "保存" }
                }
            }
        }
    }
}

#[component]
fn PasswordSection() -> Element {
    let source = use_source();

    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);

    let mut field_errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = PasswordForm {
            current_password: current_password(),
            new_password: new_password(),
            confirm_password: confirm_password(),
        };
        let change = match form.to_change() {
            Ok(change) => change,
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
            match source.change_password(&change).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    success.set(Some("パスワードを変更しました".to_string()));
                }
                Err(e) => {
                    tracing::error!("Failed to change password: {e}");
                    error.set(Some("パスワードの変更に失敗しました".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    let errors = field_errors();

    rsx! {
        section {
            class: "panel settings-section",
            h2 { class: "panel-title", "パスワード変更" }
            Alert { kind: AlertKind::Success, message: success() }
            Alert { kind: AlertKind::Error, message: error() }
            form {
                class: "form",
                onsubmit: onsubmit,
                div {
                    class: "form-field",
                    label { r#for: "current-password", "現在のパスワード" }
                    input {
                        id: "current-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{current_password}",
                        oninput: move |evt| current_password.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "new-password", "新しいパスワード" }
                    input {
                        id: "new-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{new_password}",
                        oninput: move |evt| new_password.set(evt.value()),
                    }
                    if let Some(message) = errors.get("new_password") {
                        p { class: "field-error", "{message}" }
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "confirm-password", "新しいパスワード（確認）" }
                    input {
                        id: "confirm-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{confirm_password}",
                        oninput: move |evt| confirm_password.set(evt.value()),
                    }
                    if let Some(message) = errors.get("confirm_password") {
                        p { class: "field-error", "{message}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "変更中..." } else { "パスワードを変更" }
                }
            }
        }
    }
}

#[component]
fn NotificationSection() -> Element {
    let source = use_source();

    let mut settings = use_signal(NotificationSettings::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let save = move |_| {
        if !claim_submit(&mut submitting.write()) {
            return;
        }
        let current = settings();
        let source = source.clone();
        spawn(async move {
            error.set(None);
            success.set(None);
            match source.update_notifications(&current).await {
                Ok(()) => success.set(Some("通知設定を更新しました".to_string())),
                Err(e) => {
                    tracing::error!("Failed to update notifications: {e}");
                    error.set(Some("通知設定の更新に失敗しました".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    let current = settings();

    rsx! {
        section {
            class: "panel settings-section",
            h2 { class: "panel-title", "通知設定" }
            Alert { kind: AlertKind::Success, message: success() }
            Alert { kind: AlertKind::Error, message: error() }
            div {
                class: "form",
                Toggle {
                    label: "メール通知",
                    checked: current.email_notifications,
                    onchange: move |on| settings.write().email_notifications = on,
                }
                Toggle {
                    label: "フィードバック受信時",
                    checked: current.feedback_received,
                    onchange: move |on| settings.write().feedback_received = on,
                }
                Toggle {
                    label: "フィードバック既読時",
                    checked: current.feedback_read,
                    onchange: move |on| settings.write().feedback_read = on,
                }
                Toggle {
                    label: "週次レポート",
                    checked: current.weekly_report,
                    onchange: move |on| settings.write().weekly_report = on,
                }
                Toggle {
                    label: "月次レポート",
                    checked: current.monthly_report,
                    onchange: move |on| settings.write().monthly_report = on,
                }
                button {
                    class: "btn btn-primary",
                    disabled: submitting(),
                    onclick: save,
                    if submitting() { "保存中..." } else { "通知設定を保存" }
                }
            }
        }
    }
}

#[component]
fn Toggle(label: String, checked: bool, onchange: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "form-checkbox",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |evt| onchange.call(evt.checked()),
            }
            "{label}"
        }
    }
}
