//! Login page.

use api::validation::{FieldErrors, LoginForm, Validate};
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind};
use ui::{claim_submit, sign_in, use_auth, use_source};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let source = use_source();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // Already signed in
    use_effect(move || {
        if auth().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = LoginForm {
            email: email(),
            password: password(),
        };
        if let Err(errors) = form.validate() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(FieldErrors::new());

        if !claim_submit(&mut submitting.write()) {
            return;
        }
        let source = source.clone();
        spawn(async move {
            error.set(None);
            match sign_in(auth, &source, &form.email, &form.password).await {
                Ok(()) => {
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::error!("Login failed: {e}");
                    error.set(Some(
                        "メールアドレスまたはパスワードが正しくありません".to_string(),
                    ));
                }
            }
            submitting.set(false);
        });
    };

    let errors = field_errors();

    rsx! {
        div {
            class: "login-container",
            div {
                class: "login-card",
                h1 { class: "login-title", "Posifeed" }
                p { class: "login-subtitle", "アカウントにログインしてください" }

                Alert { kind: AlertKind::Error, message: error() }

                form {
                    class: "form",
                    onsubmit: onsubmit,

                    div {
                        class: "form-field",
                        label { r#for: "email", "メールアドレス" }
                        input {
                            id: "email",
                            r#type: "email",
                            autocomplete: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                        if let Some(message) = errors.get("email") {
                            p { class: "field-error", "{message}" }
                        }
                    }

                    div {
                        class: "form-field",
                        label { r#for: "password", "パスワード" }
                        input {
                            id: "password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                        if let Some(message) = errors.get("password") {
                            p { class: "field-error", "{message}" }
                        }
                    }

                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "ログイン中..." } else { "ログイン" }
                    }
                }
            }
        }
    }
}
