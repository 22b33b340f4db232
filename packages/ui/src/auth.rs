//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the session for everything below it. It provides two
//! contexts: a `Signal<AuthState>` and the [`Source`] pages load data from.

use api::{ApiError, AuthState, Source};
use dioxus::prelude::*;

use crate::storage::make_source;

/// Current authentication state.
///
/// Panics when called outside an [`AuthProvider`].
pub fn use_auth() -> Signal<AuthState> {
    try_use_context::<Signal<AuthState>>()
        .expect("use_auth must be used within an AuthProvider")
}

/// The data source shared by the app.
///
/// Panics when called outside an [`AuthProvider`].
pub fn use_source() -> Source {
    try_use_context::<Source>().expect("use_source must be used within an AuthProvider")
}

/// Provider component that restores the session on mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let source = use_context_provider(make_source);
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    use_hook(move || {
        spawn(async move {
            if !auth_state.write().begin() {
                return;
            }
            let user = api::auth::restore_session(&source).await;
            match &user {
                Some(user) => tracing::info!("Restored session for user {}", user.id),
                None => tracing::debug!("No session to restore"),
            }
            auth_state.write().resolve(user);
        });
    });

    rsx! {
        {children}
    }
}

/// Log in through `source` and publish the user.
pub async fn sign_in(
    mut auth: Signal<AuthState>,
    source: &Source,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let user = api::auth::login(source, email, password).await?;
    auth.write().sign_in(user);
    Ok(())
}

/// Log out through `source`. Always ends the local session.
pub async fn sign_out(mut auth: Signal<AuthState>, source: &Source) {
    api::auth::logout(source).await;
    auth.write().sign_out();
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "ログアウト".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let source = use_source();

    let onclick = move |_| {
        let source = source.clone();
        async move {
            sign_out(auth, &source).await;
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
