use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

/// Inline page banner. Renders nothing without a message.
#[component]
pub fn Alert(kind: AlertKind, message: Option<String>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    let class = match kind {
        AlertKind::Error => "alert alert-error",
        AlertKind::Success => "alert alert-success",
    };
    rsx! {
        div {
            class,
            role: "alert",
            "{message}"
        }
    }
}
