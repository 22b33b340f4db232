use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(default = "読み込み中...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-container",
            div { class: "spinner" }
            span { class: "spinner-label", "{label}" }
        }
    }
}
