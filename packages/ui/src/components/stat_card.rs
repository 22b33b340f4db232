use dioxus::prelude::*;

#[component]
pub fn StatCard(
    title: String,
    value: String,
    #[props(default)] change: Option<String>,
    #[props(default)] negative: bool,
) -> Element {
    rsx! {
        div {
            class: "stat-card",
            p { class: "stat-card-title", "{title}" }
            p { class: "stat-card-value", "{value}" }
            if let Some(change) = change {
                p {
                    class: if negative { "stat-card-change negative" } else { "stat-card-change" },
                    "{change}"
                }
            }
        }
    }
}
