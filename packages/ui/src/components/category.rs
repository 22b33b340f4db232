use api::models::Category;
use api::CategoryFilter;
use dioxus::prelude::*;

#[component]
pub fn CategoryBadge(category: Category) -> Element {
    rsx! {
        span {
            class: "category-badge",
            style: "--category-color: {category.color()}",
            span { class: "category-emoji", "{category.emoji()}" }
            span { "{category.label()}" }
        }
    }
}

/// Tab strip for choosing a category filter. `counts` follow
/// [`CategoryFilter::options`] order.
#[component]
pub fn CategoryTabs(
    selected: CategoryFilter,
    counts: Vec<usize>,
    on_select: EventHandler<CategoryFilter>,
) -> Element {
    rsx! {
        div {
            class: "category-tabs",
            for (i, choice) in CategoryFilter::options().into_iter().enumerate() {
                button {
                    key: "{choice.as_str()}",
                    class: if choice == selected { "category-tab active" } else { "category-tab" },
                    onclick: move |_| on_select.call(choice),
                    "{choice.label()}"
                    if let Some(count) = counts.get(i) {
                        span { class: "category-tab-count", "{count}" }
                    }
                }
            }
        }
    }
}
