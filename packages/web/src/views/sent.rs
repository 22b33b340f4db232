use api::filter::category_counts;
use api::models::Feedback;
use api::{CategoryFilter, DataSource, FeedbackFilter, TimeWindow};
use chrono::Utc;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, CategoryTabs, FeedbackCard, Spinner};
use ui::format::relative_date;
use ui::use_source;

#[component]
pub fn SentFeedback() -> Element {
    let source = use_source();

    let mut feedbacks = use_signal(Vec::<Feedback>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut category = use_signal(CategoryFilter::default);
    let mut window = use_signal(TimeWindow::default);

    let _loader = use_resource(move || {
        let source = source.clone();
        async move {
            match source.sent_feedback().await {
                Ok(items) => feedbacks.set(items),
                Err(e) => {
                    tracing::error!("Failed to load sent feedback: {e}");
                    error.set(Some("送信フィードバックの取得に失敗しました".to_string()));
                }
            }
            loading.set(false);
        }
    });

    let visible = use_memo(move || {
        FeedbackFilter::new(category(), window()).apply(&feedbacks.read(), Utc::now())
    });

    let counts = use_memo(move || {
        let items = feedbacks.read();
        let by_category = category_counts(&items);
        CategoryFilter::options()
            .into_iter()
            .map(|choice| match choice {
                CategoryFilter::All => items.len(),
                CategoryFilter::Only(c) => by_category.get(&c).copied().unwrap_or(0),
            })
            .collect::<Vec<_>>()
    });

    if loading() {
        return rsx! {
            Spinner {}
        };
    }

    let now = Utc::now();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "送信履歴" }
                select {
                    class: "window-select",
                    value: "{window().as_str()}",
                    onchange: move |evt| window.set(evt.value().parse().unwrap_or_default()),
                    for choice in TimeWindow::OPTIONS {
                        option {
                            key: "{choice.as_str()}",
                            value: "{choice.as_str()}",
                            selected: window() == choice,
                            "{choice.label()}"
                        }
                    }
                }
            }

            Alert { kind: AlertKind::Error, message: error() }

            CategoryTabs {
                selected: category(),
                counts: counts(),
                on_select: move |choice| category.set(choice),
            }

            if visible.read().is_empty() {
                p { class: "empty", "条件に一致するフィードバックはありません" }
            }

            div {
                class: "feedback-list",
                for feedback in visible() {
                    FeedbackCard {
                        key: "{feedback.id}",
                        counterpart: format!("To: {}", feedback.recipient_label()),
                        when: relative_date(feedback.created_at, now),
                        feedback: feedback.clone(),
                    }
                }
            }
        }
    }
}
