use api::filter::{category_counts, filter_by_category};
use api::inbox::Inbox;
use api::{CategoryFilter, DataSource};
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, CategoryBadge, CategoryTabs, FeedbackCard, ModalOverlay, Spinner};
use ui::format::{format_datetime, relative_time};
use ui::use_source;

#[component]
pub fn ReceivedFeedback() -> Element {
    let source = use_source();

    let mut inbox = use_signal(Inbox::default);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut category = use_signal(CategoryFilter::default);

    let load_source = source.clone();
    let _loader = use_resource(move || {
        let source = load_source.clone();
        async move {
            match source.received_feedback().await {
                Ok(items) => inbox.set(Inbox::new(items)),
                Err(e) => {
                    tracing::error!("Failed to load received feedback: {e}");
                    error.set(Some("受信フィードバックの取得に失敗しました".to_string()));
                }
            }
            loading.set(false);
        }
    });

    let visible = use_memo(move || filter_by_category(inbox.read().items(), category()));

    let counts = use_memo(move || {
        let inbox = inbox.read();
        let by_category = category_counts(inbox.items());
        CategoryFilter::options()
            .into_iter()
            .map(|choice| match choice {
                CategoryFilter::All => inbox.items().len(),
                CategoryFilter::Only(c) => by_category.get(&c).copied().unwrap_or(0),
            })
            .collect::<Vec<_>>()
    });

    // Mark as read optimistically; the request is fire-and-forget.
    let open = use_callback(move |id: u64| {
        let Some(id) = inbox.write().open(id) else {
            return;
        };
        let source = source.clone();
        spawn(async move {
            if let Err(e) = source.mark_read(id).await {
                tracing::warn!("Failed to mark feedback {id} as read: {e}");
            }
        });
    });

    if loading() {
        return rsx! {
            Spinner {}
        };
    }

    let now = chrono::Utc::now();
    let unread = inbox.read().unread_count();
    let selected = inbox.read().selected().cloned();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "受信フィードバック" }
                if unread > 0 {
                    span { class: "unread-badge", "未読 {unread}件" }
                }
            }

            Alert { kind: AlertKind::Error, message: error() }

            CategoryTabs {
                selected: category(),
                counts: counts(),
                on_select: move |choice| category.set(choice),
            }

            if visible.read().is_empty() {
                p {
                    class: "empty",
                    if category() == CategoryFilter::All {
                        "まだフィードバックを受信していません"
                    } else {
                        "このカテゴリのフィードバックはありません"
                    }
                }
            }

            div {
                class: "feedback-list",
                for feedback in visible() {
                    FeedbackCard {
                        key: "{feedback.id}",
                        counterpart: feedback.sender_label().to_string(),
                        when: relative_time(feedback.created_at, now),
                        on_open: open,
                        feedback: feedback.clone(),
                    }
                }
            }
        }

        if let Some(feedback) = selected {
            ModalOverlay {
                on_close: move |_| inbox.write().close(),
                div {
                    class: "feedback-detail",
                    CategoryBadge { category: feedback.category }
                    p { class: "feedback-detail-sender", "From: {feedback.sender_label()}" }
                    p { class: "feedback-detail-content", "{feedback.content}" }
                    p { class: "feedback-detail-date", "{format_datetime(feedback.created_at)}" }
                }
            }
        }
    }
}
