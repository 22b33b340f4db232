use api::DataSource;
use chrono::Utc;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, CategoryBadge, Spinner, StatCard};
use ui::format::relative_time;
use ui::{use_auth, use_source};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let source = use_source();
    let nav = use_navigator();

    let summary = use_resource(move || {
        let source = source.clone();
        let user = auth().user().cloned();
        async move {
            let user = user?;
            match source.dashboard(&user).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::error!("Failed to load dashboard: {e}");
                    None
                }
            }
        }
    });

    let now = Utc::now();

    let content = match &*summary.read_unchecked() {
        None => rsx! { Spinner {} },
        Some(None) => rsx! {
            Alert {
                kind: AlertKind::Error,
                message: "ダッシュボードの取得に失敗しました".to_string(),
            }
        },
        Some(Some(summary)) => rsx! {
            div {
                class: "stat-grid",
                StatCard {
                    title: "今週の受信フィードバック",
                    value: summary.received_this_week.value.to_string(),
                    change: summary.received_this_week.percent_label(),
                    negative: summary.received_this_week.change < 0,
                }
                StatCard {
                    title: "今週の送信フィードバック",
                    value: summary.sent_this_week.value.to_string(),
                    change: summary.sent_this_week.percent_label(),
                    negative: summary.sent_this_week.change < 0,
                }
                StatCard {
                    title: "ポジティビティスコア",
                    value: summary.positivity.value.to_string(),
                    change: summary.positivity.points_label(),
                    negative: summary.positivity.change < 0,
                }
                StatCard {
                    title: "組織メンバー",
                    value: summary.members.value.to_string(),
                    change: summary.members.count_label(),
                    negative: summary.members.change < 0,
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "最近のフィードバック" }
                if summary.recent.is_empty() {
                    p { class: "empty", "まだフィードバックがありません" }
                }
                for feedback in summary.recent.iter() {
                    div {
                        key: "{feedback.id}",
                        class: "recent-item",
                        div {
                            class: "recent-item-header",
                            CategoryBadge { category: feedback.category }
                            span { class: "recent-item-time", "{relative_time(feedback.created_at, now)}" }
                        }
                        p { class: "recent-item-content", "{feedback.content}" }
                        p { class: "recent-item-sender", "{feedback.sender_label()}" }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "ダッシュボード" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| {
                        nav.push(Route::SendFeedback {});
                    },
                    "フィードバックを送る"
                }
            }

            {content}
        }
    }
}
