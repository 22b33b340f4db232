use api::models::{Category, OrganizationStatistics, RankedUser};
use api::{DataSource, TimeWindow};
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Spinner, StatCard};
use ui::format::format_number;
use ui::use_source;

#[component]
pub fn Statistics() -> Element {
    let source = use_source();
    let mut window = use_signal(|| TimeWindow::ThirtyDays);

    let stats = use_resource(move || {
        let source = source.clone();
        let window = window();
        async move { source.statistics(window).await }
    });

    let (stats, error) = match &*stats.read_unchecked() {
        None => {
            return rsx! {
                Spinner {}
            }
        }
        Some(Ok(stats)) => (stats.clone(), None),
        Some(Err(e)) => {
            tracing::error!("Failed to load statistics: {e}");
            (
                OrganizationStatistics::empty(),
                Some(format!("統計データの取得に失敗しました: {e}")),
            )
        }
    };

    let growth = stats.monthly_growth();
    let trend: Vec<(String, u32, u32)> = stats
        .feedback_trends
        .iter()
        .zip(stats.trend_heights())
        .map(|(day, height)| (day.date.format("%m/%d").to_string(), day.count, height))
        .collect();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "統計" }
                select {
                    class: "window-select",
                    onchange: move |evt| window.set(evt.value().parse().unwrap_or(TimeWindow::ThirtyDays)),
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

            Alert { kind: AlertKind::Error, message: error }

            div {
                class: "stat-grid",
                StatCard {
                    title: "総フィードバック数",
                    value: format_number(u64::from(stats.total_feedbacks)),
                }
                StatCard {
                    title: "アクティブユーザー",
                    value: format_number(u64::from(stats.total_users)),
                }
                StatCard {
                    title: "今月のフィードバック",
                    value: format_number(u64::from(stats.feedbacks_this_month)),
                    change: format!("{growth:+}% 前月比"),
                    negative: growth < 0,
                }
                StatCard {
                    title: "1日平均",
                    value: stats.daily_average().to_string(),
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "カテゴリ別フィードバック" }
                for category in Category::ALL {
                    CategoryBar {
                        key: "{category.as_str()}",
                        category,
                        count: stats.category_count(category),
                        percentage: stats.category_percentage(category),
                    }
                }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "フィードバック推移（過去14日間）" }
                div {
                    class: "trend-chart",
                    for (date, count, height) in trend {
                        div {
                            key: "{date}",
                            class: "trend-bar",
                            title: "{date}: {count}件",
                            style: "height: {height}%",
                        }
                    }
                }
            }

            div {
                class: "ranking-grid",
                Ranking { title: "送信数ランキング", users: stats.top_senders.clone() }
                Ranking { title: "受信数ランキング", users: stats.top_receivers.clone() }
            }

            div {
                class: "panel",
                h2 { class: "panel-title", "部署別統計" }
                for dept in stats.department_stats.iter() {
                    div {
                        key: "{dept.name}",
                        class: "department-row",
                        span { class: "department-name", "{dept.name}" }
                        div {
                            class: "bar",
                            div { class: "bar-fill", style: "width: {dept.percentage}%" }
                        }
                        span { class: "department-count", "{dept.count}件 ({dept.percentage}%)" }
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryBar(category: Category, count: u32, percentage: u32) -> Element {
    rsx! {
        div {
            class: "category-row",
            span { class: "category-row-label", "{category.emoji()} {category.label()}" }
            div {
                class: "bar",
                div {
                    class: "bar-fill",
                    style: "width: {percentage}%; background: {category.color()}",
                }
            }
            span { class: "category-row-count", "{count}件 ({percentage}%)" }
        }
    }
}

#[component]
fn Ranking(title: String, users: Vec<RankedUser>) -> Element {
    rsx! {
        div {
            class: "panel",
            h2 { class: "panel-title", "{title}" }
            ol {
                class: "ranking",
                for (rank, user) in users.iter().enumerate() {
                    li {
                        key: "{user.id}",
                        span { class: "ranking-position", "{rank + 1}" }
                        span { class: "ranking-name", "{user.name}" }
                        span { class: "ranking-count", "{user.count}件" }
                    }
                }
            }
        }
    }
}
