use api::models::Feedback;
use dioxus::prelude::*;

use super::CategoryBadge;

/// One feedback in a list.
///
/// `counterpart` is the name shown in the header (the sender on the received
/// page, the recipient on the sent page) and `when` the already formatted
/// date.
#[component]
pub fn FeedbackCard(
    feedback: Feedback,
    counterpart: String,
    when: String,
    #[props(default)] on_open: EventHandler<u64>,
) -> Element {
    let id = feedback.id;
    let class = if feedback.is_read {
        "feedback-card"
    } else {
        "feedback-card unread"
    };

    rsx! {
        div {
            class,
            onclick: move |_| on_open.call(id),
            div {
                class: "feedback-card-header",
                CategoryBadge { category: feedback.category }
                span { class: "feedback-card-party", "{counterpart}" }
                if feedback.is_anonymous {
                    span { class: "feedback-card-flag", "匿名で送信" }
                }
                if !feedback.is_read {
                    span { class: "feedback-card-flag unread", "未読" }
                }
            }
            p { class: "feedback-card-content", "{feedback.content}" }
            div {
                class: "feedback-card-footer",
                span { "{when}" }
                if feedback.reactions_count > 0 {
                    span { class: "feedback-card-reactions", "❤ {feedback.reactions_count}" }
                }
            }
        }
    }
}
