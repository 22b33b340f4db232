use api::models::User;
use dioxus::prelude::*;

use crate::auth::LogoutButton;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

/// Entries of the main navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Received,
    Sent,
    Users,
    Statistics,
    Settings,
}

impl NavItem {
    pub const ALL: [NavItem; 6] = [
        NavItem::Dashboard,
        NavItem::Received,
        NavItem::Sent,
        NavItem::Users,
        NavItem::Statistics,
        NavItem::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "ダッシュボード",
            NavItem::Received => "受信フィードバック",
            NavItem::Sent => "送信履歴",
            NavItem::Users => "メンバー",
            NavItem::Statistics => "統計",
            NavItem::Settings => "設定",
        }
    }
}

#[component]
pub fn AppSidebar(
    user: Option<User>,
    active: Option<NavItem>,
    on_navigate: EventHandler<NavItem>,
) -> Element {
    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        div {
            class: "sidebar",

            div {
                class: "sidebar-logo",
                span { "Posifeed" }
            }

            nav {
                class: "sidebar-nav",
                for item in NavItem::ALL {
                    button {
                        key: "{item.label()}",
                        class: if active == Some(item) { "sidebar-nav-item active" } else { "sidebar-nav-item" },
                        onclick: move |_| on_navigate.call(item),
                        "{item.label()}"
                    }
                }
            }

            div {
                class: "sidebar-user",
                p {
                    class: "sidebar-user-name",
                    {user.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "ユーザー".to_string())}
                }
                p {
                    class: "sidebar-user-role",
                    if user.as_ref().is_some_and(|u| u.is_admin()) { "管理者" } else { "一般ユーザー" }
                }
                LogoutButton { class: "sidebar-logout" }
            }
        }
    }
}
