use dioxus::prelude::*;

use ui::components::Spinner;
use ui::{use_auth, AppSidebar, NavItem};

use crate::Route;

fn route_for(item: NavItem) -> Route {
    match item {
        NavItem::Dashboard => Route::Dashboard {},
        NavItem::Received => Route::ReceivedFeedback {},
        NavItem::Sent => Route::SentFeedback {},
        NavItem::Users => Route::Users {},
        NavItem::Statistics => Route::Statistics {},
        NavItem::Settings => Route::Settings {},
    }
}

fn nav_item(route: &Route) -> Option<NavItem> {
    match route {
        Route::Dashboard {} => Some(NavItem::Dashboard),
        Route::ReceivedFeedback {} => Some(NavItem::Received),
        Route::SentFeedback {} => Some(NavItem::Sent),
        Route::Users {} => Some(NavItem::Users),
        Route::Statistics {} => Some(NavItem::Statistics),
        Route::Settings {} => Some(NavItem::Settings),
        _ => None,
    }
}

/// Shell for every signed-in page. Visitors without a session are sent to
/// the login page once the startup check has finished.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    use_effect(move || {
        let state = auth();
        if !state.is_loading() && !state.is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    let state = auth();
    if state.is_loading() {
        return rsx! {
            Spinner {}
        };
    }
    let Some(user) = state.user().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "app-shell",
            AppSidebar {
                user: Some(user),
                active: nav_item(&route),
                on_navigate: move |item| {
                    nav.push(route_for(item));
                },
            }
            main {
                class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
