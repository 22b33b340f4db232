use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    AppLayout, Dashboard, Login, ReceivedFeedback, SendFeedback, SentFeedback, Settings,
    Statistics, Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(AppLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/send")]
        SendFeedback {},
        #[route("/received")]
        ReceivedFeedback {},
        #[route("/sent")]
        SentFeedback {},
        #[route("/users")]
        Users {},
        #[route("/stats")]
        Statistics {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Unknown paths go back to the dashboard.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Dashboard {});
    });
    tracing::debug!("No route for /{}", segments.join("/"));
    rsx! {}
}
