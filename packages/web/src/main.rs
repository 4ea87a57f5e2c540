use dioxus::prelude::*;

use views::{Ajouter, AppLayout, Personnes};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(AppLayout)]
        #[route("/personnes")]
        Personnes {},
        #[route("/ajouter")]
        Ajouter {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    let config = api::ClientConfig::from_env();
    tracing::info!("Starting personnes client, endpoint {}", config.endpoint);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ui::ServiceProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/personnes`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Personnes {});
    rsx! {}
}

/// Unknown paths land on the list.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::warn!("Unknown route /{}, redirecting", segments.join("/"));
    nav.replace(Route::Personnes {});
    rsx! {}
}
