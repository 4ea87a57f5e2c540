use dioxus::prelude::*;
use ui::{ActivityLogPanel, ActivityLogToggle, Navbar};

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Personnes {}, active_class: "active", "Liste" }
            Link { to: Route::Ajouter {}, active_class: "active", "Ajouter" }
            ActivityLogToggle {}
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
        ActivityLogPanel {}
    }
}
