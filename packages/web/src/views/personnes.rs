use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Personnes() -> Element {
    let nav = use_navigator();

    rsx! {
        ui::views::ListePersonnesView {
            on_navigate_add: move |_| {
                nav.push(Route::Ajouter {});
            },
        }
    }
}
