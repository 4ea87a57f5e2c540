use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Ajouter() -> Element {
    let nav = use_navigator();

    rsx! {
        ui::views::AjouterPersonneView {
            on_done: move |_| {
                nav.push(Route::Personnes {});
            },
            on_cancel: move |_| {
                nav.push(Route::Personnes {});
            },
        }
    }
}
