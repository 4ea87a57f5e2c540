use dioxus::prelude::*;

use crate::activity_log::use_activity_log;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// History of record operations made during this session.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let snapshot = log();
    let entries = snapshot.visible_entries();
    let summary = snapshot.summary();
    let errors_only = snapshot.errors_only;

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                div {
                    span { "Opérations" }
                    span { class: "activity-log-summary", " {summary}" }
                }
                div {
                    class: "activity-log-header-actions",
                    button {
                        class: if errors_only { "active" } else { "" },
                        onclick: move |_| log.write().errors_only = !errors_only,
                        if errors_only { "Tout afficher" } else { "Échecs seulement" }
                    }
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Vider"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Fermer"
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if entries.is_empty() {
                    div {
                        class: "activity-log-entry info",
                        if errors_only { "Aucun échec" } else { "Aucune opération" }
                    }
                }
                for entry in entries {
                    div {
                        class: format!("activity-log-entry {}", entry.level.class()),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { class: "activity-log-kind", {entry.activity.label()} }
                        span { "{entry.message}" }
                    }
                }
            }
        }
    }
}

/// Navbar button opening the panel; shows the number of failed operations.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let failed = log().error_count();

    rsx! {
        button {
            class: if failed > 0 {
                "activity-log-toggle has-errors"
            } else {
                "activity-log-toggle"
            },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Journal des opérations",
            if failed > 0 {
                "Journal ({failed} échec(s))"
            } else {
                "Journal"
            }
        }
    }
}
