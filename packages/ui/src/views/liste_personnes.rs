use api::Personne;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::dates::{calculate_age, format_date, max_date};
use crate::prompt::BrowserPrompt;
use crate::state::ListePersonnesState;
use crate::views::ModalOverlay;
use crate::{log_activity, use_activity_log, use_personne_service, Activity, LogLevel};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Table of every personne, with delete, search-by-id then edit, and name search.
#[component]
pub fn ListePersonnesView(
    /// Called by the "add" button.
    on_navigate_add: EventHandler<()>,
) -> Element {
    let service = use_personne_service();
    let mut state = use_signal(ListePersonnesState::default);
    let mut activity_log = use_activity_log();

    // Writes made anywhere through the service are pushed into this watch.
    let watch_service = service.clone();
    let _watcher = use_resource(move || {
        let service = watch_service.clone();
        async move {
            state.write().begin_load();
            let mut watch = service.list_all();
            while let Some(result) = watch.next().await {
                if let Err(e) = &result {
                    let message = format!("Erreur lors du chargement des personnes: {e}");
                    log_activity(
                        &mut activity_log,
                        Activity::Chargement,
                        LogLevel::Error,
                        &message,
                    );
                }
                state.write().apply_list(result);
            }
        }
    });

    let name_service = service.clone();
    let handle_name_search = use_callback(move |_: ()| {
        let Some(query) = state.write().begin_name_search() else {
            return;
        };
        let service = name_service.clone();
        spawn(async move {
            let result = service.search_by_name(&query).await;
            state.write().finish_name_search(result);
        });
    });

    let delete_service = service.clone();
    let handle_delete = use_callback(move |personne: Personne| {
        let Some(id) = state.write().begin_delete(&personne, &BrowserPrompt) else {
            return;
        };
        let service = delete_service.clone();
        spawn(async move {
            let result = service.remove(&id).await;
            if state.write().finish_delete(result) {
                log_activity(
                    &mut activity_log,
                    Activity::Suppression,
                    LogLevel::Success,
                    &format!("{} supprimé(e)", personne.full_name()),
                );
                if state.peek().name_results.is_some() {
                    handle_name_search.call(());
                }
            } else if let Some(err) = state.peek().error.clone() {
                log_activity(&mut activity_log, Activity::Suppression, LogLevel::Error, &err);
            }
        });
    });

    let search_service = service.clone();
    let handle_search = use_callback(move |_: ()| {
        let Some(id) = state.write().begin_search() else {
            return;
        };
        let service = search_service.clone();
        spawn(async move {
            let result = service.get_by_id(&id).await;
            state.write().finish_search(result);
            if let Some(err) = state.peek().search_error.clone() {
                log_activity(&mut activity_log, Activity::Recherche, LogLevel::Warning, &err);
            }
        });
    });

    let edit_service = service.clone();
    let handle_submit_edit = use_callback(move |_: ()| {
        let Some(request) = state.write().begin_submit_edit(&BrowserPrompt) else {
            return;
        };
        let service = edit_service.clone();
        spawn(async move {
            let result = service.update(&request.id, &request.input).await;
            if state.write().finish_submit_edit(result) {
                log_activity(
                    &mut activity_log,
                    Activity::Modification,
                    LogLevel::Success,
                    &format!("Personne {} modifiée", request.id),
                );
                if state.peek().name_results.is_some() {
                    handle_name_search.call(());
                }
            } else if let Some(err) = state.peek().error.clone() {
                log_activity(&mut activity_log, Activity::Modification, LogLevel::Error, &err);
            }
        });
    });

    let snapshot = state();
    let records = snapshot.visible_records().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            div {
                class: "view-header",
                h1 { class: "view-title", "Liste des personnes" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| on_navigate_add.call(()),
                    "Ajouter une personne"
                }
            }

            div {
                class: "view-toolbar",

                form {
                    class: "search-bar",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        handle_search.call(());
                    },
                    Label { html_for: "search-id", "Modifier par ID" }
                    Input {
                        id: "search-id",
                        r#type: "text",
                        placeholder: "ID de la personne",
                        value: snapshot.search_id.clone(),
                        oninput: move |evt: FormEvent| {
                            let mut s = state.write();
                            s.search_id = evt.value();
                            s.search_error = None;
                        },
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        r#type: "submit",
                        disabled: snapshot.search_loading,
                        if snapshot.search_loading { "Recherche..." } else { "Rechercher" }
                    }
                }

                form {
                    class: "search-bar",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        handle_name_search.call(());
                    },
                    Label { html_for: "search-name", "Filtrer par nom" }
                    Input {
                        id: "search-name",
                        r#type: "search",
                        placeholder: "Nom ou partie du nom",
                        value: snapshot.name_query.clone(),
                        oninput: move |evt: FormEvent| state.write().name_query = evt.value(),
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        r#type: "submit",
                        disabled: snapshot.name_loading,
                        "Filtrer"
                    }
                    if snapshot.name_results.is_some() {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| state.write().clear_name_search(),
                            "Effacer"
                        }
                    }
                }
            }

            if let Some(err) = snapshot.search_error.clone() {
                div { class: "view-error", "{err}" }
            }
            if let Some(err) = snapshot.error.clone() {
                div { class: "view-error", "{err}" }
            }

            if snapshot.loading {
                div { class: "view-placeholder", "Chargement..." }
            } else if records.is_empty() {
                div { class: "view-placeholder", "Aucune personne trouvée." }
            } else {
                table {
                    class: "personnes-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Nom" }
                            th { "Prénom" }
                            th { "Date de naissance" }
                            th { "Adresse" }
                            th { "Téléphone" }
                            th { "" }
                        }
                    }
                    tbody {
                        for personne in records {
                            PersonneRow {
                                key: "{personne.id.clone().unwrap_or_default()}",
                                personne: personne.clone(),
                                on_edit: move |p: Personne| state.write().open_edit(p),
                                on_delete: handle_delete,
                            }
                        }
                    }
                }
            }
        }

        if snapshot.modal_open {
            ModalOverlay {
                title: "Modifier une personne",
                on_close: move |_| state.write().close_edit(),
                EditPersonneForm { state, on_submit: handle_submit_edit }
            }
        }
    }
}

#[component]
fn PersonneRow(
    personne: Personne,
    on_edit: EventHandler<Personne>,
    on_delete: EventHandler<Personne>,
) -> Element {
    let birth_date = personne.birth_date.clone().unwrap_or_default();
    let age = calculate_age(&birth_date);
    let edited = personne.clone();
    let deleted = personne.clone();

    rsx! {
        tr {
            td { class: "view-muted", {personne.id.clone().unwrap_or_default()} }
            td { "{personne.last_name}" }
            td { "{personne.first_name}" }
            td {
                {format_date(&birth_date)}
                if let Some(age) = age {
                    span { class: "view-muted", " ({age} ans)" }
                }
            }
            td { {personne.address.clone().unwrap_or_default()} }
            td { {personne.phone.clone().unwrap_or_default()} }
            td {
                class: "row-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_edit.call(edited.clone()),
                    "Modifier"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| on_delete.call(deleted.clone()),
                    "Supprimer"
                }
            }
        }
    }
}

#[component]
fn EditPersonneForm(state: Signal<ListePersonnesState>, on_submit: EventHandler<()>) -> Element {
    let mut state = state;
    let snapshot = state();
    let form = snapshot.edit_form.clone();

    rsx! {
        form {
            class: "modal-body",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            div {
                class: "form-field",
                Label { html_for: "edit-prenom", "Prénom *" }
                Input {
                    id: "edit-prenom",
                    r#type: "text",
                    value: form.prenom,
                    oninput: move |evt: FormEvent| state.write().edit_form.prenom = evt.value(),
                }
            }
            div {
                class: "form-field",
                Label { html_for: "edit-nom", "Nom *" }
                Input {
                    id: "edit-nom",
                    r#type: "text",
                    value: form.nom,
                    oninput: move |evt: FormEvent| state.write().edit_form.nom = evt.value(),
                }
            }
            div {
                class: "form-field",
                Label { html_for: "edit-date", "Date de naissance" }
                Input {
                    id: "edit-date",
                    r#type: "date",
                    max: max_date(),
                    value: form.date_naissance,
                    oninput: move |evt: FormEvent| {
                        state.write().edit_form.date_naissance = evt.value();
                    },
                }
            }
            div {
                class: "form-field",
                Label { html_for: "edit-adresse", "Adresse" }
                Input {
                    id: "edit-adresse",
                    r#type: "text",
                    value: form.adresse,
                    oninput: move |evt: FormEvent| state.write().edit_form.adresse = evt.value(),
                }
            }
            div {
                class: "form-field",
                Label { html_for: "edit-telephone", "Téléphone" }
                Input {
                    id: "edit-telephone",
                    r#type: "tel",
                    value: form.telephone,
                    oninput: move |evt: FormEvent| state.write().edit_form.telephone = evt.value(),
                }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: snapshot.submitting,
                    if snapshot.submitting { "Enregistrement..." } else { "Enregistrer" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    r#type: "button",
                    onclick: move |_| state.write().close_edit(),
                    "Annuler"
                }
            }
        }
    }
}
