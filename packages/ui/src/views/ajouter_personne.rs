use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::dates::max_date;
use crate::state::{AjoutPersonneForm, Field};
use crate::{log_activity, use_activity_log, use_personne_service, Activity, LogLevel};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Creation form for a new personne.
#[component]
pub fn AjouterPersonneView(
    /// Called after a successful add.
    on_done: EventHandler<()>,
    /// Called by the "back" button.
    on_cancel: EventHandler<()>,
) -> Element {
    let service = use_personne_service();
    let mut form = use_signal(AjoutPersonneForm::default);
    let mut activity_log = use_activity_log();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(input) = form.write().begin_submit() else {
            return;
        };
        let service = service.clone();
        spawn(async move {
            let result = service.add(&input).await;
            if form.write().finish_submit(result) {
                log_activity(
                    &mut activity_log,
                    Activity::Ajout,
                    LogLevel::Success,
                    &format!("{} {} ajouté(e)", input.first_name, input.last_name),
                );
                on_done.call(());
            } else if let Some(err) = form.peek().error.clone() {
                log_activity(&mut activity_log, Activity::Ajout, LogLevel::Error, &err);
            }
        });
    };

    let submitting = form.read().is_submitting();
    let error = form.read().error.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-xl",

            h1 { class: "view-title", "Ajouter une personne" }

            if let Some(err) = error {
                div { class: "view-error", "{err}" }
            }

            form {
                class: "view-form",
                novalidate: true,
                onsubmit: handle_submit,

                FormField { form, field: Field::Nom, label: "Nom *", placeholder: "Diop" }
                FormField { form, field: Field::Prenom, label: "Prénom *", placeholder: "Awa" }
                FormField {
                    form,
                    field: Field::DateNaissance,
                    label: "Date de naissance",
                    input_type: "date",
                    max: max_date(),
                }
                FormField {
                    form,
                    field: Field::Adresse,
                    label: "Adresse",
                    placeholder: "Rue, ville",
                }
                FormField {
                    form,
                    field: Field::Telephone,
                    label: "Téléphone",
                    input_type: "tel",
                    placeholder: "+221 77 123 45 67",
                }

                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Ajout en cours..." } else { "Ajouter" }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Retour à la liste"
                    }
                }
            }
        }
    }
}

fn field_id(field: Field) -> &'static str {
    match field {
        Field::Nom => "nom",
        Field::Prenom => "prenom",
        Field::DateNaissance => "dateNaissance",
        Field::Adresse => "adresse",
        Field::Telephone => "telephone",
    }
}

/// One labelled input bound to a form field, with its validation message.
#[component]
fn FormField(
    form: Signal<AjoutPersonneForm>,
    field: Field,
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] max: String,
) -> Element {
    let mut form = form;
    let id = field_id(field);
    let value = form.read().value(field).to_string();
    let error = form.read().field_error(field);

    rsx! {
        div {
            class: "form-field",
            Label { html_for: "{id}", "{label}" }
            Input {
                id,
                r#type: input_type,
                placeholder,
                max,
                value,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| form.write().set(field, evt.value()),
                onblur: move |_| form.write().touch(field),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}
