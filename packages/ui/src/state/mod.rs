//! View state machines, kept free of Dioxus types so they can be tested directly.

mod ajout;
mod liste;

pub use ajout::{is_valid_phone, AjoutPersonneForm, Field, FieldError, FormStatus};
pub use liste::{EditFormData, EditRequest, ListePersonnesState};
