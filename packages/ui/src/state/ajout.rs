//! State of the "add personne" form.
//!
//! `Idle → Submitting → Idle`. A successful submit hands control back to the view,
//! which navigates to the list; a failed one leaves an error message on the form.

use api::{ApiError, Personne, PersonneInput};

const MIN_NAME_LEN: usize = 2;

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nom,
    Prenom,
    DateNaissance,
    Adresse,
    Telephone,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Nom,
        Field::Prenom,
        Field::DateNaissance,
        Field::Adresse,
        Field::Telephone,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Nom => "Le nom",
            Field::Prenom => "Le prénom",
            Field::DateNaissance => "La date de naissance",
            Field::Adresse => "L'adresse",
            Field::Telephone => "Le téléphone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MinLength(usize),
    InvalidPhone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

/// Characters accepted in a phone number.
pub fn is_valid_phone(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')'))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AjoutPersonneForm {
    pub nom: String,
    pub prenom: String,
    pub date_naissance: String,
    pub adresse: String,
    pub telephone: String,
    touched: [bool; 5],
    pub status: FormStatus,
    pub error: Option<String>,
}

impl AjoutPersonneForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Nom => &self.nom,
            Field::Prenom => &self.prenom,
            Field::DateNaissance => &self.date_naissance,
            Field::Adresse => &self.adresse,
            Field::Telephone => &self.telephone,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Nom => &mut self.nom,
            Field::Prenom => &mut self.prenom,
            Field::DateNaissance => &mut self.date_naissance,
            Field::Adresse => &mut self.adresse,
            Field::Telephone => &mut self.telephone,
        };
        *slot = value;
    }

    /// Mark a field as interacted with, so its error becomes visible.
    pub fn touch(&mut self, field: Field) {
        self.touched[field as usize] = true;
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field as usize]
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn validate(&self, field: Field) -> Option<FieldError> {
        let value = self.value(field).trim();
        match field {
            Field::Nom | Field::Prenom => {
                if value.is_empty() {
                    Some(FieldError::Required)
                } else if value.chars().count() < MIN_NAME_LEN {
                    Some(FieldError::MinLength(MIN_NAME_LEN))
                } else {
                    None
                }
            }
            Field::Telephone if !value.is_empty() && !is_valid_phone(value) => {
                Some(FieldError::InvalidPhone)
            }
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|field| self.validate(*field).is_none())
    }

    /// Message to show under `field`: only for touched, invalid fields.
    pub fn field_error(&self, field: Field) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.validate(field).map(|error| match error {
            FieldError::Required => format!("{} est requis", field.label()),
            FieldError::MinLength(min) => {
                format!("{} doit contenir au moins {min} caractères", field.label())
            }
            FieldError::InvalidPhone => "Format de téléphone invalide".to_string(),
        })
    }

    /// Start a submission.
    ///
    /// Returns the input to send, or `None` when the form is invalid (every field is
    /// then marked touched) or a submission is already running.
    pub fn begin_submit(&mut self) -> Option<PersonneInput> {
        if self.is_submitting() {
            return None;
        }
        if !self.is_valid() {
            self.touched = [true; 5];
            return None;
        }

        self.status = FormStatus::Submitting;
        self.error = None;

        fn optional(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        Some(PersonneInput {
            last_name: self.nom.trim().to_string(),
            first_name: self.prenom.trim().to_string(),
            birth_date: optional(&self.date_naissance),
            address: optional(&self.adresse),
            phone: optional(&self.telephone),
        })
    }

    /// Apply the outcome of `add`. Returns `true` when the view should navigate away.
    pub fn finish_submit(&mut self, result: Result<Personne, ApiError>) -> bool {
        self.status = FormStatus::Idle;
        match result {
            Ok(personne) => {
                tracing::info!("Personne ajoutée: {:?}", personne.id);
                true
            }
            Err(e) => {
                tracing::error!("add failed: {e}");
                self.error = Some(format!("Erreur lors de l'ajout de la personne: {e}"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::graphql::AJOUTER_PERSONNE;
    use api::{MemoryBackend, PersonneService};

    fn filled(nom: &str, prenom: &str) -> AjoutPersonneForm {
        AjoutPersonneForm {
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_short_or_empty_names_are_rejected() {
        let cases = [
            ("", "Awa"),
            ("D", "Awa"),
            ("Diop", ""),
            ("Diop", "A"),
            ("  ", "Awa"),
            (" D ", "Awa"),
        ];
        for (nom, prenom) in cases {
            let mut form = filled(nom, prenom);
            assert!(form.begin_submit().is_none(), "{nom:?} {prenom:?}");
            assert_eq!(form.status, FormStatus::Idle);
            assert!(Field::ALL.iter().all(|f| form.is_touched(*f)));
        }
    }

    #[test]
    fn test_phone_charset() {
        assert!(is_valid_phone("+221 (77) 123-45-67"));
        assert!(!is_valid_phone("77 12a 45 67"));
        assert!(!is_valid_phone("77.123.45.67"));

        let mut form = filled("Diop", "Awa");
        form.telephone = "77#123".to_string();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.field_error(Field::Telephone).as_deref(),
            Some("Format de téléphone invalide")
        );

        form.telephone = String::new();
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_errors_only_show_once_touched() {
        let mut form = filled("", "A");
        assert_eq!(form.field_error(Field::Nom), None);

        form.touch(Field::Nom);
        form.touch(Field::Prenom);
        assert_eq!(form.field_error(Field::Nom).as_deref(), Some("Le nom est requis"));
        assert_eq!(
            form.field_error(Field::Prenom).as_deref(),
            Some("Le prénom doit contenir au moins 2 caractères")
        );
        assert_eq!(form.field_error(Field::Adresse), None);
    }

    #[test]
    fn test_submit_trims_and_nulls_empty_optionals() {
        let mut form = filled(" Diop ", " Awa");
        form.adresse = "   ".to_string();
        form.telephone = " 77 123 45 67 ".to_string();
        form.date_naissance = "1995-04-02".to_string();

        let input = form.begin_submit().unwrap();
        assert_eq!(input.last_name, "Diop");
        assert_eq!(input.first_name, "Awa");
        assert_eq!(input.address, None);
        assert_eq!(input.phone.as_deref(), Some("77 123 45 67"));
        assert_eq!(input.birth_date.as_deref(), Some("1995-04-02"));
        assert!(form.is_submitting());

        // A second click while submitting does nothing.
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_failure_returns_to_idle_with_message() {
        let mut form = filled("Diop", "Awa");
        form.begin_submit().unwrap();

        let navigate = form.finish_submit(Err(ApiError::Network("offline".to_string())));
        assert!(!navigate);
        assert_eq!(form.status, FormStatus::Idle);
        assert_eq!(
            form.error.as_deref(),
            Some("Erreur lors de l'ajout de la personne: network error: offline")
        );
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_service() {
        let service = PersonneService::new(MemoryBackend::new());
        let mut form = filled("D", "Awa");

        if let Some(input) = form.begin_submit() {
            let _ = service.add(&input).await;
        }
        assert!(service.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_add_shows_up_in_open_list() {
        let service = PersonneService::new(MemoryBackend::new());
        let mut watch = service.list_all();
        assert!(watch.next().await.unwrap().unwrap().is_empty());

        let mut form = filled("Diop", "Awa");
        let input = form.begin_submit().unwrap();
        let result = service.add(&input).await;
        assert!(form.finish_submit(result));

        let list = watch.next().await.unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].full_name(), "Awa Diop");
        assert_eq!(service.transport().call_count(&AJOUTER_PERSONNE), 1);
    }
}
