//! # Personne model
//!
//! Two representations of a person record:
//!
//! ## [`Personne`]
//!
//! A record as returned by the server. `id` is assigned by the server and is only
//! present once the record has been persisted. Field names follow Rust conventions;
//! serde renames map them to the French schema (`nom`, `prenom`, `adresse`,
//! `telephone`, `dateNaissance`). Unknown fields such as `__typename` are ignored
//! when deserializing.
//!
//! ## [`PersonneInput`]
//!
//! The payload for `ajouterPersonne` and `modifierPersonne`. It has no `id` field, so
//! an identifier or transport metadata can never end up inside an input object.
//! [`PersonneInput::cleaned`] applies the normalisation used before an update.

use serde::{Deserialize, Serialize};

/// A person record as stored by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personne {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    /// ISO date, e.g. "1990-01-15".
    #[serde(rename = "dateNaissance", default)]
    pub birth_date: Option<String>,
}

impl Personne {
    /// "Prénom Nom", as shown in confirmations.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Input object for create and update mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonneInput {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "dateNaissance", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
}

impl PersonneInput {
    /// Trimmed copy with every optional text field present.
    ///
    /// Missing or blank `adresse` and `telephone` become `""`, which is what the update
    /// mutation sends. A blank `dateNaissance` becomes `None`.
    pub fn cleaned(&self) -> Self {
        fn text(value: &Option<String>) -> Option<String> {
            Some(value.as_deref().map(str::trim).unwrap_or_default().to_string())
        }

        Self {
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            // The `Date` scalar has no empty value.
            birth_date: self
                .birth_date
                .as_deref()
                .map(str::trim)
                .filter(|date| !date.is_empty())
                .map(str::to_string),
            address: text(&self.address),
            phone: text(&self.phone),
        }
    }
}

impl From<&Personne> for PersonneInput {
    fn from(personne: &Personne) -> Self {
        Self {
            last_name: personne.last_name.clone(),
            first_name: personne.first_name.clone(),
            birth_date: personne.birth_date.clone(),
            address: personne.address.clone(),
            phone: personne.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_ignores_typename() {
        let personne: Personne = serde_json::from_value(json!({
            "__typename": "Personne",
            "id": "7",
            "nom": "Diop",
            "prenom": "Awa",
            "adresse": null,
            "telephone": "77 123 45 67"
        }))
        .unwrap();

        assert_eq!(personne.id.as_deref(), Some("7"));
        assert_eq!(personne.last_name, "Diop");
        assert_eq!(personne.phone.as_deref(), Some("77 123 45 67"));
        assert!(personne.address.is_none());
        assert!(personne.birth_date.is_none());
        assert_eq!(personne.full_name(), "Awa Diop");
    }

    #[test]
    fn test_input_never_carries_id() {
        let personne = Personne {
            id: Some("3".to_string()),
            last_name: "Ndiaye".to_string(),
            first_name: "Moussa".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(PersonneInput::from(&personne)).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("id"));
        assert_eq!(object["nom"], "Ndiaye");
        assert_eq!(object["dateNaissance"], serde_json::Value::Null);
    }

    #[test]
    fn test_cleaned_trims_and_fills_optionals() {
        let input = PersonneInput {
            last_name: "  Fall ".to_string(),
            first_name: " Binta".to_string(),
            birth_date: None,
            address: Some("  Dakar  ".to_string()),
            phone: Some("   ".to_string()),
        };

        let cleaned = input.cleaned();
        assert_eq!(cleaned.last_name, "Fall");
        assert_eq!(cleaned.first_name, "Binta");
        assert_eq!(cleaned.birth_date, None);
        assert_eq!(cleaned.address.as_deref(), Some("Dakar"));
        assert_eq!(cleaned.phone.as_deref(), Some(""));
    }
}
