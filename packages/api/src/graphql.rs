//! GraphQL operation documents and the GraphQL-over-HTTP envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// A named GraphQL document together with the root field it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub root_field: &'static str,
    pub document: &'static str,
}

pub const LISTER_PERSONNES: Operation = Operation {
    name: "ListerPersonnes",
    root_field: "listerToutesPersonnes",
    document: r#"query ListerPersonnes {
  listerToutesPersonnes {
    id
    prenom
    nom
    adresse
    telephone
    dateNaissance
  }
}"#,
};

pub const AJOUTER_PERSONNE: Operation = Operation {
    name: "AjouterPersonne",
    root_field: "ajouterPersonne",
    document: r#"mutation AjouterPersonne($personne: PersonneInput!) {
  ajouterPersonne(personne: $personne) {
    id
    nom
    prenom
    dateNaissance
    adresse
    telephone
  }
}"#,
};

pub const RECHERCHER_PERSONNES: Operation = Operation {
    name: "RechercherPersonnes",
    root_field: "rechercherPersonnes",
    document: r#"query RechercherPersonnes($nom: String!) {
  rechercherPersonnes(nom: $nom) {
    id
    prenom
    nom
    adresse
    telephone
    dateNaissance
  }
}"#,
};

pub const RECHERCHER_PERSONNE_PAR_ID: Operation = Operation {
    name: "RechercherPersonneParId",
    root_field: "rechercherPersonneParId",
    document: r#"query RechercherPersonneParId($id: ID!) {
  rechercherPersonneParId(id: $id) {
    id
    prenom
    nom
    adresse
    telephone
    dateNaissance
  }
}"#,
};

pub const MODIFIER_PERSONNE: Operation = Operation {
    name: "ModifierPersonne",
    root_field: "modifierPersonne",
    document: r#"mutation ModifierPersonne($id: ID!, $personne: PersonneInput!) {
  modifierPersonne(id: $id, personne: $personne) {
    id
    prenom
    nom
    adresse
    telephone
    dateNaissance
  }
}"#,
};

pub const SUPPRIMER_PERSONNE: Operation = Operation {
    name: "SupprimerPersonne",
    root_field: "supprimerPersonne",
    document: r#"mutation SupprimerPersonne($id: ID!) {
  supprimerPersonne(id: $id)
}"#,
};

/// Request body sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn new(operation: &Operation, variables: Value) -> Self {
        Self {
            operation_name: operation.name,
            query: operation.document,
            variables,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Response body returned by the endpoint.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

impl GraphQlResponse {
    /// The `data` object, or the server errors if any were reported.
    ///
    /// Partial data alongside errors is treated as a failure.
    pub fn into_data(self) -> Result<Value, ApiError> {
        if !self.errors.is_empty() {
            return Err(ApiError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response has neither data nor errors".to_string()))
    }
}
