use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::graphql::{GraphQlRequest, Operation};
use crate::models::{Personne, PersonneInput};
use crate::transport::Transport;

/// In-memory GraphQL backend for testing and offline runs.
///
/// Resolves the operations in [`crate::graphql`] the way the real server does:
/// sequential numeric ids, case-insensitive "contains" search on `nom`, `null` for
/// unknown ids, and `true` for every delete. Blank text fields are stored as `null`.
/// `dateNaissance` follows the server's `Date` scalar: `null` or a date written
/// `YYYY-MM-DD` or `DD/MM/YYYY`, stored as ISO. Anything else, `""` included, is
/// rejected with `Invalid date format`.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    records: BTreeMap<u64, Personne>,
    next_id: u64,
    calls: Vec<&'static str>,
    fail_next: Option<ApiError>,
}

impl State {
    fn store(&mut self, id: u64, input: PersonneInput) -> Result<Personne, ApiError> {
        let personne = Personne {
            id: Some(id.to_string()),
            birth_date: coerce_date(input.birth_date)?,
            last_name: input.last_name,
            first_name: input.first_name,
            address: non_blank(input.address),
            phone: non_blank(input.phone),
        };
        self.records.insert(id, personne.clone());
        Ok(personne)
    }

    fn insert(&mut self, input: PersonneInput) -> Result<Personne, ApiError> {
        let id = self.next_id + 1;
        let personne = self.store(id, input)?;
        self.next_id = id;
        Ok(personne)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

fn coerce_date(value: Option<String>) -> Result<Option<String>, ApiError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&raw, format).ok())
        .map(|date| Some(date.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| ApiError::GraphQl(vec![format!("Invalid date format: {raw}")]))
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with the given records, ids starting at 1.
    pub fn with_personnes(inputs: impl IntoIterator<Item = PersonneInput>) -> Self {
        let backend = Self::new();
        for input in inputs {
            if let Err(e) = backend.insert(input) {
                tracing::warn!("skipping seed record: {e}");
            }
        }
        backend
    }

    /// Store a record directly, bypassing the request log.
    pub fn insert(&self, input: PersonneInput) -> Result<Personne, ApiError> {
        self.state.lock().unwrap().insert(input)
    }

    /// Snapshot of every stored record in id order.
    pub fn personnes(&self) -> Vec<Personne> {
        self.state.lock().unwrap().records.values().cloned().collect()
    }

    /// Names of every operation executed so far, oldest first.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &Operation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|name| **name == operation.name)
            .count()
    }

    /// Make the next request fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }
}

fn variable<V: DeserializeOwned>(request: &GraphQlRequest, name: &str) -> Result<V, ApiError> {
    let value = request.variables.get(name).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| {
        ApiError::GraphQl(vec![format!("Variable '{name}' has an invalid value: {e}")])
    })
}

fn record_id(request: &GraphQlRequest) -> Result<u64, ApiError> {
    let raw: String = variable(request, "id")?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::GraphQl(vec![format!("Invalid id: {raw}")]))
}

impl Transport for MemoryBackend {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(request.operation_name);
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }

        let data = match request.operation_name {
            "ListerPersonnes" => {
                let all: Vec<&Personne> = state.records.values().collect();
                json!({ "listerToutesPersonnes": all })
            }
            "AjouterPersonne" => {
                let input: PersonneInput = variable(request, "personne")?;
                let created = state.insert(input)?;
                json!({ "ajouterPersonne": created })
            }
            "RechercherPersonnes" => {
                let needle = variable::<String>(request, "nom")?.to_lowercase();
                let found: Vec<&Personne> = state
                    .records
                    .values()
                    .filter(|p| p.last_name.to_lowercase().contains(&needle))
                    .collect();
                json!({ "rechercherPersonnes": found })
            }
            "RechercherPersonneParId" => {
                let id = record_id(request)?;
                json!({ "rechercherPersonneParId": state.records.get(&id) })
            }
            "ModifierPersonne" => {
                let id = record_id(request)?;
                let input: PersonneInput = variable(request, "personne")?;
                let updated = if state.records.contains_key(&id) {
                    Some(state.store(id, input)?)
                } else {
                    None
                };
                json!({ "modifierPersonne": updated })
            }
            "SupprimerPersonne" => {
                let id = record_id(request)?;
                state.records.remove(&id);
                json!({ "supprimerPersonne": true })
            }
            other => {
                let message = format!("Unknown operation: {other}");
                return Err(ApiError::GraphQl(vec![message]));
            }
        };
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{
        AJOUTER_PERSONNE, LISTER_PERSONNES, MODIFIER_PERSONNE, RECHERCHER_PERSONNES,
    };

    fn input(nom: &str, prenom: &str) -> PersonneInput {
        PersonneInput {
            last_name: nom.to_string(),
            first_name: prenom.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let backend = MemoryBackend::new();

        let request = GraphQlRequest::new(
            &AJOUTER_PERSONNE,
            json!({
                "personne": { "nom": "Sarr", "prenom": "Ibou", "adresse": "", "telephone": null }
            }),
        );
        let data = backend.execute(&request).await.unwrap();
        assert_eq!(data["ajouterPersonne"]["id"], "1");
        assert_eq!(data["ajouterPersonne"]["adresse"], Value::Null);

        let data = backend.execute(&request).await.unwrap();
        assert_eq!(data["ajouterPersonne"]["id"], "2");
        assert_eq!(backend.call_count(&AJOUTER_PERSONNE), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_contains() {
        let backend = MemoryBackend::with_personnes([
            input("Diallo", "Fatou"),
            input("Ndiaye", "Omar"),
            input("Gueye", "Aliou"),
        ]);

        let request = GraphQlRequest::new(&RECHERCHER_PERSONNES, json!({ "nom": "DIA" }));
        let data = backend.execute(&request).await.unwrap();
        let names: Vec<&str> = data["rechercherPersonnes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["nom"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Diallo", "Ndiaye"]);
    }

    #[tokio::test]
    async fn test_birth_date_follows_date_scalar() {
        let backend = MemoryBackend::with_personnes([input("Sow", "Cheikh")]);
        let update = |date: Value| {
            GraphQlRequest::new(
                &MODIFIER_PERSONNE,
                json!({
                    "id": "1",
                    "personne": { "nom": "Sow", "prenom": "Cheikh", "dateNaissance": date }
                }),
            )
        };

        let data = backend.execute(&update(json!("10/06/2001"))).await.unwrap();
        assert_eq!(data["modifierPersonne"]["dateNaissance"], "2001-06-10");

        let data = backend.execute(&update(Value::Null)).await.unwrap();
        assert_eq!(data["modifierPersonne"]["dateNaissance"], Value::Null);

        for bad in ["", "2001-13-40", "not-a-date"] {
            let err = backend.execute(&update(json!(bad))).await.unwrap_err();
            assert_eq!(err, ApiError::GraphQl(vec![format!("Invalid date format: {bad}")]));
        }
        assert_eq!(backend.personnes()[0].birth_date, None);
    }

    #[tokio::test]
    async fn test_rejected_add_does_not_consume_an_id() {
        let backend = MemoryBackend::new();
        let add = |date: &str| {
            GraphQlRequest::new(
                &AJOUTER_PERSONNE,
                json!({ "personne": { "nom": "Sarr", "prenom": "Ibou", "dateNaissance": date } }),
            )
        };

        assert!(backend.execute(&add("")).await.is_err());
        let data = backend.execute(&add("2001-06-10")).await.unwrap();
        assert_eq!(data["ajouterPersonne"]["id"], "1");
        assert_eq!(backend.personnes().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next_only_fails_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(ApiError::Network("offline".to_string()));

        let request = GraphQlRequest::new(&LISTER_PERSONNES, json!({}));
        assert!(backend.execute(&request).await.is_err());
        assert!(backend.execute(&request).await.is_ok());
        assert_eq!(backend.calls(), vec!["ListerPersonnes", "ListerPersonnes"]);
    }
}
