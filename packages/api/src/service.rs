//! # Record service: typed operations over a [`Transport`]
//!
//! [`PersonneService`] exposes one method per use case. It is a cheap handle
//! (clones share the same transport and cache) so views can keep a copy in context.
//!
//! | Method | Cache behavior |
//! |--------|----------------|
//! | [`list_all`](PersonneService::list_all) | First read served from a warm cache |
//! | [`get_by_id`](PersonneService::get_by_id) | Always hits the server |
//! | [`search_by_name`](PersonneService::search_by_name) | Always hits the server |
//! | [`add`](PersonneService::add) | Refetches the list after success |
//! | [`update`](PersonneService::update) | Refetches the list after success |
//! | [`remove`](PersonneService::remove) | Refetches the list after success |
//!
//! The list cache is a [`tokio::sync::watch`] channel holding the last list result
//! (success or failure). [`refetch_list`](PersonneService::refetch_list) replaces it
//! and wakes every watcher.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::error::ApiError;
use crate::graphql::{
    GraphQlRequest, Operation, AJOUTER_PERSONNE, LISTER_PERSONNES, MODIFIER_PERSONNE,
    RECHERCHER_PERSONNES, RECHERCHER_PERSONNE_PAR_ID, SUPPRIMER_PERSONNE,
};
use crate::models::{Personne, PersonneInput};
use crate::transport::Transport;

/// Result of reading the full list.
pub type ListResult = Result<Vec<Personne>, ApiError>;

/// Typed access to the Personne GraphQL API.
pub struct PersonneService<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    transport: T,
    personnes: watch::Sender<Option<ListResult>>,
}

impl<T> Clone for PersonneService<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for PersonneService<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Transport> PersonneService<T> {
    pub fn new(transport: T) -> Self {
        let (personnes, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                transport,
                personnes,
            }),
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Continuous stream of the full list.
    pub fn list_all(&self) -> PersonnesWatch<T> {
        PersonnesWatch {
            service: self.clone(),
            receiver: self.inner.personnes.subscribe(),
            started: false,
        }
    }

    /// Last list result, if the list has been fetched at least once.
    pub fn cached_list(&self) -> Option<ListResult> {
        self.inner.personnes.borrow().clone()
    }

    /// Re-execute the list query and publish the result to every watcher.
    pub async fn refetch_list(&self) -> ListResult {
        let result = self.run::<Vec<Personne>>(&LISTER_PERSONNES, json!({})).await;
        match &result {
            Ok(personnes) => tracing::debug!("list refreshed: {} personnes", personnes.len()),
            Err(e) => tracing::error!("list refresh failed: {e}"),
        }
        self.inner.personnes.send_replace(Some(result.clone()));
        result
    }

    /// Create a record. The returned record carries its server-assigned id.
    pub async fn add(&self, input: &PersonneInput) -> Result<Personne, ApiError> {
        let created: Option<Personne> = self
            .run(&AJOUTER_PERSONNE, json!({ "personne": input }))
            .await?;
        let created = created.ok_or(ApiError::EmptyResult(AJOUTER_PERSONNE.root_field))?;
        tracing::info!("personne added: {:?}", created.id);
        self.after_write().await;
        Ok(created)
    }

    /// Fetch one record straight from the server.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Personne>, ApiError> {
        self.run(&RECHERCHER_PERSONNE_PAR_ID, json!({ "id": id }))
            .await
    }

    /// Records whose last name contains `name`, ignoring case.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Personne>, ApiError> {
        self.run(&RECHERCHER_PERSONNES, json!({ "nom": name })).await
    }

    /// Replace the fields of record `id`.
    ///
    /// Only the declared input fields are sent, trimmed, with missing text optionals as
    /// `""` and a blank birth date as `null`.
    pub async fn update(&self, id: &str, input: &PersonneInput) -> Result<Personne, ApiError> {
        let cleaned = input.cleaned();
        let updated: Option<Personne> = self
            .run(&MODIFIER_PERSONNE, json!({ "id": id, "personne": cleaned }))
            .await?;
        let updated = updated.ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        tracing::info!("personne {id} updated");
        self.after_write().await;
        Ok(updated)
    }

    /// Delete record `id`.
    pub async fn remove(&self, id: &str) -> Result<bool, ApiError> {
        let removed: bool = self.run(&SUPPRIMER_PERSONNE, json!({ "id": id })).await?;
        tracing::info!("personne {id} removed: {removed}");
        self.after_write().await;
        Ok(removed)
    }

    async fn after_write(&self) {
        // Failures are published to watchers by refetch_list.
        let _ = self.refetch_list().await;
    }

    async fn run<R: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<R, ApiError> {
        let request = GraphQlRequest::new(operation, variables);
        let mut data = self.inner.transport.execute(&request).await?;
        let field = data
            .get_mut(operation.root_field)
            .map(Value::take)
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(field)?)
    }
}

/// Subscription to the list returned by [`PersonneService::list_all`].
///
/// Dropping the watch unsubscribes.
pub struct PersonnesWatch<T> {
    service: PersonneService<T>,
    receiver: watch::Receiver<Option<ListResult>>,
    started: bool,
}

impl<T: Transport> PersonnesWatch<T> {
    /// Wait for the next list emission.
    ///
    /// The first call yields the cached list, fetching it if the cache is cold or holds
    /// an error. Later calls wait for the next refresh. Returns `None` once the service is gone.
    pub async fn next(&mut self) -> Option<ListResult> {
        if !self.started {
            self.started = true;
            let cached = self.receiver.borrow_and_update().clone();
            // A cached failure is not a warm cache: ask the server again.
            if let Some(Ok(personnes)) = cached {
                return Some(Ok(personnes));
            }
            let result = self.service.refetch_list().await;
            let _ = self.receiver.borrow_and_update();
            return Some(result);
        }

        loop {
            self.receiver.changed().await.ok()?;
            let current = self.receiver.borrow_and_update().clone();
            if current.is_some() {
                return current;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    fn input(nom: &str, prenom: &str) -> PersonneInput {
        PersonneInput {
            last_name: nom.to_string(),
            first_name: prenom.to_string(),
            ..Default::default()
        }
    }

    fn service_with(inputs: Vec<PersonneInput>) -> PersonneService<MemoryBackend> {
        PersonneService::new(MemoryBackend::with_personnes(inputs))
    }

    #[tokio::test]
    async fn test_first_read_fetches_then_uses_cache() {
        let service = service_with(vec![input("Ba", "Mariama")]);

        let mut first = service.list_all();
        let list = first.next().await.unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(service.transport().call_count(&LISTER_PERSONNES), 1);

        let mut second = service.list_all();
        let list = second.next().await.unwrap().unwrap();
        assert_eq!(list[0].last_name, "Ba");
        assert_eq!(service.transport().call_count(&LISTER_PERSONNES), 1);
    }

    #[tokio::test]
    async fn test_add_pushes_fresh_list_to_watchers() {
        let service = service_with(vec![input("Ba", "Mariama")]);
        let mut watch = service.list_all();
        assert_eq!(watch.next().await.unwrap().unwrap().len(), 1);

        let created = service.add(&input("Cisse", "Khady")).await.unwrap();
        assert_eq!(created.id.as_deref(), Some("2"));

        let list = watch.next().await.unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().any(|p| p.id == created.id && p.last_name == "Cisse"));
    }

    #[tokio::test]
    async fn test_update_and_remove_refresh_the_list() {
        let service = service_with(vec![input("Ba", "Mariama"), input("Sow", "Cheikh")]);
        let mut watch = service.list_all();
        watch.next().await.unwrap().unwrap();

        let mut changed = input(" Sow ", "Cheikh Tidiane");
        changed.phone = Some(" +221 77 000 00 00 ".to_string());
        let updated = service.update("2", &changed).await.unwrap();
        assert_eq!(updated.last_name, "Sow");
        assert_eq!(updated.phone.as_deref(), Some("+221 77 000 00 00"));

        let list = watch.next().await.unwrap().unwrap();
        assert_eq!(list[1].first_name, "Cheikh Tidiane");

        assert!(service.remove("1").await.unwrap());
        let list = watch.next().await.unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let service = service_with(vec![]);
        let err = service.update("42", &input("Kane", "Amy")).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("42".to_string()));
        assert_eq!(service.transport().call_count(&LISTER_PERSONNES), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_bypasses_cache() {
        let service = service_with(vec![input("Ba", "Mariama")]);
        service.refetch_list().await.unwrap();

        service.transport().insert(input("Faye", "Lamine")).unwrap();
        let found = service.get_by_id("2").await.unwrap().unwrap();
        assert_eq!(found.last_name, "Faye");
        assert!(service.get_by_id("99").await.unwrap().is_none());

        // The cached list is untouched by lookups.
        assert_eq!(service.cached_list().unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let service = service_with(vec![input("Diallo", "Fatou"), input("Gueye", "Aliou")]);
        let found = service.search_by_name("gue").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Aliou");
        assert_eq!(service.transport().call_count(&RECHERCHER_PERSONNES), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_reaches_watchers() {
        let service = service_with(vec![]);
        service.transport().fail_next(ApiError::Network("offline".to_string()));

        let mut watch = service.list_all();
        let first = watch.next().await.unwrap();
        assert_eq!(first, Err(ApiError::Network("offline".to_string())));

        service.add(&input("Ly", "Penda")).await.unwrap();
        assert_eq!(watch.next().await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_failure_is_refetched_by_next_watch() {
        let service = service_with(vec![input("Ba", "Mariama")]);
        service.transport().fail_next(ApiError::Network("offline".to_string()));

        let mut first = service.list_all();
        assert!(first.next().await.unwrap().is_err());
        drop(first);

        let mut second = service.list_all();
        let list = second.next().await.unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(service.transport().call_count(&LISTER_PERSONNES), 2);
        assert!(matches!(service.cached_list(), Some(Ok(_))));
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_refetch() {
        let service = service_with(vec![]);
        service.transport().fail_next(ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        });

        assert!(service.add(&input("Ly", "Penda")).await.is_err());
        assert_eq!(service.transport().calls(), vec!["AjouterPersonne"]);
    }
}
