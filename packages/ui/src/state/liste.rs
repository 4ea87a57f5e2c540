//! State of the personne list: loading, delete, search-by-id then edit, name search.
//!
//! Every asynchronous operation is split in two: a `begin_*` method that validates
//! and flips the busy flags, returning what to send (or `None` to stop), and a
//! `finish_*` method that applies the service result. The view runs the service call
//! in between.

use api::{ApiError, ListResult, Personne, PersonneInput};

use crate::dates::is_valid_date;
use crate::prompt::Prompt;

/// Values shown in the edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFormData {
    pub prenom: String,
    pub nom: String,
    pub adresse: String,
    pub telephone: String,
    pub date_naissance: String,
}

impl From<&Personne> for EditFormData {
    fn from(personne: &Personne) -> Self {
        Self {
            prenom: personne.first_name.clone(),
            nom: personne.last_name.clone(),
            adresse: personne.address.clone().unwrap_or_default(),
            telephone: personne.phone.clone().unwrap_or_default(),
            date_naissance: personne.birth_date.clone().unwrap_or_default(),
        }
    }
}

/// An update ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub id: String,
    pub input: PersonneInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListePersonnesState {
    pub records: Vec<Personne>,
    pub loading: bool,
    pub error: Option<String>,

    pub modal_open: bool,
    pub editing: Option<Personne>,
    pub edit_form: EditFormData,
    pub submitting: bool,

    pub search_id: String,
    pub search_error: Option<String>,
    pub search_loading: bool,

    pub name_query: String,
    pub name_results: Option<Vec<Personne>>,
    pub name_loading: bool,
}

impl Default for ListePersonnesState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
            modal_open: false,
            editing: None,
            edit_form: EditFormData::default(),
            submitting: false,
            search_id: String::new(),
            search_error: None,
            search_loading: false,
            name_query: String::new(),
            name_results: None,
            name_loading: false,
        }
    }
}

impl ListePersonnesState {
    /// Records to display: name search results when a search is active.
    pub fn visible_records(&self) -> &[Personne] {
        self.name_results.as_deref().unwrap_or(&self.records)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply one emission of the list stream.
    pub fn apply_list(&mut self, result: ListResult) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("list load failed: {e}");
                self.error = Some(format!("Erreur lors du chargement des personnes: {e}"));
            }
        }
    }

    /// Ask for confirmation and return the id to delete.
    pub fn begin_delete(&mut self, personne: &Personne, prompt: &impl Prompt) -> Option<String> {
        let Some(id) = personne.id.clone() else {
            tracing::debug!("ignoring delete of unsaved personne {}", personne.full_name());
            return None;
        };

        let message = format!(
            "Êtes-vous sûr de vouloir supprimer {} ?",
            personne.full_name()
        );
        prompt.confirm(&message).then_some(id)
    }

    /// Apply the outcome of `remove`. Returns `true` when the record is gone.
    pub fn finish_delete(&mut self, result: Result<bool, ApiError>) -> bool {
        match result {
            Ok(true) => {
                tracing::info!("Personne supprimée");
                true
            }
            Ok(false) => {
                self.error =
                    Some("Erreur lors de la suppression: refusée par le serveur".to_string());
                false
            }
            Err(e) => {
                tracing::error!("delete failed: {e}");
                self.error = Some(format!("Erreur lors de la suppression: {e}"));
                false
            }
        }
    }

    /// Validate the search field and return the trimmed id to look up.
    pub fn begin_search(&mut self) -> Option<String> {
        let id = self.search_id.trim();
        if id.is_empty() {
            self.search_error = Some("Veuillez saisir un ID".to_string());
            return None;
        }
        let id = id.to_string();
        self.search_loading = true;
        self.search_error = None;
        Some(id)
    }

    pub fn finish_search(&mut self, result: Result<Option<Personne>, ApiError>) {
        self.search_loading = false;
        match result {
            Ok(Some(personne)) => {
                self.open_edit(personne);
                self.search_id.clear();
            }
            Ok(None) => {
                self.search_error = Some("Personne introuvable avec cet ID".to_string());
            }
            Err(e) => {
                tracing::error!("search failed: {e}");
                self.search_error = Some(format!("Erreur lors de la recherche: {e}"));
            }
        }
    }

    pub fn open_edit(&mut self, personne: Personne) {
        self.edit_form = EditFormData::from(&personne);
        self.editing = Some(personne);
        self.modal_open = true;
    }

    pub fn close_edit(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.edit_form = EditFormData::default();
        self.submitting = false;
    }

    /// Validate the edit form and return the update to send.
    ///
    /// Blocking problems are reported through `prompt.alert`.
    pub fn begin_submit_edit(&mut self, prompt: &impl Prompt) -> Option<EditRequest> {
        if self.submitting {
            return None;
        }
        let id = self.editing.as_ref()?.id.clone()?;

        let form = &self.edit_form;
        if form.prenom.trim().is_empty() || form.nom.trim().is_empty() {
            prompt.alert("Le prénom et le nom sont obligatoires");
            return None;
        }
        if !is_valid_date(&form.date_naissance) {
            prompt.alert("La date de naissance n'est pas valide");
            return None;
        }

        let input = PersonneInput {
            first_name: form.prenom.trim().to_string(),
            last_name: form.nom.trim().to_string(),
            address: Some(form.adresse.trim().to_string()),
            phone: Some(form.telephone.trim().to_string()),
            birth_date: Some(form.date_naissance.trim())
                .filter(|date| !date.is_empty())
                .map(str::to_string),
        };
        self.submitting = true;
        Some(EditRequest { id, input })
    }

    /// Apply the outcome of `update`. Returns `true` when the modal was closed.
    pub fn finish_submit_edit(&mut self, result: Result<Personne, ApiError>) -> bool {
        match result {
            Ok(_) => {
                tracing::info!("Personne modifiée");
                self.close_edit();
                true
            }
            Err(e) => {
                tracing::error!("update failed: {e}");
                self.submitting = false;
                self.error = Some(format!("Erreur lors de la modification: {e}"));
                false
            }
        }
    }

    /// Start a name search. A blank query clears the results instead.
    pub fn begin_name_search(&mut self) -> Option<String> {
        let query = self.name_query.trim();
        if query.is_empty() {
            self.name_results = None;
            return None;
        }
        let query = query.to_string();
        self.name_loading = true;
        Some(query)
    }

    pub fn finish_name_search(&mut self, result: Result<Vec<Personne>, ApiError>) {
        self.name_loading = false;
        match result {
            Ok(found) => self.name_results = Some(found),
            Err(e) => {
                tracing::error!("name search failed: {e}");
                self.error = Some(format!("Erreur lors de la recherche: {e}"));
            }
        }
    }

    pub fn clear_name_search(&mut self) {
        self.name_query.clear();
        self.name_results = None;
    }
}
