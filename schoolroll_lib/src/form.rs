//! Add/edit form controller.

use serde::Serialize;
use schoolroll_api::Resource;

use crate::error::SchoolError;
use crate::source::RecordSource;
use crate::validation::{evaluate, FieldErrors, Rule};

/// Editable state of an entity form, sent verbatim as the create/update body.
pub trait FormDraft: Default + Clone + Serialize + 'static {
    /// The record type this draft creates or edits.
    type Record: Resource;

    /// Rule table checked before submitting.
    const RULES: &'static [Rule<Self>];

    /// Builds the draft for editing an existing record.
    fn from_record(record: Self::Record) -> Self;

    /// Merges one raw field value into the draft. Only converts the text to the
    /// field's type; rule checks wait for [`FormController::validate`].
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), SchoolError>;
}

/// What happened to a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the draft; the form is done.
    Saved,
    /// Local rules failed. Nothing was sent.
    Invalid(FieldErrors),
    /// The backend refused or could not be reached.
    Failed(String),
}

/// Owns a draft and drives it through load, edit, validate and submit.
///
/// Without an id the form creates a new record; with one it loads and
/// updates that record.
pub struct FormController<D: FormDraft, S> {
    source: S,
    id: Option<String>,
    draft: D,
    errors: FieldErrors,
    fetch_error: Option<String>,
    submit_error: Option<String>,
    loading: bool,
    saving: bool,
}

impl<D, S> FormController<D, S>
where
    D: FormDraft,
    S: RecordSource<D>,
{
    /// A form for a new record.
    pub fn create(source: S) -> Self {
        Self::with_id(source, None)
    }

    /// A form editing the record with `id`. Call [`load`](Self::load) to fill it.
    pub fn edit(source: S, id: &str) -> Self {
        Self::with_id(source, Some(id.to_string()))
    }

    fn with_id(source: S, id: Option<String>) -> Self {
        Self {
            source,
            id,
            draft: D::default(),
            errors: FieldErrors::new(),
            fetch_error: None,
            submit_error: None,
            loading: false,
            saving: false,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Field errors from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the record being edited into the draft. A no-op for new records.
    ///
    /// On failure the draft keeps its default values and a fetch error is
    /// recorded apart from the field errors.
    pub async fn load(&mut self) -> Result<(), SchoolError> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        self.loading = true;
        let result = self.source.fetch_one(&id).await;
        self.loading = false;

        match result {
            Ok(record) => {
                self.draft = D::from_record(record);
                self.fetch_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Loading {} {} failed: {}", D::Record::SINGULAR, id, e);
                self.fetch_error = Some(format!("Error fetching {} data", D::Record::SINGULAR));
                Err(e.into())
            }
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), SchoolError> {
        self.draft.set_field(field, value)
    }

    /// Replaces the whole draft.
    pub fn set_draft(&mut self, draft: D) {
        self.draft = draft;
    }

    /// Every rule failure of the current draft.
    pub fn validate(&self) -> FieldErrors {
        evaluate(&self.draft, D::RULES)
    }

    /// Validates, then creates or updates.
    ///
    /// Invalid drafts never reach the network. A backend refusal is reported
    /// with the backend's message when it gave one.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            self.submit_error = None;
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = FieldErrors::new();

        self.saving = true;
        let result = match &self.id {
            Some(id) => self.source.update(id, &self.draft).await,
            None => self.source.create(&self.draft).await,
        };
        self.saving = false;

        match result {
            Ok(()) => {
                self.submit_error = None;
                SubmitOutcome::Saved
            }
            Err(e) => {
                let err = SchoolError::from(e);
                let message =
                    err.user_message(&format!("Error saving {}", D::Record::SINGULAR));
                tracing::warn!("Saving {} failed: {}", D::Record::SINGULAR, err);
                self.submit_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
