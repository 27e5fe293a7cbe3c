//! Term repository - the authoritative in-memory collection
//!
//! Owns CRUD, ID allocation, and audit-trail maintenance. Every mutating
//! call is followed by exactly one persistence write reflecting the
//! post-mutation state; a failed write is surfaced as a warning, never a
//! rollback.

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::identity::TermId;
use crate::core::store::{LoadSource, StoreError, TermStore};
use crate::entities::{EditRecord, Term, TermDraft, ValidationError};

/// Errors raised by repository operations.
///
/// Deleting a missing ID is not an error; it is an idempotent no-op.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no term found with ID {0}")]
    NotFound(TermId),
}

/// The canonical in-memory term collection
pub struct TermRepository {
    terms: Vec<Term>,
    store: TermStore,
    source: LoadSource,
    dropped_on_load: usize,
    save_warning: Option<StoreError>,
}

impl TermRepository {
    /// Load the collection from the store (seed fallback included)
    pub fn open(store: TermStore) -> Self {
        let loaded = store.load();
        Self {
            terms: loaded.terms,
            store,
            source: loaded.source,
            dropped_on_load: loaded.dropped,
            save_warning: None,
        }
    }

    /// Where the initial collection came from
    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// How many records were dropped by shape validation at load time
    pub fn dropped_on_load(&self) -> usize {
        self.dropped_on_load
    }

    /// Read-only snapshot of the collection, most-recently-created first
    pub fn all(&self) -> &[Term] {
        &self.terms
    }

    /// Look up one term by ID
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// Total record count
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Create a new term from a draft.
    ///
    /// Allocates `max existing ID + 1` (1 for an empty collection); gaps
    /// left by deletions are never refilled. The new record becomes the
    /// most recent entry.
    pub fn create(&mut self, draft: TermDraft, operator: &str) -> Result<Term, RepositoryError> {
        let draft = draft.normalized();
        draft.validate()?;
        let operator = non_empty_operator(operator)?;

        let term = Term::new(self.next_id(), draft, operator, today());
        self.terms.insert(0, term.clone());
        self.persist();
        Ok(term)
    }

    /// Replace a term's draft fields and append one audit record.
    ///
    /// `created_by`/`created_at` are copied unchanged from the stored
    /// record; the update payload cannot carry them, nor a different ID.
    pub fn update(
        &mut self,
        id: TermId,
        draft: TermDraft,
        operator: &str,
    ) -> Result<Term, RepositoryError> {
        let draft = draft.normalized();
        draft.validate()?;
        let operator = non_empty_operator(operator)?;

        let existing = self
            .terms
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        existing.term = draft.term;
        existing.reading = draft.reading;
        existing.alias = draft.alias;
        existing.english = draft.english;
        existing.meaning = draft.meaning;
        existing.categories = draft.categories;
        existing.image_url = draft.image_url;
        existing.history.push(EditRecord {
            edited_by: operator.to_string(),
            edited_at: today(),
        });

        let updated = existing.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove a term if present; absent IDs are a no-op, not an error.
    ///
    /// Returns whether a record was removed. Either way the post-mutation
    /// state is written out.
    pub fn delete(&mut self, id: TermId) -> bool {
        let before = self.terms.len();
        self.terms.retain(|t| t.id != id);
        let removed = self.terms.len() != before;
        self.persist();
        removed
    }

    /// Take the pending write warning, if the last save failed
    pub fn take_save_warning(&mut self) -> Option<StoreError> {
        self.save_warning.take()
    }

    fn next_id(&self) -> TermId {
        self.terms
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| TermId::new(1))
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.terms) {
            self.save_warning = Some(e);
        }
    }
}

fn non_empty_operator(operator: &str) -> Result<&str, ValidationError> {
    let operator = operator.trim();
    if operator.is_empty() {
        return Err(ValidationError::MissingOperator);
    }
    Ok(operator)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
