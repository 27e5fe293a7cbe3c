//! Glossary session - the surface exposed to the presentation layer
//!
//! Wires the repository, query engine, and selection coordinator together:
//! every mutation or query change recomputes the filtered view and
//! reconciles the active selection against it.

use crate::core::identity::TermId;
use crate::core::query::{filter_terms, CategoryFilter, Query};
use crate::core::repository::{RepositoryError, TermRepository};
use crate::core::selection::SelectionCoordinator;
use crate::core::store::{StoreError, TermStore};
use crate::entities::{Term, TermDraft};

/// One interactive glossary session over an owned repository
pub struct GlossarySession {
    repo: TermRepository,
    query: Query,
    filtered: Vec<Term>,
    selection: SelectionCoordinator,
}

impl GlossarySession {
    /// Open a session over the given store
    pub fn open(store: TermStore) -> Self {
        Self::new(TermRepository::open(store))
    }

    /// Build a session around an already-loaded repository
    pub fn new(repo: TermRepository) -> Self {
        let mut session = Self {
            repo,
            query: Query::default(),
            filtered: Vec::new(),
            selection: SelectionCoordinator::default(),
        };
        session.recompute();
        session
    }

    /// Full collection snapshot, unfiltered
    pub fn all(&self) -> &[Term] {
        self.repo.all()
    }

    /// Total record count, independent of the active query
    pub fn record_count(&self) -> usize {
        self.repo.len()
    }

    /// The current filtered view
    pub fn filtered(&self) -> &[Term] {
        &self.filtered
    }

    /// The active query
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The active term, resolved against the filtered view
    pub fn active(&self) -> Option<&Term> {
        let id = self.selection.current()?;
        self.filtered.iter().find(|t| t.id == id)
    }

    /// Change the category filter and reconcile the selection
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.category = filter;
        self.recompute();
    }

    /// Change the search text and reconcile the selection
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.recompute();
    }

    /// Explicitly select a visible term. Returns false (and leaves the
    /// selection unchanged) if the ID is not in the filtered view.
    pub fn select(&mut self, id: TermId) -> bool {
        if self.filtered.iter().any(|t| t.id == id) {
            self.selection.select(id);
            true
        } else {
            false
        }
    }

    /// Create a term; the new record becomes the selection (subject to the
    /// active query).
    pub fn create(&mut self, draft: TermDraft, operator: &str) -> Result<Term, RepositoryError> {
        let term = self.repo.create(draft, operator)?;
        self.selection.select(term.id);
        self.recompute();
        Ok(term)
    }

    /// Update a term in place; the selection is untouched (IDs are stable)
    pub fn update(
        &mut self,
        id: TermId,
        draft: TermDraft,
        operator: &str,
    ) -> Result<Term, RepositoryError> {
        let term = self.repo.update(id, draft, operator)?;
        self.recompute();
        Ok(term)
    }

    /// Delete a term. A selected target is deselected immediately; the
    /// recomputation that follows applies the first-element rule.
    pub fn delete(&mut self, id: TermId) -> bool {
        self.selection.deselect_if(id);
        let removed = self.repo.delete(id);
        self.recompute();
        removed
    }

    /// Take the pending write warning from the repository, if any
    pub fn take_save_warning(&mut self) -> Option<StoreError> {
        self.repo.take_save_warning()
    }

    fn recompute(&mut self) {
        self.filtered = filter_terms(self.repo.all(), &self.query);
        self.selection.reconcile(&self.filtered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;
    use tempfile::{tempdir, TempDir};

    fn draft(term: &str, cats: &[Category]) -> TermDraft {
        TermDraft {
            term: term.to_string(),
            reading: "よみ".to_string(),
            alias: None,
            english: "English".to_string(),
            meaning: "意味".to_string(),
            categories: cats.to_vec(),
            image_url: None,
        }
    }

    fn session() -> (GlossarySession, TempDir) {
        let tmp = tempdir().unwrap();
        let store = TermStore::new(tmp.path().join("terms.json"));
        store.save(&[]).unwrap();
        let mut session = GlossarySession::open(store);
        session
            .create(draft("射出成形", &[Category::ResinMolding]), "alice")
            .unwrap();
        session
            .create(draft("カイゼン", &[Category::ToyotaTerms]), "alice")
            .unwrap();
        session
            .create(draft("金型", &[Category::ResinMold]), "alice")
            .unwrap();
        (session, tmp)
    }

    #[test]
    fn test_unfiltered_session_selects_first_element() {
        let (session, _tmp) = session();
        // Most recent creation sits first and holds the selection
        assert_eq!(session.filtered().len(), 3);
        assert_eq!(session.active().unwrap().term, "金型");
    }

    #[test]
    fn test_singleton_category_filter_autoselects_its_term() {
        let (mut session, _tmp) = session();
        session.set_category_filter(CategoryFilter::Only(Category::ToyotaTerms));

        assert_eq!(session.filtered().len(), 1);
        assert_eq!(session.active().unwrap().term, "カイゼン");
    }

    #[test]
    fn test_selection_survives_query_change_when_still_visible() {
        let (mut session, _tmp) = session();
        let kaizen = session.filtered()[1].id;
        assert!(session.select(kaizen));

        session.set_search_text("カイゼン");
        assert_eq!(session.active().unwrap().id, kaizen);
    }

    #[test]
    fn test_select_rejects_invisible_term() {
        let (mut session, _tmp) = session();
        let mold = session.filtered()[0].id;
        session.set_search_text("カイゼン");

        assert!(!session.select(mold));
        assert_eq!(session.active().unwrap().term, "カイゼン");
    }

    #[test]
    fn test_empty_view_has_no_selection() {
        let (mut session, _tmp) = session();
        session.set_search_text("存在しない語");
        assert!(session.filtered().is_empty());
        assert!(session.active().is_none());
    }

    #[test]
    fn test_delete_of_selected_term_falls_to_first_visible() {
        let (mut session, _tmp) = session();
        let selected = session.active().unwrap().id;

        assert!(session.delete(selected));
        assert_eq!(session.active().unwrap().term, "カイゼン");
    }

    #[test]
    fn test_delete_last_visible_term_clears_selection() {
        let (mut session, _tmp) = session();
        session.set_search_text("カイゼン");
        let selected = session.active().unwrap().id;

        session.delete(selected);
        assert!(session.filtered().is_empty());
        assert!(session.active().is_none());
    }

    #[test]
    fn test_create_selects_the_new_term() {
        let (mut session, _tmp) = session();
        let term = session
            .create(draft("アンドン", &[Category::ToyotaTerms]), "alice")
            .unwrap();
        assert_eq!(session.active().unwrap().id, term.id);
    }

    #[test]
    fn test_create_outside_filter_bounces_selection_to_first() {
        let (mut session, _tmp) = session();
        session.set_category_filter(CategoryFilter::Only(Category::ToyotaTerms));

        // The new record does not match the active filter, so the
        // reconciliation falls back to the first visible element.
        session
            .create(draft("公差", &[Category::DesignSpecialized]), "alice")
            .unwrap();
        assert_eq!(session.active().unwrap().term, "カイゼン");
    }

    #[test]
    fn test_update_keeps_selection_stable() {
        let (mut session, _tmp) = session();
        let id = session.active().unwrap().id;
        let mut d = session.active().unwrap().to_draft();
        d.meaning = "新しい意味".to_string();

        session.update(id, d, "bob").unwrap();
        assert_eq!(session.active().unwrap().id, id);
        assert_eq!(session.active().unwrap().meaning, "新しい意味");
    }
}
