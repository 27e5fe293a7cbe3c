//! Term filtering - category filter plus multi-field substring search
//!
//! A pure function of the collection and the query; recomputed in full on
//! every change, with repository order preserved.

use crate::entities::{Category, Term};

/// Category filter: everything, or one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// The active query over the collection
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub category: CategoryFilter,
    pub search: String,
}

impl Query {
    /// Whether a single term satisfies both the category filter and the
    /// search text.
    pub fn matches(&self, term: &Term) -> bool {
        self.matches_category(term) && self.matches_search(term)
    }

    fn matches_category(&self, term: &Term) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => term.categories.contains(&cat),
        }
    }

    /// Case-insensitive substring search across `term`, `reading`,
    /// `english`, `meaning`, and `alias` when present. An empty search
    /// text matches everything.
    fn matches_search(&self, term: &Term) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        term.term.to_lowercase().contains(&needle)
            || term.reading.to_lowercase().contains(&needle)
            || term.english.to_lowercase().contains(&needle)
            || term.meaning.to_lowercase().contains(&needle)
            || term
                .alias
                .as_ref()
                .is_some_and(|a| a.to_lowercase().contains(&needle))
    }
}

/// Derive the filtered view, preserving collection order (no re-sort)
pub fn filter_terms(terms: &[Term], query: &Query) -> Vec<Term> {
    terms.iter().filter(|t| query.matches(t)).cloned().collect()
}
