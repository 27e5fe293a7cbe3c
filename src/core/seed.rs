//! Built-in seed dataset
//!
//! The default collection used when no durable data exists or the stored
//! content fails to load. Embedded into the binary at build time.

use rust_embed::Embed;
use thiserror::Error;

use crate::entities::Term;

#[derive(Embed)]
#[folder = "seed/"]
struct EmbeddedSeed;

/// Errors that can occur loading the embedded seed dataset
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("embedded seed dataset 'terms.json' is missing")]
    Missing,

    #[error("embedded seed dataset failed to parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the embedded seed dataset
pub fn seed_terms() -> Result<Vec<Term>, SeedError> {
    let file = EmbeddedSeed::get("terms.json").ok_or(SeedError::Missing)?;
    let terms: Vec<Term> = serde_json::from_slice(&file.data)?;
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;

    #[test]
    fn test_seed_parses() {
        let terms = seed_terms().unwrap();
        assert!(!terms.is_empty());
    }

    #[test]
    fn test_seed_records_are_well_formed() {
        for term in seed_terms().unwrap() {
            assert!(term.is_well_formed(), "seed term {} is malformed", term.id);
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let terms = seed_terms().unwrap();
        let mut ids: Vec<_> = terms.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), terms.len());
    }

    #[test]
    fn test_seed_has_a_singleton_category() {
        // The ALJ category is carried by exactly one seed term; browse
        // filtering relies on at least one such narrow slice existing.
        let terms = seed_terms().unwrap();
        let count = terms
            .iter()
            .filter(|t| t.categories.contains(&Category::AljSpecialized))
            .count();
        assert_eq!(count, 1);
    }
}
