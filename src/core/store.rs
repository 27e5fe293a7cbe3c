//! Durable term storage
//!
//! The whole collection is persisted as one JSON document under a fixed
//! file name. Loading never fails: missing or corrupt content falls back to
//! the embedded seed dataset, and structurally invalid records are dropped.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::TermId;
use crate::core::project::Project;
use crate::core::seed::seed_terms;
use crate::entities::Term;

/// Where the loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the durable store
    Store,
    /// No durable data existed; seed dataset used
    SeedMissing,
    /// Durable data was unreadable or malformed; seed dataset used
    SeedCorrupt,
}

/// Result of a load: the collection plus how it was obtained.
///
/// `dropped` counts records discarded by shape validation (empty required
/// fields, empty category set, or a duplicate ID).
#[derive(Debug)]
pub struct Loaded {
    pub terms: Vec<Term>,
    pub source: LoadSource,
    pub dropped: usize,
}

/// Errors that can occur writing the durable store.
///
/// Read-side failures never escape this module; they are recovered by the
/// seed fallback and reported through [`Loaded::source`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write glossary data to {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Persistence adapter over a single JSON document
#[derive(Debug, Clone)]
pub struct TermStore {
    path: PathBuf,
}

impl TermStore {
    /// Create a store over an explicit file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store over the project's fixed dataset location
    pub fn for_project(project: &Project) -> Self {
        Self::new(project.terms_path())
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection.
    ///
    /// Never returns an error: a missing file yields the seed dataset, and
    /// unreadable or malformed content yields the seed dataset as well.
    pub fn load(&self) -> Loaded {
        if !self.path.exists() {
            return Loaded {
                terms: seed_terms().unwrap_or_default(),
                source: LoadSource::SeedMissing,
                dropped: 0,
            };
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => {
                return Loaded {
                    terms: seed_terms().unwrap_or_default(),
                    source: LoadSource::SeedCorrupt,
                    dropped: 0,
                }
            }
        };

        match serde_json::from_str::<Vec<Term>>(&content) {
            Ok(terms) => {
                let total = terms.len();
                let terms = Self::validate_records(terms);
                Loaded {
                    dropped: total - terms.len(),
                    terms,
                    source: LoadSource::Store,
                }
            }
            Err(_) => Loaded {
                terms: seed_terms().unwrap_or_default(),
                source: LoadSource::SeedCorrupt,
                dropped: 0,
            },
        }
    }

    /// Drop records that fail the shape check or reuse an earlier ID,
    /// keeping collection order otherwise.
    fn validate_records(terms: Vec<Term>) -> Vec<Term> {
        let mut seen: Vec<TermId> = Vec::with_capacity(terms.len());
        terms
            .into_iter()
            .filter(|t| {
                if !t.is_well_formed() || seen.contains(&t.id) {
                    return false;
                }
                seen.push(t.id);
                true
            })
            .collect()
    }

    /// Serialize the full collection and replace the prior content.
    ///
    /// Writes to a sibling temp file and renames it into place so a failed
    /// write never truncates existing data. A write failure does not roll
    /// back in-memory state; the caller surfaces it as a warning.
    pub fn save(&self, terms: &[Term]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(terms).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, TermDraft};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample(id: u32, term: &str) -> Term {
        Term::new(
            TermId::new(id),
            TermDraft {
                term: term.to_string(),
                reading: "よみ".to_string(),
                alias: None,
                english: "English".to_string(),
                meaning: "意味".to_string(),
                categories: vec![Category::General],
                image_url: None,
            },
            "alice",
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        )
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let store = TermStore::new(tmp.path().join("terms.json"));

        let mut terms = vec![sample(2, "金型"), sample(1, "射出成形")];
        terms[0].history.push(crate::entities::EditRecord {
            edited_by: "bob".to_string(),
            edited_at: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        });

        store.save(&terms).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.source, LoadSource::Store);
        assert_eq!(loaded.dropped, 0);
        assert_eq!(loaded.terms, terms);
    }

    #[test]
    fn test_load_missing_file_returns_seed() {
        let tmp = tempdir().unwrap();
        let store = TermStore::new(tmp.path().join("terms.json"));

        let loaded = store.load();
        assert_eq!(loaded.source, LoadSource::SeedMissing);
        assert!(!loaded.terms.is_empty());
    }

    #[test]
    fn test_load_malformed_content_returns_seed() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("terms.json");
        std::fs::write(&path, "{ not valid json ]").unwrap();

        let loaded = TermStore::new(path).load();
        assert_eq!(loaded.source, LoadSource::SeedCorrupt);
        assert!(!loaded.terms.is_empty());
    }

    #[test]
    fn test_load_drops_malformed_records() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("terms.json");

        // Second record has an empty category set
        let json = r#"[
            {"id": 2, "term": "金型", "reading": "かながた", "english": "Mold",
             "meaning": "型", "categories": ["resin_mold"]},
            {"id": 1, "term": "射出成形", "reading": "しゃしゅつせいけい",
             "english": "Injection Molding", "meaning": "工法", "categories": []}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let loaded = TermStore::new(path).load();
        assert_eq!(loaded.source, LoadSource::Store);
        assert_eq!(loaded.dropped, 1);
        assert_eq!(loaded.terms.len(), 1);
        assert_eq!(loaded.terms[0].id, TermId::new(2));
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("terms.json");

        let terms = vec![sample(1, "金型"), sample(1, "射出成形")];
        let json = serde_json::to_string(&terms).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = TermStore::new(path).load();
        assert_eq!(loaded.dropped, 1);
        assert_eq!(loaded.terms.len(), 1);
        assert_eq!(loaded.terms[0].term, "金型");
    }

    #[test]
    fn test_save_overwrites_prior_content() {
        let tmp = tempdir().unwrap();
        let store = TermStore::new(tmp.path().join("terms.json"));

        store.save(&[sample(1, "射出成形")]).unwrap();
        store.save(&[sample(2, "金型")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.terms.len(), 1);
        assert_eq!(loaded.terms[0].id, TermId::new(2));
    }

    #[test]
    fn test_save_to_unwritable_path_errors() {
        let store = TermStore::new(PathBuf::from("/nonexistent/dir/terms.json"));
        let err = store.save(&[sample(1, "射出成形")]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
