//! Term entity type - one glossary entry with its audit trail

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::TermId;

/// Topical category tags a term can carry.
///
/// Closed set of seven domain tags; a term holds one or more of them,
/// non-exclusively. The set is not user-extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// General vocabulary
    General,
    /// ALJ company-specialized vocabulary
    AljSpecialized,
    /// Toyota Production System vocabulary
    ToyotaTerms,
    /// Resin molding process
    ResinMolding,
    /// Resin mold / die tooling
    ResinMold,
    /// Design-specialized vocabulary
    DesignSpecialized,
    /// Everything else
    Other,
}

impl Category {
    /// Get the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::AljSpecialized => "alj_specialized",
            Category::ToyotaTerms => "toyota_terms",
            Category::ResinMolding => "resin_molding",
            Category::ResinMold => "resin_mold",
            Category::DesignSpecialized => "design_specialized",
            Category::Other => "other",
        }
    }

    /// Canonical Japanese label for the category
    pub fn label_ja(&self) -> &'static str {
        match self {
            Category::General => "一般",
            Category::AljSpecialized => "ALJ専門",
            Category::ToyotaTerms => "トヨタ用語",
            Category::ResinMolding => "樹脂成型",
            Category::ResinMold => "樹脂金型",
            Category::DesignSpecialized => "設計専門",
            Category::Other => "その他",
        }
    }

    /// Get all valid categories
    pub fn all() -> &'static [Category] {
        &[
            Category::General,
            Category::AljSpecialized,
            Category::ToyotaTerms,
            Category::ResinMolding,
            Category::ResinMold,
            Category::DesignSpecialized,
            Category::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "general" => Ok(Category::General),
            "alj" | "alj_specialized" => Ok(Category::AljSpecialized),
            "toyota" | "toyota_terms" => Ok(Category::ToyotaTerms),
            "resin_molding" => Ok(Category::ResinMolding),
            "resin_mold" => Ok(Category::ResinMold),
            "design" | "design_specialized" => Ok(Category::DesignSpecialized),
            "other" => Ok(Category::Other),
            _ => Err(format!(
                "Unknown category: {}. Use general, alj_specialized, toyota_terms, resin_molding, resin_mold, design_specialized, or other",
                s
            )),
        }
    }
}

/// One historical modification event on a term.
///
/// Immutable once created; the repository appends exactly one per update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// Who made the edit (free-text attribution, not an identity)
    pub edited_by: String,

    /// When the edit happened
    pub edited_at: NaiveDate,
}

/// A glossary term record.
///
/// `id`, `created_by`, and `created_at` are assigned by the repository on
/// create and never change afterwards; `history` is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Unique identifier, repository-assigned
    pub id: TermId,

    /// The term itself (Japanese)
    pub term: String,

    /// Furigana reading
    pub reading: String,

    /// Informal alias / common name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// English translation
    pub english: String,

    /// Meaning / definition text
    pub meaning: String,

    /// Topical categories, at least one at all times
    pub categories: Vec<Category>,

    /// Reference image: remote URL or embedded data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Who created the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// When the record was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Append-only audit trail, insertion order = chronological order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<EditRecord>,
}

impl Term {
    /// Build a new term from a validated draft.
    ///
    /// The caller (repository) supplies the allocated ID, the operator
    /// attribution, and the creation date. History starts empty.
    pub fn new(id: TermId, draft: TermDraft, operator: &str, today: NaiveDate) -> Self {
        Self {
            id,
            term: draft.term,
            reading: draft.reading,
            alias: draft.alias,
            english: draft.english,
            meaning: draft.meaning,
            categories: draft.categories,
            image_url: draft.image_url,
            created_by: Some(operator.to_string()),
            created_at: Some(today),
            history: Vec::new(),
        }
    }

    /// The draft equivalent of this record (everything except identity,
    /// creation stamps, and history). Useful as the starting point for an
    /// edit that only changes some fields.
    pub fn to_draft(&self) -> TermDraft {
        TermDraft {
            term: self.term.clone(),
            reading: self.reading.clone(),
            alias: self.alias.clone(),
            english: self.english.clone(),
            meaning: self.meaning.clone(),
            categories: self.categories.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Shape check applied to records read back from the store
    pub fn is_well_formed(&self) -> bool {
        !self.term.trim().is_empty()
            && !self.reading.trim().is_empty()
            && !self.english.trim().is_empty()
            && !self.meaning.trim().is_empty()
            && !self.categories.is_empty()
    }
}

/// Create/update payload for a term.
///
/// Deliberately carries no `id`, `created_by`, `created_at`, or `history`:
/// those are owned by the repository, so a caller cannot overwrite them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermDraft {
    pub term: String,
    pub reading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub english: String,
    pub meaning: String,
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TermDraft {
    /// Trim text fields, drop empty optionals, and dedup categories
    /// preserving first-seen order.
    pub fn normalized(mut self) -> Self {
        self.term = self.term.trim().to_string();
        self.reading = self.reading.trim().to_string();
        self.english = self.english.trim().to_string();
        self.meaning = self.meaning.trim().to_string();
        self.alias = self
            .alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self.image_url = self
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let mut seen = Vec::with_capacity(self.categories.len());
        for cat in self.categories {
            if !seen.contains(&cat) {
                seen.push(cat);
            }
        }
        self.categories = seen;
        self
    }

    /// Check the draft against the entity invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.term.trim().is_empty() {
            return Err(ValidationError::EmptyField("term"));
        }
        if self.reading.trim().is_empty() {
            return Err(ValidationError::EmptyField("reading"));
        }
        if self.english.trim().is_empty() {
            return Err(ValidationError::EmptyField("english"));
        }
        if self.meaning.trim().is_empty() {
            return Err(ValidationError::EmptyField("meaning"));
        }
        if self.categories.is_empty() {
            return Err(ValidationError::EmptyCategories);
        }
        Ok(())
    }
}

/// Errors raised when a draft or operator fails the entity invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("at least one category is required")]
    EmptyCategories,

    #[error("operator name is required")]
    MissingOperator,
}
