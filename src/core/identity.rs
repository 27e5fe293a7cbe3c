//! Record identity - sequential integer IDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A unique term identifier.
///
/// IDs are allocated by the repository as `max existing + 1` (or 1 for an
/// empty collection) and are never reused after a delete. Once assigned, an
/// ID is immutable for the life of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(u32);

impl TermId {
    /// Create a TermId from a raw integer
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The ID that follows this one in allocation order
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TermId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| IdParseError::NotANumber(s.to_string()))?;
        if value == 0 {
            return Err(IdParseError::Zero);
        }
        Ok(Self(value))
    }
}

/// Errors that can occur when parsing term IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid term ID: '{0}' (expected a positive integer)")]
    NotANumber(String),

    #[error("invalid term ID: 0 (IDs start at 1)")]
    Zero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id: TermId = "42".parse().unwrap();
        assert_eq!(id, TermId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing_trims_whitespace() {
        let id: TermId = " 7 ".parse().unwrap();
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        let err = "abc".parse::<TermId>().unwrap_err();
        assert!(matches!(err, IdParseError::NotANumber(_)));
    }

    #[test]
    fn test_id_parse_rejects_zero() {
        let err = "0".parse::<TermId>().unwrap_err();
        assert!(matches!(err, IdParseError::Zero));
    }

    #[test]
    fn test_id_next() {
        assert_eq!(TermId::new(3).next(), TermId::new(4));
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = TermId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
        let back: TermId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
