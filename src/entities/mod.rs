//! Entity definitions

pub mod term;

pub use term::{Category, EditRecord, Term, TermDraft, ValidationError};
