//! Core module - fundamental types and utilities

pub mod config;
pub mod identity;
pub mod project;
pub mod query;
pub mod repository;
pub mod seed;
pub mod selection;
pub mod session;
pub mod store;

pub use config::Config;
pub use identity::{IdParseError, TermId};
pub use project::{Project, ProjectError};
pub use query::{filter_terms, CategoryFilter, Query};
pub use repository::{RepositoryError, TermRepository};
pub use seed::{seed_terms, SeedError};
pub use selection::SelectionCoordinator;
pub use session::GlossarySession;
pub use store::{LoadSource, Loaded, StoreError, TermStore};
