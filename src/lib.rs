//! Kotoba: Glossary Toolkit
//!
//! A Unix-style toolkit for managing bilingual manufacturing glossaries
//! as a plain text JSON dataset with full audit history.

pub mod ai;
pub mod cli;
pub mod core;
pub mod entities;
