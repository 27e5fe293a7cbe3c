//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    browse::BrowseArgs,
    completions::CompletionsArgs,
    explain::ExplainArgs,
    export::ExportArgs,
    init::InitArgs,
    search::SearchArgs,
    status::StatusArgs,
    term::TermCommands,
};
use crate::core::query::CategoryFilter;
use crate::entities::Category;

#[derive(Parser)]
#[command(name = "kotoba")]
#[command(author, version, about = "Kotoba Glossary Toolkit")]
#[command(long_about = "A Unix-style toolkit for managing bilingual manufacturing glossaries as a plain text JSON dataset with full audit history.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .kotoba/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new Kotoba glossary project
    Init(InitArgs),

    /// Term management (list, create, edit, delete, audit history)
    #[command(subcommand)]
    Term(TermCommands),

    /// Search terms across every text field
    Search(SearchArgs),

    /// Browse the glossary interactively
    Browse(BrowseArgs),

    /// Ask the AI explanation service about a term
    Explain(ExplainArgs),

    /// Export the full glossary
    Export(ExportArgs),

    /// Show glossary status and per-category counts
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

/// Category filter accepted by list/search/browse
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryArg {
    #[default]
    All,
    General,
    Alj,
    Toyota,
    ResinMolding,
    ResinMold,
    Design,
    Other,
}

impl CategoryArg {
    /// The query-engine filter this argument denotes
    pub fn to_filter(self) -> CategoryFilter {
        match self {
            CategoryArg::All => CategoryFilter::All,
            CategoryArg::General => CategoryFilter::Only(Category::General),
            CategoryArg::Alj => CategoryFilter::Only(Category::AljSpecialized),
            CategoryArg::Toyota => CategoryFilter::Only(Category::ToyotaTerms),
            CategoryArg::ResinMolding => CategoryFilter::Only(Category::ResinMolding),
            CategoryArg::ResinMold => CategoryFilter::Only(Category::ResinMold),
            CategoryArg::Design => CategoryFilter::Only(Category::DesignSpecialized),
            CategoryArg::Other => CategoryFilter::Only(Category::Other),
        }
    }
}
