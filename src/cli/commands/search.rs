//! `kotoba search` command - multi-field search across the glossary

use console::style;
use miette::Result;

use crate::cli::helpers::{category_list, open_repository, truncate_str};
use crate::cli::{CategoryArg, GlobalOpts};
use crate::core::query::{filter_terms, Query};

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search text (matches term, reading, english, meaning, and alias)
    pub query: String,

    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryArg,

    /// Limit number of results
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

/// Run the search command
pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;

    let query = Query {
        category: args.category.to_filter(),
        search: args.query.clone(),
    };
    let mut results = filter_terms(repo.all(), &query);
    results.truncate(args.limit);

    if args.count {
        println!("{}", results.len());
        return Ok(());
    }

    if results.is_empty() {
        println!("No matches for '{}'.", args.query);
        return Ok(());
    }

    for term in &results {
        println!(
            "{:<5} {} {} {}",
            style(term.id).cyan(),
            style(truncate_str(&term.term, 14)).white().bold(),
            style(truncate_str(&term.english, 24)).yellow(),
            style(truncate_str(&category_list(term), 28)).dim()
        );
        println!("      {}", truncate_str(&term.meaning, 70));
    }

    println!();
    println!("{} match(es).", style(results.len()).cyan());

    Ok(())
}
