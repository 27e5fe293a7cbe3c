//! `kotoba browse` command - interactive glossary session
//!
//! Drives the glossary session: the list tracks the active query, and the
//! selection follows the filtered view as it changes.

use console::style;
use dialoguer::{Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{category_list, open_repository};
use crate::cli::{CategoryArg, GlobalOpts};
use crate::core::query::CategoryFilter;
use crate::core::session::GlossarySession;
use crate::entities::{Category, Term};

#[derive(clap::Args, Debug)]
pub struct BrowseArgs {
    /// Initial category filter
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryArg,

    /// Initial search text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Run the browse command
pub fn run(args: BrowseArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;
    let mut session = GlossarySession::new(repo);
    session.set_category_filter(args.category.to_filter());
    if let Some(search) = args.search {
        session.set_search_text(search);
    }

    loop {
        let visible: Vec<_> = session
            .filtered()
            .iter()
            .map(|t| (t.id, format!("{:>4}  {} ({})", t.id, t.term, t.english)))
            .collect();
        let active_index = session
            .active()
            .and_then(|a| visible.iter().position(|(id, _)| *id == a.id));

        let mut items: Vec<String> = visible.iter().map(|(_, label)| label.clone()).collect();
        let action_base = items.len();
        items.push("[ set category filter ]".to_string());
        items.push("[ set search text ]".to_string());
        items.push("[ quit ]".to_string());

        let prompt = format!(
            "{} of {} terms (category: {}, search: '{}')",
            session.filtered().len(),
            session.record_count(),
            filter_label(session.query().category),
            session.query().search
        );

        let choice = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(active_index.unwrap_or(0))
            .interact()
            .into_diagnostic()?;

        if choice < action_base {
            session.select(visible[choice].0);
            if let Some(term) = session.active() {
                print_detail(term);
            }
        } else if choice == action_base {
            let mut labels = vec!["all".to_string()];
            labels.extend(Category::all().iter().map(|c| c.as_str().to_string()));
            let picked = Select::new()
                .with_prompt("Category")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;
            let filter = if picked == 0 {
                CategoryFilter::All
            } else {
                CategoryFilter::Only(Category::all()[picked - 1])
            };
            session.set_category_filter(filter);
        } else if choice == action_base + 1 {
            let text: String = Input::new()
                .with_prompt("Search (empty to clear)")
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            session.set_search_text(text);
        } else {
            break;
        }
    }

    Ok(())
}

fn filter_label(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "all",
        CategoryFilter::Only(cat) => cat.as_str(),
    }
}

fn print_detail(term: &Term) {
    println!();
    println!(
        "{} {} ({})",
        style(term.id).cyan(),
        style(&term.term).white().bold(),
        style(&term.reading).dim()
    );
    if let Some(ref alias) = term.alias {
        println!("  alias:      {}", alias);
    }
    println!("  english:    {}", style(&term.english).yellow());
    println!("  meaning:    {}", term.meaning);
    println!("  categories: {}", style(category_list(term)).dim());
    if let Some(ref image) = term.image_url {
        if image.starts_with("data:") {
            println!("  image:      (embedded data URI)");
        } else {
            println!("  image:      {}", image);
        }
    }
    if let (Some(by), Some(at)) = (&term.created_by, &term.created_at) {
        println!("  created:    {} by {}", at.format("%Y-%m-%d"), by);
    }
    if !term.history.is_empty() {
        let last = &term.history[term.history.len() - 1];
        println!(
            "  edits:      {} (last {} by {})",
            term.history.len(),
            last.edited_at.format("%Y-%m-%d"),
            last.edited_by
        );
    }
    println!();
}
