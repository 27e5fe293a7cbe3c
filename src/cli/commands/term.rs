//! `kotoba term` command - glossary term management

use base64::Engine as _;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::helpers::{
    category_list, escape_csv, open_repository, truncate_str, warn_if_save_failed,
};
use crate::cli::{CategoryArg, GlobalOpts, OutputFormat};
use crate::core::identity::TermId;
use crate::core::query::{filter_terms, Query};
use crate::core::repository::TermRepository;
use crate::core::Config;
use crate::entities::{Category, Term, TermDraft};

#[derive(Subcommand, Debug)]
pub enum TermCommands {
    /// List terms with filtering
    List(ListArgs),

    /// Create a new term
    New(NewArgs),

    /// Show a term's details
    Show(ShowArgs),

    /// Edit a term (appends to its audit history)
    Edit(EditArgs),

    /// Delete a term
    Delete(DeleteArgs),

    /// Show a term's audit history
    History(HistoryArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryArg,

    /// Search across term, reading, english, meaning, and alias
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "auto")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// The term itself (Japanese)
    #[arg(long, short = 't')]
    pub term: Option<String>,

    /// Furigana reading
    #[arg(long, short = 'r')]
    pub reading: Option<String>,

    /// Informal alias / common name
    #[arg(long)]
    pub alias: Option<String>,

    /// English translation
    #[arg(long, short = 'e')]
    pub english: Option<String>,

    /// Meaning / definition text
    #[arg(long, short = 'm')]
    pub meaning: Option<String>,

    /// Category (repeatable)
    #[arg(long, short = 'c')]
    pub category: Vec<String>,

    /// Reference image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Embed a local image file as a data URI
    #[arg(long, conflicts_with = "image_url")]
    pub image_file: Option<PathBuf>,

    /// Operator attribution (default: config operator)
    #[arg(long, short = 'O')]
    pub operator: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Term ID
    pub id: String,

    /// Output format
    #[arg(long, short = 'o', default_value = "auto")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Term ID
    pub id: String,

    /// New term text
    #[arg(long, short = 't')]
    pub term: Option<String>,

    /// New furigana reading
    #[arg(long, short = 'r')]
    pub reading: Option<String>,

    /// New alias (pass an empty string to clear)
    #[arg(long)]
    pub alias: Option<String>,

    /// New English translation
    #[arg(long, short = 'e')]
    pub english: Option<String>,

    /// New meaning text
    #[arg(long, short = 'm')]
    pub meaning: Option<String>,

    /// Replace the whole category set (repeatable)
    #[arg(long, short = 'c')]
    pub category: Vec<String>,

    /// Add a category (repeatable)
    #[arg(long)]
    pub add_category: Vec<String>,

    /// Remove a category (repeatable)
    #[arg(long)]
    pub remove_category: Vec<String>,

    /// New reference image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Embed a local image file as a data URI
    #[arg(long, conflicts_with = "image_url")]
    pub image_file: Option<PathBuf>,

    /// Remove the reference image
    #[arg(long, conflicts_with_all = ["image_url", "image_file"])]
    pub clear_image: bool,

    /// Operator attribution (default: config operator)
    #[arg(long, short = 'O')]
    pub operator: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Term ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Term ID
    pub id: String,
}

/// Run a term subcommand
pub fn run(cmd: TermCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TermCommands::List(args) => run_list(args, global),
        TermCommands::New(args) => run_new(args, global),
        TermCommands::Show(args) => run_show(args, global),
        TermCommands::Edit(args) => run_edit(args, global),
        TermCommands::Delete(args) => run_delete(args, global),
        TermCommands::History(args) => run_history(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;

    let query = Query {
        category: args.category.to_filter(),
        search: args.search.unwrap_or_default(),
    };
    let mut terms = filter_terms(repo.all(), &query);

    if let Some(limit) = args.limit {
        terms.truncate(limit);
    }

    if args.count {
        println!("{}", terms.len());
        return Ok(());
    }

    if terms.is_empty() {
        println!("No terms found.");
        return Ok(());
    }

    let format = if args.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        args.format
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&terms).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&terms).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,term,reading,alias,english,meaning,categories");
            for term in &terms {
                println!(
                    "{},{},{},{},{},{},{}",
                    term.id,
                    escape_csv(&term.term),
                    escape_csv(&term.reading),
                    escape_csv(term.alias.as_deref().unwrap_or_default()),
                    escape_csv(&term.english),
                    escape_csv(&term.meaning),
                    escape_csv(&category_list(term)),
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<5} {:<16} {:<22} {:<24} {:<24}",
                style("ID").bold(),
                style("TERM").bold(),
                style("ENGLISH").bold(),
                style("MEANING").bold(),
                style("CATEGORIES").bold()
            );
            println!("{}", "-".repeat(96));

            for term in &terms {
                println!(
                    "{:<5} {:<16} {:<22} {:<24} {:<24}",
                    style(term.id).cyan(),
                    truncate_str(&term.term, 14),
                    truncate_str(&term.english, 20),
                    truncate_str(&term.meaning, 22),
                    truncate_str(&category_list(term), 22),
                );
            }

            println!();
            println!("{} term(s) found.", style(terms.len()).cyan());
        }
        OutputFormat::Id => {
            for term in &terms {
                println!("{}", term.id);
            }
        }
        OutputFormat::Md => {
            println!("| ID | Term | Reading | English | Meaning | Categories |");
            println!("|---|---|---|---|---|---|");
            for term in &terms {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    term.id,
                    term.term,
                    term.reading,
                    term.english,
                    truncate_str(&term.meaning, 40),
                    category_list(term),
                );
            }
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut repo = open_repository(global)?;
    let config = Config::load();

    let draft;
    let operator;

    if args.interactive || args.term.is_none() {
        // Interactive mode
        use dialoguer::{Input, MultiSelect};

        let term: String = Input::new()
            .with_prompt("Term (Japanese)")
            .interact_text()
            .into_diagnostic()?;

        let reading: String = Input::new()
            .with_prompt("Reading (furigana)")
            .interact_text()
            .into_diagnostic()?;

        let english: String = Input::new()
            .with_prompt("English")
            .interact_text()
            .into_diagnostic()?;

        let meaning: String = Input::new()
            .with_prompt("Meaning")
            .interact_text()
            .into_diagnostic()?;

        let alias: String = Input::new()
            .with_prompt("Alias (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let labels: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        let mut defaults = vec![false; labels.len()];
        defaults[0] = true;
        let picked = MultiSelect::new()
            .with_prompt("Categories")
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .into_diagnostic()?;
        let categories: Vec<Category> =
            picked.into_iter().map(|i| Category::all()[i]).collect();

        operator = Input::new()
            .with_prompt("Operator name")
            .default(config.operator())
            .interact_text()
            .into_diagnostic()?;

        draft = TermDraft {
            term,
            reading,
            alias: Some(alias),
            english,
            meaning,
            categories,
            image_url: None,
        };
    } else {
        let categories = parse_categories(&args.category)?;
        let image_url = match args.image_file {
            Some(path) => Some(image_data_uri(&path)?),
            None => args.image_url,
        };

        draft = TermDraft {
            term: args.term.unwrap_or_default(),
            reading: args.reading.unwrap_or_default(),
            alias: args.alias,
            english: args.english.unwrap_or_default(),
            meaning: args.meaning.unwrap_or_default(),
            categories,
            image_url,
        };
        operator = args.operator.unwrap_or_else(|| config.operator());
    }

    let term = repo
        .create(draft, &operator)
        .map_err(|e| miette::miette!("{}", e))?;
    warn_if_save_failed(&mut repo, global);

    println!(
        "{} Created term {} {}",
        style("✓").green(),
        style(term.id).cyan(),
        style(&term.term).white()
    );
    println!(
        "   {} | {} | {}",
        style(&term.reading).dim(),
        style(&term.english).yellow(),
        style(category_list(&term)).dim()
    );

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;
    let id = parse_id(&args.id)?;

    let term = repo
        .get(id)
        .ok_or_else(|| miette::miette!("No term found with ID {}", id))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(term).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(term).into_diagnostic()?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let mut repo = open_repository(global)?;
    let config = Config::load();
    let id = parse_id(&args.id)?;

    let existing = repo
        .get(id)
        .ok_or_else(|| miette::miette!("No term found with ID {}", id))?;
    let mut draft = existing.to_draft();

    let nothing_to_do = args.term.is_none()
        && args.reading.is_none()
        && args.alias.is_none()
        && args.english.is_none()
        && args.meaning.is_none()
        && args.category.is_empty()
        && args.add_category.is_empty()
        && args.remove_category.is_empty()
        && args.image_url.is_none()
        && args.image_file.is_none()
        && !args.clear_image;
    if nothing_to_do {
        return Err(miette::miette!(
            "Nothing to edit. Pass at least one field flag (see 'kotoba term edit --help')."
        ));
    }

    if let Some(term) = args.term {
        draft.term = term;
    }
    if let Some(reading) = args.reading {
        draft.reading = reading;
    }
    if let Some(alias) = args.alias {
        // An empty string clears the alias during normalization
        draft.alias = Some(alias);
    }
    if let Some(english) = args.english {
        draft.english = english;
    }
    if let Some(meaning) = args.meaning {
        draft.meaning = meaning;
    }

    if !args.category.is_empty() {
        draft.categories = parse_categories(&args.category)?;
    }
    for cat in parse_categories(&args.add_category)? {
        if !draft.categories.contains(&cat) {
            draft.categories.push(cat);
        }
    }
    for cat in parse_categories(&args.remove_category)? {
        draft.categories.retain(|c| *c != cat);
    }

    if args.clear_image {
        draft.image_url = None;
    } else if let Some(path) = args.image_file {
        draft.image_url = Some(image_data_uri(&path)?);
    } else if let Some(url) = args.image_url {
        draft.image_url = Some(url);
    }

    let operator = args.operator.unwrap_or_else(|| config.operator());
    let updated = repo
        .update(id, draft, &operator)
        .map_err(|e| miette::miette!("{}", e))?;
    warn_if_save_failed(&mut repo, global);

    println!(
        "{} Updated term {} {} ({} edit(s) on record)",
        style("✓").green(),
        style(updated.id).cyan(),
        style(&updated.term).white(),
        updated.history.len()
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut repo = open_repository(global)?;
    let id = parse_id(&args.id)?;

    if !args.yes {
        let label = repo
            .get(id)
            .map(|t| t.term.clone())
            .unwrap_or_else(|| "<unknown>".to_string());
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete term {} {}?", id, label))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Deleting an absent ID is an idempotent no-op, not an error
    if repo.delete(id) {
        println!("{} Deleted term {}", style("✓").green(), style(id).cyan());
    } else {
        println!("No term with ID {} (nothing to do).", id);
    }
    warn_if_save_failed(&mut repo, global);

    Ok(())
}

fn run_history(args: HistoryArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;
    let id = parse_id(&args.id)?;

    let term = repo
        .get(id)
        .ok_or_else(|| miette::miette!("No term found with ID {}", id))?;

    println!(
        "{} {} ({})",
        style(term.id).cyan(),
        style(&term.term).white().bold(),
        term.english
    );

    match (&term.created_by, &term.created_at) {
        (Some(by), Some(at)) => {
            println!("  created {} by {}", at.format("%Y-%m-%d"), style(by).yellow())
        }
        (Some(by), None) => println!("  created by {}", style(by).yellow()),
        _ => println!("  created {}", style("(no attribution on record)").dim()),
    }

    if term.history.is_empty() {
        println!("  no edits on record");
        return Ok(());
    }

    for (i, record) in term.history.iter().enumerate() {
        println!(
            "  {} edited {} by {}",
            style(format!("#{}", i + 1)).dim(),
            record.edited_at.format("%Y-%m-%d"),
            style(&record.edited_by).yellow()
        );
    }

    Ok(())
}

// Helper functions

fn parse_id(raw: &str) -> Result<TermId> {
    raw.parse::<TermId>().map_err(|e| miette::miette!("{}", e))
}

fn parse_categories(raw: &[String]) -> Result<Vec<Category>> {
    raw.iter()
        .map(|s| s.parse::<Category>().map_err(|e| miette::miette!("{}", e)))
        .collect()
}

/// Embed a local image file as a `data:` URI
fn image_data_uri(path: &Path) -> Result<String> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        other => {
            return Err(miette::miette!(
                "Unsupported image extension '{}' (use png, jpg, gif, webp, or svg)",
                other.unwrap_or("")
            ))
        }
    };

    let bytes = std::fs::read(path).into_diagnostic()?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

/// Look up a term or fail with a uniform message (shared with explain)
pub(crate) fn require_term(repo: &TermRepository, raw_id: &str) -> Result<Term> {
    let id = parse_id(raw_id)?;
    repo.get(id)
        .cloned()
        .ok_or_else(|| miette::miette!("No term found with ID {}", id))
}
