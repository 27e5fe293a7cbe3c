//! `kotoba export` command - dump the full glossary

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::cli::helpers::open_repository;
use crate::cli::GlobalOpts;
use crate::entities::Term;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Run the export command
pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;
    let terms = repo.all();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path).into_diagnostic()?),
        None => Box::new(std::io::stdout()),
    };

    match args.format {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(terms).into_diagnostic()?;
            writeln!(writer, "{}", json).into_diagnostic()?;
        }
        ExportFormat::Csv => write_csv(terms, &mut writer)?,
    }

    if let Some(path) = &args.output {
        if !global.quiet {
            eprintln!(
                "{} Exported {} term(s) to {}",
                style("✓").green(),
                style(terms.len()).cyan(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}

fn write_csv(terms: &[Term], writer: &mut dyn Write) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "term",
        "reading",
        "alias",
        "english",
        "meaning",
        "categories",
        "image_url",
        "created_by",
        "created_at",
        "edit_count",
    ])
    .into_diagnostic()?;

    for term in terms {
        let categories = term
            .categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(";");
        csv.write_record([
            term.id.to_string(),
            term.term.clone(),
            term.reading.clone(),
            term.alias.clone().unwrap_or_default(),
            term.english.clone(),
            term.meaning.clone(),
            categories,
            term.image_url.clone().unwrap_or_default(),
            term.created_by.clone().unwrap_or_default(),
            term.created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            term.history.len().to_string(),
        ])
        .into_diagnostic()?;
    }

    csv.flush().into_diagnostic()?;
    Ok(())
}
