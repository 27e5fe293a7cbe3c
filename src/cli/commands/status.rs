//! `kotoba status` command - glossary dashboard

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::open_repository;
use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::store::LoadSource;
use crate::entities::Category;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

/// Run the status command
pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let project =
        Project::resolve(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let repo = open_repository(global)?;

    println!("{}", style("Kotoba Glossary Status").bold());
    println!("  dataset: {}", style(project.terms_path().display()).cyan());
    match repo.load_source() {
        LoadSource::Store => {}
        LoadSource::SeedMissing | LoadSource::SeedCorrupt => {
            println!("  source:  {}", style("built-in seed dataset").yellow());
        }
    }
    println!("  records: {}", style(repo.len()).cyan());

    let edits: usize = repo.all().iter().map(|t| t.history.len()).sum();
    println!("  edits:   {}", style(edits).cyan());
    println!();

    let mut builder = Builder::default();
    builder.push_record(["Category", "Label", "Terms"]);
    for cat in Category::all() {
        let count = repo
            .all()
            .iter()
            .filter(|t| t.categories.contains(cat))
            .count();
        builder.push_record([
            cat.as_str().to_string(),
            cat.label_ja().to_string(),
            count.to_string(),
        ]);
    }

    println!("{}", builder.build().with(Style::sharp()));

    Ok(())
}
