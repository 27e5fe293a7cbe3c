//! `kotoba init` command - create a new glossary project

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::project::{Project, ProjectError};
use crate::core::store::TermStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Reinitialize even if a project already exists
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Start with an empty dataset instead of the built-in seed glossary
    #[arg(long)]
    pub empty: bool,
}

/// Run the init command
pub fn run(args: InitArgs) -> Result<()> {
    let project = if args.force {
        Project::init_force(&args.path).map_err(|e| miette::miette!("{}", e))?
    } else {
        match Project::init(&args.path) {
            Ok(project) => project,
            Err(ProjectError::AlreadyExists(root)) => {
                println!(
                    "Kotoba project already exists at {} (use --force to reinitialize).",
                    style(root.display()).cyan()
                );
                return Ok(());
            }
            Err(e) => return Err(miette::miette!("{}", e)),
        }
    };

    if args.empty {
        TermStore::for_project(&project)
            .save(&[])
            .map_err(|e| miette::miette!("{}", e))?;
    }

    println!(
        "{} Initialized Kotoba project at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    if args.empty {
        println!("   starting with an empty glossary");
    } else {
        println!("   the built-in seed glossary loads on first use");
    }

    Ok(())
}
