//! `kotoba explain` command - AI commentary on one term
//!
//! Purely advisory: a failed request is shown inline and never affects
//! the stored glossary.

use console::style;
use miette::Result;
use std::sync::Arc;

use crate::ai::{ExplanationTask, GeminiClient};
use crate::cli::commands::term::require_term;
use crate::cli::helpers::open_repository;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    /// Term ID
    pub id: String,

    /// Model to use (default: config model)
    #[arg(long)]
    pub model: Option<String>,
}

/// Run the explain command
pub fn run(args: ExplainArgs, global: &GlobalOpts) -> Result<()> {
    let repo = open_repository(global)?;
    let term = require_term(&repo, &args.id)?;

    let config = Config::load();
    let model = args.model.unwrap_or_else(|| config.model());

    let client = match GeminiClient::new(config.api_key(), model.clone()) {
        Ok(client) => client,
        Err(e) => {
            print_inline_error(&e.to_string());
            return Ok(());
        }
    };

    if !global.quiet {
        println!(
            "Requesting explanation for {} {} ({})...",
            style(term.id).cyan(),
            style(&term.term).white().bold(),
            style(&model).dim()
        );
    }

    let task = ExplanationTask::spawn(Arc::new(client), term);
    match task.wait() {
        Some(Ok(text)) => {
            println!();
            println!("{}", text);
        }
        Some(Err(e)) => print_inline_error(&e.to_string()),
        None => print_inline_error("the explanation worker exited without a result"),
    }

    Ok(())
}

fn print_inline_error(message: &str) {
    eprintln!(
        "{} explanation unavailable: {}",
        style("✗").red().bold(),
        message
    );
}
