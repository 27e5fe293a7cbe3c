//! Shared helper functions for CLI commands

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::repository::TermRepository;
use crate::core::store::{LoadSource, TermStore};
use crate::entities::Term;

/// Open the project's repository, reporting load-time fallbacks.
///
/// Load never fails; corrupt data degrades to the seed dataset with a
/// stderr warning, and malformed records are dropped with a count.
pub fn open_repository(global: &GlobalOpts) -> Result<TermRepository> {
    let project =
        Project::resolve(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
    let repo = TermRepository::open(TermStore::for_project(&project));

    if !global.quiet {
        match repo.load_source() {
            LoadSource::SeedCorrupt => eprintln!(
                "{} stored glossary data was unreadable; starting from the seed dataset",
                style("warning:").yellow().bold()
            ),
            LoadSource::SeedMissing if global.verbose => eprintln!(
                "{} no stored glossary data; starting from the seed dataset",
                style("note:").dim()
            ),
            _ => {}
        }
        if repo.dropped_on_load() > 0 {
            eprintln!(
                "{} dropped {} malformed record(s) from the stored glossary",
                style("warning:").yellow().bold(),
                repo.dropped_on_load()
            );
        }
    }

    Ok(repo)
}

/// Report a failed persistence write as a warning.
///
/// In-memory state stays authoritative for the session; the operation
/// itself is not rolled back.
pub fn warn_if_save_failed(repo: &mut TermRepository, global: &GlobalOpts) {
    if let Some(err) = repo.take_save_warning() {
        if !global.quiet {
            eprintln!("{} {}", style("warning:").yellow().bold(), err);
        }
    }
}

/// Truncate a string to a maximum number of characters, adding an
/// ellipsis if truncated. Character-based so multi-byte Japanese text
/// never splits mid-glyph.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Join a term's categories for single-line display
pub fn category_list(term: &Term) -> String {
    term.categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_ascii() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello w…");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_is_char_safe() {
        assert_eq!(truncate_str("しゃしゅつせいけい", 5), "しゃしゅ…");
        assert_eq!(truncate_str("金型", 8), "金型");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
