//! Report formatting and printing utilities.
//!
//! Separate from the core so inject-tag can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::run::RunSummary;
use crate::core::LocatedChange;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the run summary.
///
/// Dry runs always print a preview; real runs only report in verbose mode.
pub fn print(summary: &RunSummary, verbose: bool) {
    print_to(summary, verbose, &mut io::stdout().lock());
}

/// Print the run summary to a custom writer.
pub fn print_to<W: Write>(summary: &RunSummary, verbose: bool, writer: &mut W) {
    if summary.dry_run {
        print_preview(summary, writer);
    } else if verbose {
        print_applied(summary, writer);
    }
}

fn print_applied<W: Write>(summary: &RunSummary, writer: &mut W) {
    let msg = format!(
        "Injected {} tag(s) in {} of {} file(s)",
        summary.tags_injected(),
        summary.files_modified,
        summary.files_processed
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
    if summary.comments_removed > 0 {
        let _ = writeln!(
            writer,
            "  - removed {} @inject_tag comment(s)",
            summary.comments_removed
        );
    }
    if summary.paths_skipped > 0 {
        let _ = writeln!(
            writer,
            "  - skipped {} unreadable path(s)",
            summary.paths_skipped
        );
    }
}

fn print_preview<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.files_modified == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} file(s) - all tags up to date",
                summary.files_processed
            )
            .green()
        );
        return;
    }

    let max_line_width = summary
        .changes
        .iter()
        .map(|c| c.line.to_string().len())
        .max()
        .unwrap_or(1);

    for change in &summary.changes {
        print_change(change, writer, max_line_width);
    }

    let _ = writeln!(
        writer,
        "{} {} tag(s) in {} file(s).",
        "Would inject".yellow().bold(),
        summary.tags_injected(),
        summary.files_modified
    );
    if summary.comments_removed > 0 {
        let _ = writeln!(
            writer,
            "  - would remove {} @inject_tag comment(s)",
            summary.comments_removed
        );
    }
    let _ = writeln!(writer, "Run without {} to apply.", "--dry-run".cyan());
}

fn print_change<W: Write>(change: &LocatedChange, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        change.file_path,
        change.line,
        change.col
    );
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        change.line.to_string().blue(),
        "|".blue(),
        change.source_line,
        width = max_line_width
    );

    // Caret under the field (col is 1-based)
    let prefix: String = change
        .source_line
        .chars()
        .take(change.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".yellow(),
        width = max_line_width,
        padding = caret_padding
    );

    let before = change.change.before.as_deref().unwrap_or("<no tag>");
    let _ = writeln!(
        writer,
        "{:>width$} {} {} `{}`",
        "",
        "=".blue(),
        "before:".bold(),
        before,
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {} `{}`",
        "",
        "=".blue(),
        "after:".bold().cyan(),
        change.change.after,
        width = max_line_width
    );
    let _ = writeln!(writer);
}
