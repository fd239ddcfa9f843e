use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    extract::extract_regions,
    parsers::go::parse_go_source,
    rewrite::{TagChange, rewrite_source},
};
use crate::config::InjectOptions;
use crate::utils::{line_col, source_line_at};

/// A tag change with its location, for previews and logs.
#[derive(Debug, Clone)]
pub struct LocatedChange {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
    pub change: TagChange,
}

/// Outcome of processing one file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    /// Number of edit regions extracted.
    pub regions: usize,
    pub changes: Vec<LocatedChange>,
    pub comments_removed: usize,
    /// True if the file on disk was rewritten.
    pub written: bool,
}

impl FileOutcome {
    pub fn is_modified(&self) -> bool {
        !self.changes.is_empty() || self.comments_removed > 0
    }
}

/// Inject tags into one file: read, parse, extract, rewrite, persist.
///
/// The file is only written when its contents change and `dry_run` is off.
/// Any parse or I/O failure is returned and leaves the file untouched.
pub fn process_file(path: &Path, options: &InjectOptions) -> Result<FileOutcome> {
    let file_path = path.to_string_lossy();
    if options.verbose {
        eprintln!("{} processing file: {}", "verbose:".dimmed(), file_path);
    }

    let source =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let (contents, mut outcome) = inject_source(&source, &file_path, options)?;

    if contents != source && !options.dry_run {
        fs::write(path, &contents)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        outcome.written = true;
        if options.verbose {
            eprintln!(
                "{} file {:?} is injected with custom tags",
                "verbose:".dimmed(),
                file_path
            );
        }
    }

    Ok(outcome)
}

/// Inject tags into in-memory source, returning the new contents.
pub fn inject_source(
    source: &[u8],
    file_path: &str,
    options: &InjectOptions,
) -> Result<(Vec<u8>, FileOutcome)> {
    let parsed = parse_go_source(source, file_path)?;
    let regions = extract_regions(&parsed, options);
    if options.verbose {
        eprintln!(
            "{} parsed file {:?}, number of fields to inject custom tags: {}",
            "verbose:".dimmed(),
            file_path,
            regions.len()
        );
    }

    let (contents, plan) = rewrite_source(source, &regions, options)?;

    let changes = plan
        .changes
        .into_iter()
        .map(|change| {
            let (line, col) = line_col(source, change.field.start);
            if options.verbose {
                eprintln!(
                    "{} inject custom tag {:?} at {}:{}",
                    "verbose:".dimmed(),
                    change.after,
                    file_path,
                    line
                );
            }
            LocatedChange {
                file_path: file_path.to_string(),
                line,
                col,
                source_line: source_line_at(source, change.field.start),
                change,
            }
        })
        .collect();

    Ok((
        contents,
        FileOutcome {
            regions: regions.len(),
            changes,
            comments_removed: plan.comments_removed,
            written: false,
        },
    ))
}
