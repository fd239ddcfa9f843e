//! Run tag injection for the parsed arguments.
//!
//! Resolves the configuration once, discovers the target files and processes
//! them one at a time in discovery order. The first parse or I/O error aborts
//! the run; files already rewritten stay rewritten.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::args::Arguments;
use crate::config::{Config, InjectOptions, load_config, load_config_file};
use crate::core::{LocatedChange, process_file, scan_files};

/// Aggregate result of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_modified: usize,
    pub comments_removed: usize,
    /// Missing or unreadable paths skipped during discovery.
    pub paths_skipped: usize,
    pub changes: Vec<LocatedChange>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn tags_injected(&self) -> usize {
        self.changes.len()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.dry_run && self.files_modified > 0
    }
}

/// Files to process, chosen from the CLI and config file.
#[derive(Debug, PartialEq, Eq)]
enum Targets {
    Dirs(Vec<String>),
    File(PathBuf),
}

pub fn run(args: Arguments) -> Result<RunSummary> {
    let config = resolve_config(&args)?;
    let options = resolve_options(&args, &config);

    let mut paths_skipped = 0;
    let files = match resolve_targets(&args, &config)? {
        Targets::File(path) => vec![path.to_string_lossy().into_owned()],
        Targets::Dirs(dirs) => {
            let scan = scan_files(&dirs, &config.ignores, options.verbose);
            if options.verbose {
                eprintln!(
                    "{} {} .pb.go files to process:\n{}",
                    "verbose:".dimmed(),
                    scan.files.len(),
                    scan.files.join("\n")
                );
            }
            paths_skipped = scan.skipped_count;
            scan.files
        }
    };

    let mut summary = RunSummary {
        paths_skipped,
        dry_run: options.dry_run,
        ..RunSummary::default()
    };
    for file in &files {
        let outcome = process_file(Path::new(file), &options)?;
        summary.files_processed += 1;
        if outcome.is_modified() {
            summary.files_modified += 1;
        }
        summary.comments_removed += outcome.comments_removed;
        summary.changes.extend(outcome.changes);
    }

    if options.verbose {
        eprintln!(
            "{} processed {} .pb.go file(s)",
            "verbose:".dimmed(),
            summary.files_processed
        );
    }

    Ok(summary)
}

fn resolve_config(args: &Arguments) -> Result<Config> {
    if let Some(path) = &args.config {
        return load_config_file(path);
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&cwd)?;
    if args.verbose
        && let Some(path) = &loaded.path
    {
        eprintln!("{} using config {}", "verbose:".dimmed(), path.display());
    }
    Ok(loaded.config)
}

/// CLI flags take precedence over the config file.
fn resolve_options(args: &Arguments, config: &Config) -> InjectOptions {
    let mut options = InjectOptions::from(config);
    if let Some(skip) = args.skip_list() {
        options.skip_fields = skip;
    }
    if let Some(prefix) = args.xxx_prefix.as_ref().filter(|p| !p.is_empty()) {
        options.skip_prefix = prefix.clone();
    }
    options.remove_comments |= args.with_clean;
    options.dry_run = args.dry_run;
    options.verbose = args.verbose;
    options
}

fn resolve_targets(args: &Arguments, config: &Config) -> Result<Targets> {
    if let Some(dirs) = args.dir_list() {
        return Ok(Targets::Dirs(dirs));
    }
    if let Some(input) = &args.input {
        return Ok(Targets::File(input.clone()));
    }
    if !config.dirs.is_empty() {
        return Ok(Targets::Dirs(config.dirs.clone()));
    }
    bail!("input file is mandatory (use --input <FILE> or --dirs <DIR~DIR>)")
}
