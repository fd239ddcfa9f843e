use std::{collections::HashSet, path::Path};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::GENERATED_FILE_MARKER;

/// Result of scanning directories for generated files.
pub struct ScanResult {
    /// Matching files in discovery order.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Recursively collect generated `.pb.go` files under each directory.
///
/// Directories are walked in order, entries sorted by file name. Paths
/// matching an ignore pattern are skipped. Unreadable entries and missing
/// directories are reported as warnings (in verbose mode) and skipped;
/// discovery never fails.
pub fn scan_files(dirs: &[String], ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut files = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    let mut patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    for dir in dirs {
        let root = Path::new(dir);
        if !root.is_dir() {
            skipped_count += 1;
            if verbose {
                eprintln!(
                    "{} Cannot read directory: {}",
                    "warning:".bold().yellow(),
                    root.display()
                );
            }
            continue;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_generated_file(path) {
                continue;
            }

            let path_str = path.to_string_lossy();
            if patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }
            if seen.insert(path_str.to_string()) {
                files.push(path_str.into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_generated_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(GENERATED_FILE_MARKER))
}
