//! CLI argument definitions using clap.
//!
//! The flag names follow the long-standing `protoc-go-inject-tag` surface
//! (`--input`, `--dirs`, `--XXX_skip`, `--with_clean`) so existing build
//! scripts keep working.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{parse_dir_list, parse_skip_list};

#[derive(Debug, Default, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Path to input file
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Inject tags in all .pb.go files in the specified tilde (~) separated
    /// dir list (includes subdirectories)
    #[arg(long, value_name = "DIR~DIR")]
    pub dirs: Option<String>,

    /// Comma separated tag keys to suppress (key:"-") on XXX fields
    #[arg(long = "XXX_skip", value_name = "KEYS")]
    pub xxx_skip: Option<String>,

    /// Field name prefix of bookkeeping fields (default: XXX)
    #[arg(long = "XXX_prefix", value_name = "PREFIX")]
    pub xxx_prefix: Option<String>,

    /// Remove @inject_tag comments from .pb.go files after injection
    #[arg(long = "with_clean")]
    pub with_clean: bool,

    /// Show what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (default: nearest .injecttagrc.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Directories from `--dirs`, split on `~`.
    pub fn dir_list(&self) -> Option<Vec<String>> {
        self.dirs
            .as_deref()
            .map(parse_dir_list)
            .filter(|dirs| !dirs.is_empty())
    }

    /// Skip list from `--XXX_skip`, split on `,`.
    pub fn skip_list(&self) -> Option<Vec<String>> {
        self.xxx_skip.as_deref().map(parse_skip_list)
    }
}
