use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".injecttagrc.json";

/// Substring that marks a generated protobuf Go file.
pub const GENERATED_FILE_MARKER: &str = ".pb.go";

/// Name prefix of bookkeeping fields emitted by legacy protoc-gen-go.
pub const DEFAULT_SKIP_PREFIX: &str = "XXX";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories searched recursively for generated files.
    #[serde(default)]
    pub dirs: Vec<String>,
    /// Glob patterns of paths to leave untouched.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Tag keys suppressed (`key:"-"`) on bookkeeping fields.
    #[serde(default)]
    pub xxx_skip: Vec<String>,
    #[serde(default = "default_xxx_prefix")]
    pub xxx_prefix: String,
    /// Remove `@inject_tag` comments once injected.
    #[serde(default)]
    pub with_clean: bool,
}

fn default_xxx_prefix() -> String {
    DEFAULT_SKIP_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            ignores: Vec::new(),
            xxx_skip: Vec::new(),
            xxx_prefix: default_xxx_prefix(),
            with_clean: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        if self.xxx_prefix.is_empty() {
            anyhow::bail!("'xxxPrefix' must not be empty");
        }
        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, None if using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: load_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// Options for one run, resolved once from the config file and CLI flags.
///
/// Passed by reference into extraction and rewriting.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// Tag keys suppressed on bookkeeping fields. Empty disables suppression.
    pub skip_fields: Vec<String>,
    /// Field name prefix identifying bookkeeping fields.
    pub skip_prefix: String,
    /// Remove consumed `@inject_tag` comments.
    pub remove_comments: bool,
    /// Preview changes without writing files.
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            skip_fields: Vec::new(),
            skip_prefix: default_xxx_prefix(),
            remove_comments: false,
            dry_run: false,
            verbose: false,
        }
    }
}

impl From<&Config> for InjectOptions {
    fn from(config: &Config) -> Self {
        Self {
            skip_fields: config.xxx_skip.clone(),
            skip_prefix: config.xxx_prefix.clone(),
            remove_comments: config.with_clean,
            ..Self::default()
        }
    }
}

/// Split a comma separated skip list, dropping empty entries.
pub fn parse_skip_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Split a tilde separated directory list, dropping empty entries.
pub fn parse_dir_list(value: &str) -> Vec<String> {
    value
        .split('~')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
