//! Project-level configuration support
//!
//! Loads per-project configuration from `authors.toml` or `.authorsrc.json`
//! in the repository root.
//!
//! # Configuration Format
//!
//! ```toml
//! # authors.toml
//!
//! [defaults]
//! output = "AUTHORS"
//! sort = "commits"          # first-commit, last-commit, commits, name, email
//! strategy = "alias-set"    # alias-set, email, name-email
//! format = "text"           # text, json
//! keep_bots = false
//! skip_mailmap = false
//!
//! [bots]
//! patterns = ["^ci-runner$", "(?i)automation$"]
//! keep = ["Robo-Bot"]       # display names never treated as bots
//! ```

use crate::resolver::BotFilter;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["authors.toml", ".authorsrc.json"];

/// Project-level configuration loaded from authors.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,

    /// Bot detection overrides
    #[serde(default)]
    pub bots: BotConfig,
}

/// Default CLI flags that can be set in config files
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct CliDefaults {
    /// Output file path ("-" for stdout)
    #[serde(default)]
    pub output: Option<String>,

    /// Sort key
    #[serde(default)]
    pub sort: Option<String>,

    /// Identity strategy
    #[serde(default)]
    pub strategy: Option<String>,

    /// Output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Keep bots by default
    #[serde(default)]
    pub keep_bots: Option<bool>,

    /// Ignore .mailmap by default
    #[serde(default)]
    pub skip_mailmap: Option<bool>,
}

impl CliDefaults {
    /// Merge another set of defaults into this one (other takes priority)
    pub fn merge(&mut self, other: CliDefaults) {
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.sort.is_some() {
            self.sort = other.sort;
        }
        if other.strategy.is_some() {
            self.strategy = other.strategy;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.keep_bots.is_some() {
            self.keep_bots = other.keep_bots;
        }
        if other.skip_mailmap.is_some() {
            self.skip_mailmap = other.skip_mailmap;
        }
    }
}

/// Bot detection configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BotConfig {
    /// Extra regexes matched against final display names
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Display names never treated as bots (case-insensitive)
    #[serde(default)]
    pub keep: Vec<String>,
}

impl BotConfig {
    /// Build the bot filter, failing on an invalid pattern
    pub fn filter(&self) -> anyhow::Result<BotFilter> {
        BotFilter::new(&self.patterns, &self.keep).context("Invalid pattern in [bots] config")
    }
}

/// Load project configuration from the repository root.
///
/// Searches for configuration files in this order:
/// 1. `authors.toml`
/// 2. `.authorsrc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = repo_path.join(CONFIG_FILE_NAMES[0]);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = repo_path.join(CONFIG_FILE_NAMES[1]);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests;
