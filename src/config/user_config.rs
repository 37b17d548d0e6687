//! User-level configuration for git-generate-authors
//!
//! Loaded from `~/.config/git-generate-authors/config.toml`. Project config
//! and command-line flags take priority over anything set here.

use super::CliDefaults;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub defaults: CliDefaults,
}

impl UserConfig {
    /// Load the user config, falling back to defaults when absent or invalid
    pub fn load() -> Self {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("Ignoring user config {}: {:#}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load a user config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded user config from {}", path.display());
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("git-generate-authors").join("config.toml"))
    }
}
