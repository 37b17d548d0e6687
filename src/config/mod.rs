//! Configuration module for git-generate-authors
//!
//! This module handles:
//! - Project-level configuration (`authors.toml` / `.authorsrc.json`)
//! - User-level configuration (`~/.config/git-generate-authors/config.toml`)
//! - Bot pattern overrides
//! - CLI defaults

mod project_config;
mod user_config;

pub use project_config::{load_project_config, BotConfig, CliDefaults, ProjectConfig};
pub use user_config::UserConfig;

/// Merge user and project defaults (project wins).
pub fn layered_defaults(user: &UserConfig, project: &ProjectConfig) -> CliDefaults {
    let mut defaults = user.defaults.clone();
    defaults.merge(project.defaults.clone());
    defaults
}
