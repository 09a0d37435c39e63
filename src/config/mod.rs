//! User-level configuration loaded from `~/.linkshelf/config.toml`.
//!
//! The file is optional; every field falls back to a built-in default, and
//! command-line flags win over anything set here.
mod loader;

pub use loader::{load_config_from, load_user_config};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] Box<toml::de::Error>),
}

/// `[store]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Directory holding the document store.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// `[server]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub server: ServerSection,
}

fn linkshelf_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".linkshelf")
}

/// Resolve the canonical path for the user config file.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".linkshelf").join("config.toml"))
}

/// Data directory used when neither the CLI nor the config file sets one.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    linkshelf_home().join("data")
}

/// Log directory used when the CLI does not set one.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    linkshelf_home().join("logs")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
