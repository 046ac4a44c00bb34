use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tilemap_editor_system_history::History;

/// Session settings read from a TOML file.
///
/// ```toml
/// [history]
/// capacity = 1024
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Undo history settings.
    pub history: HistoryConfig,
}

/// Undo history settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of undo snapshots kept in memory.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: History::DEFAULT_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Parses settings from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse session config toml contents")
    }

    /// Reads and parses the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid session config {}", path.display()))
    }
}
