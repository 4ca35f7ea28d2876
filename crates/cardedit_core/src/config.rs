//! Editor preferences.
//!
//! # Responsibility
//! - Load editor preferences from JSON with defaults for missing keys.
//! - Validate values before any session uses them.
//!
//! # Invariants
//! - `display_transform_enabled = true` makes every session read-only.
//! - `log_level` is always one of `trace|debug|info|warn|error` after load.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Default label rendered for the sentinel entry.
pub const DEFAULT_ADD_TAG_LABEL: &str = "Add new tag";

/// Error while reading or validating editor preferences.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read editor config: {err}"),
            Self::Parse(err) => write!(f, "invalid editor config: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidLogLevel(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Preferences consulted when an edit session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Reshape field text for display; disables commit.
    pub display_transform_enabled: bool,
    /// Label shown for the "add new tag" entry.
    pub add_tag_label: String,
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            display_transform_enabled: false,
            add_tag_label: DEFAULT_ADD_TAG_LABEL.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl EditorConfig {
    /// Parses preferences from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.log_level = normalize_level(&config.log_level)
            .map_err(ConfigError::InvalidLogLevel)?
            .to_string();
        if config.add_tag_label.trim().is_empty() {
            config.add_tag_label = DEFAULT_ADD_TAG_LABEL.to_string();
        }
        Ok(config)
    }

    /// Reads and parses preferences from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Whether sessions opened with this config may commit.
    pub fn commit_allowed(&self) -> bool {
        !self.display_transform_enabled
    }
}
