//! Run configuration, optionally loaded from a `recolor.toml` file.
//!
//! ```toml
//! prefixes = ["text", "bg", "border", "ring"]
//! attributes = ["className"]
//! extensions = ["jsx", "tsx"]
//! skip_dirs = ["node_modules", ".git"]
//! tie_break = "first"
//! on_match_error = "skip"
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lookup::DEFAULT_PREFIXES;
use crate::palette::TieBreak;

/// What to do when matching a fragment fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Warn, leave the fragment as-is and record it in the summary
    #[default]
    Skip,
    /// Stop the run
    Abort,
}

impl FailurePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(FailurePolicy::Skip),
            "abort" => Some(FailurePolicy::Abort),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrateConfig {
    /// Utility prefixes expanded for every color path
    pub prefixes: Vec<String>,
    /// JSX attributes holding class names
    pub attributes: Vec<String>,
    /// Source extensions scanned when a directory is given
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
    pub tie_break: TieBreak,
    pub on_match_error: FailurePolicy,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        MigrateConfig {
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            attributes: vec!["className".to_string()],
            extensions: vec!["jsx".to_string(), "tsx".to_string()],
            skip_dirs: vec!["node_modules".to_string(), ".git".to_string()],
            tie_break: TieBreak::default(),
            on_match_error: FailurePolicy::default(),
        }
    }
}

impl MigrateConfig {
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: MigrateConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: path.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Reject configurations that would silently do nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefixes.is_empty() {
            return Err(ConfigError::Invalid("`prefixes` must not be empty".to_string()));
        }
        if self.attributes.is_empty() {
            return Err(ConfigError::Invalid("`attributes` must not be empty".to_string()));
        }
        if self.prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid("`prefixes` must not contain empty entries".to_string()));
        }
        Ok(())
    }

    /// Whether `path` has one of the configured extensions
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}
