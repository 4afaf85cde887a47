//! Config file for the quotes commands.
//!
//! Loaded from:
//! - the file given with `--config` / `-c`, or
//! - `QUOTES_CONFIG` when set, or
//! - `~/.quotes.toml` when it exists.
//!
//! ## Precedence
//!
//! 1. CLI flags (only when explicitly passed)
//! 2. Config file
//! 3. Built-in defaults
//!
//! ## Format
//!
//! The file extension decides the format (`.toml` or `.json`). Without an
//! extension, `--config-type` does.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable overriding the default config file path.
pub const ENV_CONFIG: &str = "QUOTES_CONFIG";
/// Config file name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".quotes.toml";
/// Format used when neither the extension nor `--config-type` says.
pub const DEFAULT_CONFIG_TYPE: &str = "toml";

/// Settings that can come from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuotesConfig {
    /// Default proxy URL.
    pub proxy: Option<String>,
    /// Number of workers.
    pub workers: Option<i32>,
    /// Database used to save the quotes.
    pub database: Option<String>,
    /// Result mode.
    pub mode: Option<String>,
    /// Sources to get the quotes from.
    pub sources: Vec<String>,
    /// Isins to get the quotes of.
    pub isins: Vec<String>,
}

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    Toml,
    Json,
}

impl ConfigType {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of `path`: its extension when it has one, `config_type`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the chosen format is not supported.
    pub fn detect(path: &Path, config_type: &str) -> Result<Self> {
        let requested = path
            .extension()
            .and_then(OsStr::to_str)
            .filter(|ext| !ext.is_empty())
            .unwrap_or(config_type);
        Self::from_arg(requested).ok_or_else(|| Error::Config {
            path: path.display().to_string(),
            message: format!(
                "unsupported config type {requested:?}: accepted values are TOML and JSON"
            ),
        })
    }
}

impl QuotesConfig {
    /// Load the config file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the file cannot be read or decoded.
    pub fn load_from(path: &Path, config_type: &str) -> Result<Self> {
        let format = ConfigType::detect(path, config_type)?;
        tracing::debug!(?path, ?format, "Loading config file");

        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let decoded: std::result::Result<Self, String> = match format {
            ConfigType::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
            ConfigType::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| Error::Config {
            path: path.display().to_string(),
            message: format!("invalid config file: {message}"),
        })
    }

    /// The config to use for one invocation.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// only if the file is there.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when a file is selected but cannot be loaded.
    pub fn discover(path: &str, config_type: &str) -> Result<Option<Self>> {
        if !path.is_empty() {
            return Self::load_from(Path::new(path), config_type).map(Some);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load_from(&path, config_type).map(Some),
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(None)
            }
        }
    }
}

/// Default config file path: `QUOTES_CONFIG`, else `~/.quotes.toml`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var(ENV_CONFIG)
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE))
}
