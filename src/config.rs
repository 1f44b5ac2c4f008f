//! Configuration module
//!
//! Reads `config.toml` (default `~/.config/paged-list/config.toml`, overridable
//! through `PAGED_LIST_CONFIG`). Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_SORT_COLUMN;
use crate::infrastructure::database::DatabaseConfig;

pub const CONFIG_PATH_ENV: &str = "PAGED_LIST_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Paging behaviour shared by every retrieval
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Column used when a request leaves `sort_column` blank
    pub default_sort_column: String,
    /// Largest accepted page size. Unset means no limit
    pub max_page_size: Option<u32>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_sort_column: DEFAULT_SORT_COLUMN.to_string(),
            max_page_size: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's targets ("debug"), or a full EnvFilter
    /// directive ("info,sea_orm=debug") used verbatim
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Targets raised to `level` when it is a bare level
    const CRATE_TARGETS: [&'static str; 2] = ["paged_list", "paged_list_demo"];

    /// EnvFilter directive for this config. A bare level applies to the
    /// crate's own targets while dependencies stay at `warn`.
    pub fn filter_directive(&self) -> String {
        let level = self.level.trim();
        if level.contains('=') || level.contains(',') {
            return level.to_string();
        }

        let mut directive = String::from("warn");
        for target in Self::CRATE_TARGETS {
            directive.push_str(&format!(",{}={}", target, level));
        }
        directive
    }

    pub fn is_json(&self) -> bool {
        self.format.trim().eq_ignore_ascii_case("json")
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paging: PagingConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `$PAGED_LIST_CONFIG`, or `<config dir>/paged-list/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paged-list")
        .join("config.toml")
}
