//! Application configuration management
//!
//! Two sources feed the checker:
//!
//! - Runtime settings (timeouts, BOJ endpoint, log filter) come from
//!   environment variables, with a `.env` file honored. Command-line flags
//!   override them in `main`.
//! - Language overrides come from a JSON checker config file that maps
//!   extensions to compile/run command templates.

use std::collections::HashMap;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BOJ_BASE_URL, DEFAULT_COMPILE_TIMEOUT_SECS,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_RUN_TIMEOUT_SECS,
};
use crate::error::{AppError, AppResult};
use crate::judge::{ExecutionLimits, LanguageConfig, LanguageDescriptor, LanguageRegistry};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub boj: BojConfig,
    pub execution: ExecutionConfig,
    pub log_filter: String,
}

/// Sample source configuration
#[derive(Debug, Clone)]
pub struct BojConfig {
    pub base_url: String,
    pub http_timeout_secs: u64,
}

/// Process execution limits
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    pub run_timeout_secs: u64,
    pub compile_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            boj: BojConfig {
                base_url: lookup("BOJ_CHECKER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BOJ_BASE_URL.to_string()),
                http_timeout_secs: parse_var(
                    &lookup,
                    "BOJ_CHECKER_HTTP_TIMEOUT_SECS",
                    DEFAULT_HTTP_TIMEOUT_SECS,
                )?,
            },
            execution: ExecutionConfig {
                run_timeout_secs: parse_var(
                    &lookup,
                    "BOJ_CHECKER_RUN_TIMEOUT_SECS",
                    DEFAULT_RUN_TIMEOUT_SECS,
                )?,
                compile_timeout_secs: parse_var(
                    &lookup,
                    "BOJ_CHECKER_COMPILE_TIMEOUT_SECS",
                    DEFAULT_COMPILE_TIMEOUT_SECS,
                )?,
            },
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl ExecutionConfig {
    pub fn limits(&self) -> ExecutionLimits {
        ExecutionLimits {
            compile_timeout: Duration::from_secs(self.compile_timeout_secs),
            run_timeout: Duration::from_secs(self.run_timeout_secs),
        }
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Default checker config location: `$XDG_CONFIG_HOME/boj-checker/config.json`,
/// falling back to `$HOME/.config/boj-checker/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    default_config_path_from(|key| env::var_os(key).map(PathBuf::from))
}

fn default_config_path_from(lookup: impl Fn(&str) -> Option<PathBuf>) -> Option<PathBuf> {
    let base = lookup("XDG_CONFIG_HOME")
        .filter(|path| path.is_absolute())
        .or_else(|| lookup("HOME").map(|home| home.join(".config")))?;
    Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Checker config file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    pub language_configs: Vec<LanguageConfigEntry>,
}

/// One language override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfigEntry {
    pub extension: String,
    pub config: LanguageConfig,
}

impl CheckerConfig {
    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read the config file at `path`.
    ///
    /// A missing or unreadable file yields an empty config; a file that
    /// was read but does not parse is an error.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No checker config file");
                return Ok(Self::default());
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot read checker config, using defaults"
                );
                return Ok(Self::default());
            }
        };

        Self::from_json(&content).map_err(|e| {
            AppError::Configuration(format!("{}: {}", path.display(), e))
        })
    }

    /// Validate entries and turn them into descriptors keyed by extension.
    /// Later entries for the same extension replace earlier ones.
    pub fn overrides(self) -> AppResult<HashMap<String, LanguageDescriptor>> {
        self.language_configs
            .into_iter()
            .map(|entry| {
                if entry.extension.is_empty() {
                    return Err(AppError::Configuration(
                        "language config with empty extension".to_string(),
                    ));
                }
                let descriptor = LanguageDescriptor::from_config(&entry.extension, entry.config)?;
                Ok((entry.extension, descriptor))
            })
            .collect()
    }

    /// Built-in registry with this config's overrides applied
    pub fn into_registry(self) -> AppResult<LanguageRegistry> {
        Ok(LanguageRegistry::builtin().with_overrides(self.overrides()?))
    }
}
