//! Configuration file loading with precedence handling.

use crate::cache::{RemeasurePolicy, DEFAULT_ESTIMATED_ROW_HEIGHT};
use crate::window::DEFAULT_OVERSCAN_RATIO;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but is outside its accepted range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rowcache/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial uniform row height for new caches.
    #[serde(default)]
    pub estimated_row_height: Option<f64>,

    /// `"once"` or `"always"`.
    #[serde(default)]
    pub remeasure_policy: Option<RemeasurePolicy>,

    /// Overscan as a fraction of the viewport.
    #[serde(default)]
    pub overscan_ratio: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults with the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial uniform row height.
    pub estimated_row_height: f64,
    /// Measurement acceptance policy for every cache.
    pub remeasure_policy: RemeasurePolicy,
    /// Overscan as a fraction of the viewport.
    pub overscan_ratio: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
            remeasure_policy: RemeasurePolicy::default(),
            overscan_ratio: DEFAULT_OVERSCAN_RATIO,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check that numeric settings are usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a non-positive or non-finite row estimate, or a
    /// negative or non-finite overscan ratio.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.estimated_row_height.is_finite() || self.estimated_row_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "estimated_row_height",
                reason: format!(
                    "must be a finite positive number (got {})",
                    self.estimated_row_height
                ),
            });
        }
        if !self.overscan_ratio.is_finite() || self.overscan_ratio < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "overscan_ratio",
                reason: format!(
                    "must be a finite non-negative number (got {})",
                    self.overscan_ratio
                ),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rowcache/rowcache.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rowcache").join("rowcache.log")
    } else {
        PathBuf::from("rowcache.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rowcache/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rowcache").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. Default path `~/.config/rowcache/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        estimated_row_height: config
            .estimated_row_height
            .unwrap_or(defaults.estimated_row_height),
        remeasure_policy: config
            .remeasure_policy
            .unwrap_or(defaults.remeasure_policy),
        overscan_ratio: config.overscan_ratio.unwrap_or(defaults.overscan_ratio),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
