use crate::checker::CheckerConfig;
use crate::error::{Result, UpdateNotifierError};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no current version is configured
pub const CURRENT_VERSION_ENV: &str = "UPDATE_NOTIFIER_CURRENT_VERSION";

/// Represents the complete configuration for update-notifier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerSection,

    #[serde(default)]
    pub storage: StorageSection,
}

fn default_check_interval_hours() -> u64 {
    24
}

fn default_history_limit() -> usize {
    20
}

/// Settings for the update-check schedule and classification.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CheckerSection {
    /// Version of the running application; falls back to the environment
    #[serde(default)]
    pub current_version: Option<String>,

    #[serde(default = "default_check_interval_hours")]
    pub check_interval_hours: u64,

    #[serde(default)]
    pub include_prereleases: bool,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for CheckerSection {
    fn default() -> Self {
        CheckerSection {
            current_version: None,
            check_interval_hours: default_check_interval_hours(),
            include_prereleases: false,
            history_limit: default_history_limit(),
        }
    }
}

/// Where persisted state lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct StorageSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.check_interval().is_none() {
            return Err(UpdateNotifierError::config(format!(
                "check_interval_hours is out of range: {}",
                self.checker.check_interval_hours
            )));
        }
        if let Some(version) = &self.checker.current_version {
            if version.trim().is_empty() {
                return Err(UpdateNotifierError::config(
                    "current_version must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// The configured check interval, if representable.
    pub fn check_interval(&self) -> Option<Duration> {
        i64::try_from(self.checker.check_interval_hours)
            .ok()
            .and_then(Duration::try_hours)
    }

    /// Version of the running application.
    ///
    /// Resolved from, in order: the config file, the
    /// `UPDATE_NOTIFIER_CURRENT_VERSION` environment variable, and this
    /// crate's own package version.
    pub fn current_version(&self) -> String {
        self.checker
            .current_version
            .clone()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                env::var(CURRENT_VERSION_ENV)
                    .ok()
                    .filter(|v| !v.trim().is_empty())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }

    /// Path of the state file, falling back to the user's data directory.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage
            .path
            .clone()
            .or_else(crate::storage::FileStorage::default_path)
    }

    /// Build the checker configuration from this file's values.
    pub fn checker_config(&self) -> Result<CheckerConfig> {
        let check_interval = self.check_interval().ok_or_else(|| {
            UpdateNotifierError::config("check_interval_hours is out of range")
        })?;

        Ok(CheckerConfig {
            current_version: self.current_version(),
            check_interval,
            include_prereleases: self.checker.include_prereleases,
            history_limit: self.checker.history_limit,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `update-notifier.toml` in current directory
/// 3. `update-notifier/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./update-notifier.toml").exists() {
        fs::read_to_string("./update-notifier.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("update-notifier").join("config.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
