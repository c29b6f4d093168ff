//! Application configuration
//!
//! Covers where the webhook settings are stored and how the process logs and
//! talks to the network. The webhook URL and API key themselves are user
//! settings, kept by [`crate::settings`], not here.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_SETTINGS_PATH: &str = "CONTRACT_DESK_SETTINGS_PATH";
pub const ENV_LOG_LEVEL: &str = "CONTRACT_DESK_LOG_LEVEL";
pub const ENV_TIMEOUT_SECS: &str = "CONTRACT_DESK_TIMEOUT_SECS";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ontop", "contract-desk")
}

/// Default location of the persisted webhook settings
pub fn default_settings_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("settings.json"))
        .unwrap_or_else(|| PathBuf::from(".contract-desk").join("settings.json"))
}

/// Default location of the configuration file, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub settings_path: PathBuf,
    pub log_level: Option<String>,
    /// Unset means the HTTP client's own default applies
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            log_level: None,
            request_timeout_secs: None,
        }
    }
}

/// A loaded configuration plus what happened while loading it
///
/// Loading runs before logging is set up, so notes are kept here and
/// logged by the caller once a subscriber is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Load from `path`, or from the default config file when `path` is `None`,
    /// then apply environment overrides.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
        let source = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let warnings = config.merge_env_vars();
        Ok(LoadedConfig {
            config,
            source,
            warnings,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn merge_env_vars(&mut self) -> Vec<String> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source; returns the
    /// overrides that were ignored, one message each
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(path) = lookup(ENV_SETTINGS_PATH).filter(|p| !p.trim().is_empty()) {
            self.settings_path = PathBuf::from(path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.trim().is_empty()) {
            self.log_level = Some(level);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => warnings.push(format!(
                    "Ignoring {ENV_TIMEOUT_SECS}={raw:?}: not a number of seconds"
                )),
            }
        }

        warnings
    }

    /// Zero counts as unset: the HTTP client's default applies
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
