//! Configuration file loading and settings resolution
//!
//! Settings come from, in order of precedence: command-line flags (and the
//! `OPENWEATHER_API_KEY` environment variable), an optional JSON config file,
//! and built-in defaults. The config file lives at `--config` or in the
//! XDG config directory (`~/.config/cityweather/config.json` on Linux).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::{Cli, StartupConfig};
use crate::data::ClientConfig;
use crate::history::{HistoryStore, DEFAULT_HISTORY_FILE};
use crate::units::TemperatureUnit;

/// Name of the config file inside the config directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors loading or resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid JSON for [`FileConfig`]
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No API key was given anywhere
    #[error("no API key configured; pass --api-key, set OPENWEATHER_API_KEY, or add \"api_key\" to the config file")]
    MissingApiKey,

    /// A zero timeout would fail every request
    #[error("timeout must be at least one second")]
    InvalidTimeout,
}

/// Window front end behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Save every successful lookup to history
    pub save_history: bool,
    /// Show the classified failure instead of a generic "City not found"
    pub detailed_errors: bool,
}

/// Contents of the JSON config file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub history_file: Option<PathBuf>,
    pub units: Option<TemperatureUnit>,
    pub window: WindowConfig,
}

impl FileConfig {
    /// Returns the default config file path, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "cityweather")?;
        Some(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Reads a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config the user asked for
    ///
    /// An explicit path must exist. The default path is optional: if it is
    /// missing (or unknown) the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Treats a whitespace-only value as unset
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key, if any source provided one
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub history_file: PathBuf,
    pub unit: TemperatureUnit,
    pub window: WindowConfig,
}

impl Settings {
    /// Merges command-line values over the config file
    pub fn resolve(cli: &Cli, startup: &StartupConfig, file: FileConfig) -> Result<Self, ConfigError> {
        let timeout_secs = cli.timeout.or(file.timeout_secs);
        if timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(Settings {
            api_key: non_blank(cli.api_key.clone()).or_else(|| non_blank(file.api_key)),
            base_url: cli.base_url.clone().or(file.base_url),
            timeout: timeout_secs.map(Duration::from_secs),
            history_file: cli
                .history_file
                .clone()
                .or(file.history_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
            unit: startup.unit.or(file.units).unwrap_or_default(),
            window: file.window,
        })
    }

    /// Builds the fetch configuration; fails if no API key is set
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)?;
        let mut config = ClientConfig::new(api_key);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    /// History store at the configured path
    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::new(&self.history_file)
    }
}
