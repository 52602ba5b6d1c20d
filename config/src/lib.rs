//! Configuration for Pulse, read from `~/.pulse/config.toml`.
//!
//! ```toml
//! [app]
//! today = "2021-03-10"      # fixed clock, mostly for demos and tests
//!
//! [navigation]
//! default_range_days = 7
//! degrade_window_days = 3
//!
//! [sources]
//! viewable = ["step_count", "hours_slept", "sleep_range", "heart_rate", "weight"]
//! ```
//!
//! `PULSE_CONFIG` overrides the file location. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use pulse_types::DataSource;

pub const CONFIG_PATH_ENV: &str = "PULSE_CONFIG";

pub const DEFAULT_RANGE_DAYS: u64 = 7;
pub const DEFAULT_DEGRADE_WINDOW_DAYS: u64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    pub app: Option<AppConfig>,
    pub navigation: Option<NavigationConfig>,
    pub sources: Option<SourcesConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Pin "today" instead of reading the system clock.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// Length of the startup and reset range, ending today.
    pub default_range_days: Option<u64>,
    /// Half-width of the window shown when a source has no intraday detail.
    pub degrade_window_days: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourcesConfig {
    /// Sources offered in the UI, in display order.
    #[serde(default)]
    pub viewable: Vec<DataSource>,
}

impl PulseConfig {
    /// Load from [`config_path`]. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn today(&self) -> Option<NaiveDate> {
        self.app.as_ref().and_then(|app| app.today)
    }

    #[must_use]
    pub fn default_range_days(&self) -> u64 {
        self.navigation
            .as_ref()
            .and_then(|nav| nav.default_range_days)
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_RANGE_DAYS)
    }

    #[must_use]
    pub fn degrade_window_days(&self) -> u64 {
        self.navigation
            .as_ref()
            .and_then(|nav| nav.degrade_window_days)
            .unwrap_or(DEFAULT_DEGRADE_WINDOW_DAYS)
    }

    /// Configured sources, or every source when the list is empty.
    #[must_use]
    pub fn viewable_sources(&self) -> Vec<DataSource> {
        match self.sources.as_ref() {
            Some(sources) if !sources.viewable.is_empty() => sources.viewable.clone(),
            _ => DataSource::ALL.to_vec(),
        }
    }
}

/// `$PULSE_CONFIG`, else `~/.pulse/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".pulse").join("config.toml"))
}

/// `logs/pulse.log` beside the config file.
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    let config = config_path()?;
    Some(config.parent()?.join("logs").join("pulse.log"))
}
