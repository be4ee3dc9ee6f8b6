use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub feed: FeedConfig,
    pub lists: ListConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub endpoint: String,
    pub api_key: String,
    pub page_size: u32,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub default_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub history_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    pub interval_minutes: u64,
    pub breaking_window_hours: i64,
    pub country: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2".to_owned(),
            endpoint: "/top-headlines".to_owned(),
            api_key: "demo".to_owned(),
            page_size: 12,
            request_timeout_seconds: 10,
        }
    }
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_country: "us".to_owned(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { history_cap: 50 }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            breaking_window_hours: DEFAULT_BREAKING_WINDOW_HOURS,
            country: "us".to_owned(),
        }
    }
}

const MIN_WATCH_INTERVAL_MINUTES: u64 = 1;
const DEFAULT_BREAKING_WINDOW_HOURS: i64 = 2;

impl WatchConfig {
    /// Time between breaking-news checks, never shorter than one minute.
    pub fn interval(&self) -> Duration {
        let minutes = self.interval_minutes.max(MIN_WATCH_INTERVAL_MINUTES);
        if minutes != self.interval_minutes {
            warn!(configured = self.interval_minutes, minutes, "watch interval too short, clamping");
        }
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// How recent a headline must be to count as breaking. Non-positive or
    /// out-of-range values fall back to the default window.
    pub fn breaking_window(&self) -> chrono::Duration {
        let hours = self.breaking_window_hours;
        match chrono::Duration::try_hours(hours) {
            Some(window) if hours > 0 => window,
            _ => {
                warn!(configured = hours, "invalid breaking window, using default");
                chrono::Duration::hours(DEFAULT_BREAKING_WINDOW_HOURS)
            }
        }
    }
}

impl AppConfig {
    /// Directory holding the config file and the persisted lists.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("newsdesk"))
    }

    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join("config.json"))
    }

    /// Loads the user config, or writes and returns the defaults.
    pub fn load() -> Self {
        let path = match Self::config_file_path() {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "no config location, using defaults");
                return Self::default();
            }
        };

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                info!(error = %e, path = %path.display(), "config not loaded, using defaults");
                let config = Self::default();
                if let Err(save_err) = config.save_to(&path) {
                    warn!(error = %save_err, "failed to write default config");
                }
                config
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
