//! Dashboard configuration, loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "invalid config {path}: lookback_days = {value} is outside 0..={max}",
        max = MAX_LOOKBACK_DAYS
    )]
    LookbackOutOfRange { path: PathBuf, value: i64 },
}

/// Upper bound on `lookback_days` (about a century of history).
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// Top-level settings shared by the TUI and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Symbol pre-filled in the form on startup.
    pub default_symbol: String,
    /// Default start date is today minus this many days.
    pub lookback_days: i64,
    /// Rows shown in the recent-data preview.
    pub preview_rows: usize,
    /// Where saved CSV exports land.
    pub export_dir: PathBuf,
    pub provider: ProviderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".into(),
            lookback_days: 365,
            preview_rows: 5,
            export_dir: PathBuf::from("."),
            provider: ProviderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !(0..=MAX_LOOKBACK_DAYS).contains(&config.lookback_days) {
            return Err(ConfigError::LookbackOutOfRange {
                path: path.to_path_buf(),
                value: config.lookback_days,
            });
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// First day of the default window ending at `end`. The lookback is
    /// clamped to `0..=MAX_LOOKBACK_DAYS` and the result to chrono's range.
    pub fn lookback_start(&self, end: NaiveDate) -> NaiveDate {
        let days = self.lookback_days.clamp(0, MAX_LOOKBACK_DAYS);
        Duration::try_days(days)
            .and_then(|d| end.checked_sub_signed(d))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

/// Yahoo Finance endpoints and HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub chart_base_url: String,
    pub summary_base_url: String,
    pub cookie_url: String,
    pub crumb_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            chart_base_url: "https://query2.finance.yahoo.com".into(),
            summary_base_url: "https://query2.finance.yahoo.com".into(),
            cookie_url: "https://fc.yahoo.com".into(),
            crumb_url: "https://query2.finance.yahoo.com/v1/test/getcrumb".into(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}
