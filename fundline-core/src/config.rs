//! Configuration management
//!
//! Settings live in `<data dir>/settings.json`:
//! ```json
//! {
//!   "account": { "dormancyThresholdSeconds": 2592000 },
//!   "logging": { "enabled": true }
//! }
//! ```
//! Keys this crate does not manage are kept untouched on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Thirty days
pub const DEFAULT_DORMANCY_THRESHOLD_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Environment override for the dormancy threshold, in seconds
pub const DORMANCY_ENV_VAR: &str = "FUNDLINE_DORMANCY_SECONDS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    account: AccountSettings,
    #[serde(default)]
    logging: LoggingSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dormancy_threshold_seconds: Option<i64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingSettings {
    #[serde(default = "default_true")]
    enabled: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Fundline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Inactivity after which an ACTIVE account becomes DORMANT
    pub dormancy_threshold: Duration,
    /// Whether account events are written to logs.duckdb
    pub logging_enabled: bool,
    /// Threshold taken from the environment at load; never written back
    env_threshold: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dormancy_threshold: Duration::seconds(DEFAULT_DORMANCY_THRESHOLD_SECONDS),
            logging_enabled: true,
            env_threshold: None,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The threshold comes from, in order: `FUNDLINE_DORMANCY_SECONDS`,
    /// settings.json, the 30 day default.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let env_seconds = match std::env::var(DORMANCY_ENV_VAR) {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("{} must be a whole number of seconds", DORMANCY_ENV_VAR))?,
            ),
            Err(_) => None,
        };

        let (dormancy_threshold, env_threshold) = match env_seconds {
            Some(seconds) => {
                let threshold = threshold_from_seconds(seconds)?;
                (threshold, Some(threshold))
            }
            None => {
                let seconds = raw
                    .account
                    .dormancy_threshold_seconds
                    .unwrap_or(DEFAULT_DORMANCY_THRESHOLD_SECONDS);
                (threshold_from_seconds(seconds)?, None)
            }
        };

        Ok(Self {
            dormancy_threshold,
            logging_enabled: raw.logging.enabled,
            env_threshold,
        })
    }

    /// Save config to the data directory
    ///
    /// A threshold that still holds the value loaded from
    /// `FUNDLINE_DORMANCY_SECONDS` leaves the saved threshold as it was.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");
        let mut settings = read_settings(data_dir)?;

        if self.env_threshold != Some(self.dormancy_threshold) {
            settings.account.dormancy_threshold_seconds = Some(self.dormancy_threshold.num_seconds());
        }
        settings.logging.enabled = self.logging_enabled;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {:?}", settings_path))?;
        Ok(())
    }

    /// Replace the dormancy threshold
    pub fn with_dormancy_threshold(mut self, threshold: Duration) -> Self {
        self.dormancy_threshold = threshold;
        self.env_threshold = None;
        self
    }

    /// Set the dormancy threshold from a number of seconds
    pub fn set_dormancy_seconds(&mut self, seconds: i64) -> Result<()> {
        self.dormancy_threshold = threshold_from_seconds(seconds)?;
        self.env_threshold = None;
        Ok(())
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn threshold_from_seconds(seconds: i64) -> Result<Duration> {
    if seconds < 0 {
        bail!("Dormancy threshold cannot be negative: {}", seconds);
    }
    Duration::try_seconds(seconds)
        .with_context(|| format!("Dormancy threshold out of range: {}", seconds))
}
