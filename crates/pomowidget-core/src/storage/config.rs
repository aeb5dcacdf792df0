//! TOML-based widget configuration.
//!
//! Seeds the widget at startup:
//! - Initial focus and break durations
//! - Progress mode and tick interval
//! - Whether the expiry chime sounds
//!
//! Configuration is read from `~/.config/pomowidget/config.toml` and is never
//! written back; duration changes made in the widget last for the process only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::config_dir;
use crate::error::ConfigError;
use crate::timer::{Durations, ProgressMode, DEFAULT_BREAK, DEFAULT_FOCUS};

/// Initial durations in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_focus")]
    pub focus: u32,
    #[serde(default = "default_break", rename = "break")]
    pub break_: u32,
}

/// Tick loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default)]
    pub progress_mode: ProgressMode,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Widget configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_focus() -> u32 {
    DEFAULT_FOCUS
}
fn default_break() -> u32 {
    DEFAULT_BREAK
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            focus: default_focus(),
            break_: default_break(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            progress_mode: ProgressMode::default(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { sound: true }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, or defaults if no file exists there.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// it holds durations an adjuster could never produce.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Check that every value is usable by the widget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_durations()?;
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn initial_durations(&self) -> Result<Durations, ConfigError> {
        Durations::new(self.durations.focus, self.durations.break_)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timer.tick_interval_ms)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
