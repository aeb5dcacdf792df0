mod config;

pub use config::{Config, DurationsConfig, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pomowidget[-dev]/` based on POMOWIDGET_ENV.
///
/// Set POMOWIDGET_ENV=dev to use the development directory. Nothing is
/// created on disk; the widget only ever reads from here.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;

    let env = std::env::var("POMOWIDGET_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomowidget-dev")
    } else {
        base_dir.join("pomowidget")
    };

    Ok(dir)
}
