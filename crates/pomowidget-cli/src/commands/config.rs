use std::path::Path;

use clap::Subcommand;
use pomowidget_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "durations.focus", "timer.progress_mode")
        key: String,
    },
    /// List all config values
    List,
    /// Print the path the config is read from
    Path,
}

/// Load from an explicit path, or from the default location.
pub fn load(path: Option<&Path>) -> Result<Config, pomowidget_core::ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

pub fn run(action: ConfigAction, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = load(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::List => {
            let config = load(path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            let resolved = match path {
                Some(path) => path.to_path_buf(),
                None => Config::default_path()?,
            };
            println!("{}", resolved.display());
        }
    }
    Ok(())
}
