//! Handles the configuration of the daemon.
//!
//! Settings are layered: the `Setlist.toml` file first, then `SETLIST_` environment
//! variables, then whatever was passed on the command line.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr};

use crate::playlist::history::DEFAULT_CAPACITY;

pub static DEFAULT_CONFIG: &str = include_str!("../../Setlist.toml");

const CONFIG_FILE_NAME: &str = "Setlist.toml";

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// General Daemon Settings
    #[serde(default)]
    pub daemon: DaemonSettings,
}

impl Settings {
    /// Load settings from the config file, environment variables, and CLI arguments.
    ///
    /// Environment variables are prefixed with `SETLIST_`, and nested keys are separated
    /// with a double underscore, e.g. `SETLIST_DAEMON__HISTORY_CAPACITY=25`.
    ///
    /// # Arguments
    ///
    /// * `config` - Path to the config file.
    /// * `log_level` - Log level from the command line, overrides everything else.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or if the config file is
    /// invalid.
    #[inline]
    pub fn init(config: PathBuf, log_level: Option<log::LevelFilter>) -> Result<Self, ConfigError> {
        Self::init_with_env(config, environment(), log_level)
    }

    fn init_with_env(
        config: PathBuf,
        env: Environment,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(env)
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        if let Some(log_level) = log_level {
            settings.daemon.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found, or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        match crate::get_config_dir() {
            Ok(config_dir) => {
                if !config_dir.exists() {
                    std::fs::create_dir_all(&config_dir)?;
                }
                let config_file = config_dir.join(CONFIG_FILE_NAME);

                if !config_file.exists() {
                    std::fs::write(&config_file, DEFAULT_CONFIG)?;
                }

                Ok(config_file)
            }
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::NotFound, e)),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SETLIST")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DaemonSettings {
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
    /// How many plays each playlist's recently played history keeps.
    /// Default is 10.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: NonZeroUsize,
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

const fn default_history_capacity() -> NonZeroUsize {
    DEFAULT_CAPACITY
}

impl Default for DaemonSettings {
    #[inline]
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            history_capacity: default_history_capacity(),
        }
    }
}
