use crate::{CONFIG_DIRECTORY, CONFIG_FILENAME, DATABASE_FILENAME, expand_tilde};
use anyhow::{Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `config.toml` in the config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library database location. Defaults to the config directory.
    pub database_path: Option<PathBuf>,
    pub log_level: String,
    /// Build the queue view on a worker thread.
    pub background_build: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            log_level: String::from("info"),
            background_build: true,
        }
    }
}

impl Config {
    /// Loads the user config, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str::<Config>(&file_str)?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILENAME))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => expand_tilde(path),
            None => dirs::config_dir()
                .map(|dir| dir.join(CONFIG_DIRECTORY).join(DATABASE_FILENAME))
                .ok_or_else(|| anyhow!("Config folder not present on system!")),
        }
    }

    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
