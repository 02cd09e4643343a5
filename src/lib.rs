use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

pub mod config;
pub mod database;
pub mod domain;
pub mod queue;

pub use config::Config;
pub use database::Database;
pub use queue::QueueView;

pub const CONFIG_DIRECTORY: &str = "Nowplaying";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const DATABASE_FILENAME: &str = "nowplaying.db";

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;

    if path_str == "~" {
        return Ok(home);
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading path with tilde (~): {path_str}"))
}
