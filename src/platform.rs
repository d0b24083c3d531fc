use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

fn dirs_home() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// Get the data directory for crmc (session token storage)
pub fn data_dir() -> Result<PathBuf> {
    let dir = if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("crmc")
    } else if let Some(home) = dirs_home() {
        if cfg!(target_os = "macos") {
            home.join("Library").join("Application Support").join("crmc")
        } else {
            // Linux (including WSL)
            home.join(".local").join("share").join("crmc")
        }
    } else {
        bail!("Cannot determine data directory");
    };

    Ok(dir)
}

/// Get the config directory for crmc (`config.toml`)
pub fn config_dir() -> Result<PathBuf> {
    let dir = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("crmc")
    } else if let Ok(appdata) = env::var("APPDATA") {
        PathBuf::from(appdata).join("crmc")
    } else if let Some(home) = dirs_home() {
        home.join(".config").join("crmc")
    } else {
        bail!("Cannot determine config directory");
    };

    Ok(dir)
}
