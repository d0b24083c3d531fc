//! Client configuration.
//!
//! Read from `<config_dir>/config.toml` when present. The API URL can be
//! overridden by `CRMC_API_URL` and then by `--api-url`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::platform::config_dir;

pub const DEFAULT_API_URL: &str = "https://api.crm.refine.dev/graphql";
pub const API_URL_ENV: &str = "CRMC_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply the env var and CLI flag, in that order of precedence (flag wins).
    pub fn with_overrides(mut self, env_url: Option<String>, flag_url: Option<&str>) -> Self {
        if let Some(url) = env_url.filter(|u| !u.is_empty()) {
            debug!("API URL from {}: {}", API_URL_ENV, url);
            self.api_url = url;
        }
        if let Some(url) = flag_url {
            debug!("API URL from --api-url: {}", url);
            self.api_url = url.to_string();
        }
        self
    }

    /// Load and apply overrides from the environment and `flag_url`.
    pub fn resolve(flag_url: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Ok(Self::load()?.with_overrides(env_url, flag_url))
    }
}

/// Get the path to the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
