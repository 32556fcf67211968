//! Application configuration.
//!
//! The only meaningful knob is the API origin. Resolution order:
//! `ASSETDECK_API_URL` environment variable, then `~/.assetdeck/config.toml`,
//! then the default local backend.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Default backend origin, matching the development server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the REST backend, without a trailing slash.
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Config file path: `~/.assetdeck/config.toml`.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".assetdeck/config.toml")
    }

    /// Load config, applying the environment override last.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file(&Self::config_path())?;
        if let Ok(url) = env::var("ASSETDECK_API_URL") {
            if url.trim().is_empty() {
                return Err(CoreError::config("ASSETDECK_API_URL is set but empty"));
            }
            config.api_url = url;
        }
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    fn load_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| CoreError::toml_parse(path.clone(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
    }

    #[test]
    fn parses_config_toml() {
        let config: AppConfig = toml::from_str("api_url = \"https://assets.example.edu\"").unwrap();
        assert_eq!(config.api_url, "https://assets.example.edu");
    }
}
