//! Application configuration management.
//!
//! Holds the API base URL and the last-used email, stored at
//! `~/.config/siteline/config.json`. The base URL can be overridden with the
//! `SITELINE_API_BASE` environment variable (a `.env` file is honored).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "siteline";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment override for the API base URL
const API_BASE_ENV: &str = "SITELINE_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.is_empty() {
                config.api_base_url = Some(base);
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// The API base URL, with any trailing slash trimmed.
    pub fn api_base(&self) -> Result<String> {
        let base = self
            .api_base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No API base URL configured (set {})", API_BASE_ENV))?;
        Ok(base.trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_trims_trailing_slash() {
        let config = Config {
            api_base_url: Some("https://api.example.org/".into()),
            last_email: None,
        };
        assert_eq!(config.api_base().unwrap(), "https://api.example.org");
    }

    #[test]
    fn test_api_base_missing() {
        let config = Config::default();
        assert!(config.api_base().is_err());
    }
}
