//! CLI configuration file support
//!
//! Loads configuration from ~/.config/apexhome/config.toml

use anyhow::{Result, anyhow};
use apexhome_core::ApexHomeCredentials;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the Apex Home instance
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("apexhome").join("config.toml"))
    }

    /// Merge command line values over the file and build credentials.
    pub fn credentials(
        &self,
        url: Option<String>,
        api_key: Option<String>,
    ) -> Result<ApexHomeCredentials> {
        let url = url
            .or_else(|| self.url.clone())
            .ok_or_else(|| anyhow!("API URL not configured"))?;
        let api_key = api_key
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| anyhow!("API key not configured"))?;
        Ok(ApexHomeCredentials::new(url, api_key))
    }
}
