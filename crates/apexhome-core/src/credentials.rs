//! Credentials for an Apex Home instance.
//!
//! The host owns credential storage; this module only models the
//! `{url, apiKey}` pair it injects and a couple of simple providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ApexHomeError, Result};

/// Credential type name the node descriptions refer to.
pub const CREDENTIAL_NAME: &str = "apexHomeApi";

pub const URL_ENV: &str = "APEXHOME_URL";
pub const API_KEY_ENV: &str = "APEXHOME_API_KEY";

/// Base URL and API key of one Apex Home instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexHomeCredentials {
    pub url: String,
    pub api_key: String,
}

impl ApexHomeCredentials {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Check that the URL is an absolute http(s) URL and the key is set.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.url).map_err(|e| {
            ApexHomeError::InvalidCredentials(format!("invalid URL '{}': {}", self.url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApexHomeError::InvalidCredentials(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ApexHomeError::InvalidCredentials(
                "API key is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Keep the key out of logs.
impl fmt::Debug for ApexHomeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApexHomeCredentials")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Supplies credentials for one execution.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self) -> Result<ApexHomeCredentials>;
}

/// Fixed credentials, e.g. from a config file.
#[derive(Debug, Clone)]
pub struct StaticCredentials(ApexHomeCredentials);

impl StaticCredentials {
    pub fn new(credentials: ApexHomeCredentials) -> Self {
        Self(credentials)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Result<ApexHomeCredentials> {
        self.0.validate()?;
        Ok(self.0.clone())
    }
}

/// Reads `APEXHOME_URL` and `APEXHOME_API_KEY` on every call.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn credentials(&self) -> Result<ApexHomeCredentials> {
        let url = std::env::var(URL_ENV)
            .map_err(|_| ApexHomeError::InvalidCredentials(format!("{} is not set", URL_ENV)))?;
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ApexHomeError::InvalidCredentials(format!("{} is not set", API_KEY_ENV))
        })?;
        let credentials = ApexHomeCredentials::new(url, api_key);
        credentials.validate()?;
        Ok(credentials)
    }
}
