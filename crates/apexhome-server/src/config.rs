use anyhow::Context;
use apexhome_core::{EventCatalog, EventRouter, ResponseOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// Subscribed event ids; `None` subscribes to the whole catalog
    pub events: Option<Vec<String>>,
    pub test_event: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub response: ResponseOptions,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    trigger: TriggerSection,
    #[serde(default)]
    response: ResponseSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    enable_cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct TriggerSection {
    #[serde(default)]
    events: Option<Vec<String>>,
    #[serde(default)]
    test_event: Option<String>,
    #[serde(default)]
    catalog_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseSection {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(file_config) = load_from_file()? {
            return Ok(file_config.into());
        }

        Ok(Self::from_env())
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let parsed: FileConfig = toml::from_str(contents)?;
        Ok(parsed.into())
    }

    fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let host = var("APEXHOME_SERVER_HOST").unwrap_or_else(default_host);
        let port = var("APEXHOME_SERVER_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let events = var("APEXHOME_EVENTS").map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect()
        });
        let catalog_path = var("APEXHOME_CATALOG").map(PathBuf::from);

        Self {
            host,
            port,
            enable_cors: false,
            events,
            test_event: None,
            catalog_path,
            response: ResponseOptions::default(),
        }
    }

    /// Build the event router described by this configuration.
    pub fn event_router(&self) -> anyhow::Result<EventRouter> {
        let catalog = match &self.catalog_path {
            Some(path) => EventCatalog::load(path)
                .with_context(|| format!("Failed to load event catalog {}", path.display()))?,
            None => EventCatalog::default(),
        };

        let mut router = EventRouter::new(Arc::new(catalog));
        if let Some(events) = &self.events {
            router = router.with_subscriptions(events.clone());
        }
        if let Some(test_event) = &self.test_event {
            router = router.with_test_event(test_event.clone());
        }
        Ok(router.with_response(self.response.clone())?)
    }
}

impl From<FileConfig> for ServerConfig {
    fn from(file: FileConfig) -> Self {
        Self {
            host: file.server.host,
            port: file.server.port,
            enable_cors: file.server.enable_cors,
            events: file.trigger.events,
            test_event: file.trigger.test_event,
            catalog_path: file.trigger.catalog_path,
            response: ResponseOptions {
                status_code: file.response.status_code,
                headers: file.response.headers,
                body: file.response.body,
            },
        }
    }
}

fn load_from_file() -> anyhow::Result<Option<FileConfig>> {
    let config_path = env::var("APEXHOME_SERVER_CONFIG").ok();
    let path = if let Some(path) = config_path {
        Some(path)
    } else if Path::new("server.toml").exists() {
        Some("server.toml".to_string())
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("Failed to read config {}: {}", path, err))?;
    let parsed: FileConfig = toml::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("Failed to parse config {}: {}", path, err))?;
    Ok(Some(parsed))
}
