use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ApexHomeError, Result};

const DEFAULT_EVENTS: &str = include_str!("../../data/events.json");

/// One event the service can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Event name as sent in `eventName`
    pub id: String,
    /// Display name, also used as the channel name
    pub name: String,
}

/// Ordered, closed set of known events. Channel index = position.
///
/// Only constructed through [`EventCatalog::new`], so every instance is
/// non-empty with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
}

/// On-disk shape of a catalog file.
#[derive(Deserialize)]
struct CatalogFile {
    events: Vec<EventDefinition>,
}

impl EventCatalog {
    pub fn new(events: Vec<EventDefinition>) -> Result<Self> {
        if events.is_empty() {
            return Err(ApexHomeError::InvalidCatalog(
                "catalog has no events".to_string(),
            ));
        }
        for (i, event) in events.iter().enumerate() {
            if event.id.trim().is_empty() {
                return Err(ApexHomeError::InvalidCatalog(format!(
                    "event {} has an empty id",
                    i
                )));
            }
            if events[..i].iter().any(|e| e.id == event.id) {
                return Err(ApexHomeError::InvalidCatalog(format!(
                    "duplicate event id '{}'",
                    event.id
                )));
            }
        }
        Ok(Self { events })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: CatalogFile = serde_json::from_str(json)?;
        Self::new(parsed.events)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ApexHomeError::InvalidCatalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn events(&self) -> &[EventDefinition] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn index_of(&self, event_name: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == event_name)
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.events.iter().map(|e| e.name.clone()).collect()
    }

    pub fn event_ids(&self) -> Vec<String> {
        self.events.iter().map(|e| e.id.clone()).collect()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        // The bundled file is checked by `test_default_catalog`.
        Self::from_json(DEFAULT_EVENTS).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Bundled event catalog is invalid");
            Self { events: Vec::new() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog() {
        let catalog = EventCatalog::default();
        assert_eq!(
            catalog.event_ids(),
            vec!["user.created", "user.updated", "user.removed"]
        );
        assert_eq!(
            catalog.channel_names(),
            vec!["User Created", "User Updated", "User Removed"]
        );
        assert_eq!(catalog.index_of("user.removed"), Some(2));
        assert_eq!(catalog.index_of("page.created"), None);
    }

    #[test]
    fn test_default_is_validated_bundle() {
        let bundled = EventCatalog::from_json(DEFAULT_EVENTS).unwrap();
        assert_eq!(EventCatalog::default(), bundled);
        assert!(!bundled.is_empty());
    }

    #[test]
    fn test_rejects_blank_id() {
        let blank = r#"{"events": [{"id": " ", "name": "Blank"}]}"#;
        assert!(matches!(
            EventCatalog::from_json(blank),
            Err(ApexHomeError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let dup = r#"{"events": [{"id": "a", "name": "A"}, {"id": "a", "name": "B"}]}"#;
        assert!(EventCatalog::from_json(dup).is_err());
        assert!(EventCatalog::from_json(r#"{"events": []}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"events": [{{"id": "page.published", "name": "Page Published"}}]}}"#
        )
        .unwrap();

        let catalog = EventCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.index_of("page.published"), Some(0));
    }
}
