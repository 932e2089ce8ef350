use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::error::{ApexHomeError, Result};

pub const DEFAULT_STATUS: u16 = 200;

/// Static overrides for the reply sent to the webhook caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOptions {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Parsed as JSON when possible, otherwise sent as a string
    #[serde(default)]
    pub body: Option<String>,
}

impl ResponseOptions {
    pub fn validate(&self) -> Result<()> {
        if let Some(status) = self.status_code
            && !(100..=599).contains(&status)
        {
            return Err(ApexHomeError::invalid_parameter(
                "responseStatusCode",
                format!("{} is outside 100..=599", status),
            ));
        }
        Ok(())
    }

    /// Reply for an accepted event.
    pub fn reply(&self) -> WebhookReply {
        let body = match self.body.as_deref() {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string())),
            _ => json!({"success": true, "message": "Event received"}),
        };

        WebhookReply {
            status: self.status_code.unwrap_or(DEFAULT_STATUS),
            headers: self.headers.clone(),
            body,
        }
    }
}

/// Status, headers and body returned to the webhook caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookReply {
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl WebhookReply {
    /// Acknowledgement for events this trigger does not subscribe to.
    pub fn not_subscribed() -> Self {
        Self {
            status: DEFAULT_STATUS,
            headers: BTreeMap::new(),
            body: json!({"message": "Event not subscribed"}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reply() {
        let reply = ResponseOptions::default().reply();
        assert_eq!(reply.status, 200);
        assert!(reply.headers.is_empty());
        assert_eq!(reply.body, json!({"success": true, "message": "Event received"}));
    }

    #[test]
    fn test_overrides() {
        let options = ResponseOptions {
            status_code: Some(202),
            headers: BTreeMap::from([("X-Handled-By".to_string(), "apexhome".to_string())]),
            body: Some(r#"{"queued": true}"#.to_string()),
        };
        let reply = options.reply();
        assert_eq!(reply.status, 202);
        assert_eq!(reply.headers["X-Handled-By"], "apexhome");
        assert_eq!(reply.body, json!({"queued": true}));
    }

    #[test]
    fn test_non_json_body_is_literal() {
        let options = ResponseOptions {
            body: Some("thanks!".to_string()),
            ..Default::default()
        };
        assert_eq!(options.reply().body, json!("thanks!"));
    }

    #[test]
    fn test_status_range() {
        let options = ResponseOptions {
            status_code: Some(600),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        let options = ResponseOptions {
            status_code: Some(599),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }
}
