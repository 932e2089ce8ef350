use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Field names the service has used for the event timestamp.
const OCCURRED_AT_FIELDS: [&str; 3] = ["eventOccuredOn", "eventOccurredOn", "occurredAt"];

/// Inbound webhook call from Apex Home.
///
/// Parsing is lenient: a body that is not a JSON object simply yields an
/// event without a name, which the router treats as unsubscribed.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    pub event_name: Option<String>,
    pub event_data: Value,
    pub occurred_at: Option<DateTime<Utc>>,
    pub raw_body: Value,
}

impl WebhookEvent {
    pub fn from_body(body: Value) -> Self {
        let object = body.as_object();

        let event_name = object
            .and_then(|o| o.get("eventName"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let event_data = object
            .and_then(|o| o.get("eventData"))
            .cloned()
            .unwrap_or(Value::Null);
        let occurred_at = object
            .and_then(occurred_at_field)
            .and_then(parse_timestamp);

        Self {
            event_name,
            event_data,
            occurred_at,
            raw_body: body,
        }
    }

    /// Parse raw request bytes. Invalid JSON becomes an empty object.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let body = if bytes.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(bytes).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Webhook body is not JSON");
                Value::Object(Map::new())
            })
        };
        Self::from_body(body)
    }

    /// Timestamp exactly as the sender wrote it.
    pub fn occurred_on_raw(&self) -> Value {
        self.raw_body
            .as_object()
            .and_then(occurred_at_field)
            .cloned()
            .unwrap_or(Value::Null)
    }
}

fn occurred_at_field(object: &Map<String, Value>) -> Option<&Value> {
    OCCURRED_AT_FIELDS
        .iter()
        .find_map(|field| object.get(*field).filter(|v| !v.is_null()))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}
