//! Webhook HTTP Handler
//!
//! Receives Apex Home event deliveries and hands the routed channel outputs
//! to a sink.

use apexhome_core::{ChannelOutputs, EventRouter, WebhookEvent, WebhookReply};
use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback receiving the outputs of every accepted event
pub type TriggerSink = Arc<dyn Fn(ChannelOutputs) + Send + Sync>;

/// Shared state for webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    pub router: Arc<EventRouter>,
    pub sink: TriggerSink,
}

impl WebhookState {
    pub fn new(
        router: Arc<EventRouter>,
        sink: impl Fn(ChannelOutputs) + Send + Sync + 'static,
    ) -> Self {
        Self {
            router,
            sink: Arc::new(sink),
        }
    }
}

/// Create the webhook router
pub fn webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(receive_event))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn receive_event(
    State(state): State<WebhookState>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = WebhookEvent::from_bytes(&body);
    debug!(event_name = ?event.event_name, bytes = body.len(), "Webhook delivery received");

    let outcome = state
        .router
        .dispatch(event, header_map(&headers), query_map(query));

    if let Some(channel) = outcome.decision.channel {
        info!(channel, "Event accepted");
        (state.sink)(outcome.outputs);
    }

    into_response(outcome.reply)
}

/// Repeated headers are joined with `", "`; non-UTF-8 bytes are replaced.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, Value> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), Value::String(joined))
        })
        .collect()
}

/// Single keys map to strings, repeated keys to arrays in arrival order.
fn query_map(pairs: Vec<(String, String)>) -> BTreeMap<String, Value> {
    let mut query = BTreeMap::new();
    for (key, value) in pairs {
        match query.remove(&key) {
            None => {
                query.insert(key, Value::String(value));
            }
            Some(Value::Array(mut values)) => {
                values.push(Value::String(value));
                query.insert(key, Value::Array(values));
            }
            Some(first) => {
                query.insert(key, Value::Array(vec![first, Value::String(value)]));
            }
        }
    }
    query
}

fn into_response(reply: WebhookReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    let mut response = (status, Json(reply.body)).into_response();

    for (name, value) in reply.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!(header = %name, "Skipping invalid response header"),
        }
    }

    response
}
