//! Webhook Module
//!
//! Receives Apex Home event deliveries over HTTP.
//!
//! # Request
//!
//! ```text
//! POST /webhook?optional=query
//! Content-Type: application/json
//!
//! {
//!     "eventName": "user.created",
//!     "eventData": {"id": 12},
//!     "eventOccuredOn": "2025-01-01T00:00:00Z"
//! }
//! ```
//!
//! Events outside the subscription are acknowledged with `200` and produce
//! no output. `GET /health` returns `OK`.

pub mod handler;
pub mod server;

pub use handler::{TriggerSink, WebhookState, webhook_router};
pub use server::{
    WebhookServerBuilder, WebhookServerConfig, WebhookServerError, WebhookServerHandle,
    start_webhook_server,
};
