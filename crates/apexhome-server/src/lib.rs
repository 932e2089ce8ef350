//! Apex Home webhook server.
//!
//! Hosts the trigger side of the connector: an axum router that feeds
//! inbound deliveries through an [`apexhome_core::EventRouter`].

pub mod config;
pub mod webhook;

pub use config::ServerConfig;
pub use webhook::{
    TriggerSink, WebhookServerBuilder, WebhookServerConfig, WebhookServerError,
    WebhookServerHandle, WebhookState, start_webhook_server, webhook_router,
};
