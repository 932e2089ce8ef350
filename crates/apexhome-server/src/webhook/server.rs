//! Webhook HTTP Server
//!
//! Binds the webhook router to a socket and runs it until stopped.

use apexhome_core::{ChannelOutputs, EventRouter};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::handler::{TriggerSink, WebhookState, webhook_router};
use crate::config::ServerConfig;

/// Configuration for the webhook server
#[derive(Debug, Clone)]
pub struct WebhookServerConfig {
    pub port: u16,
    /// Host to bind to (default: 127.0.0.1 for local only)
    pub host: String,
    pub enable_cors: bool,
}

impl Default for WebhookServerConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            host: "127.0.0.1".to_string(),
            enable_cors: false,
        }
    }
}

impl WebhookServerConfig {
    pub fn local(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, WebhookServerError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| WebhookServerError::InvalidAddress(addr))
    }
}

impl From<&ServerConfig> for WebhookServerConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            enable_cors: config.enable_cors,
        }
    }
}

/// Running server: its bound address and the means to shut it down.
pub struct WebhookServerHandle {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl WebhookServerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal shutdown and wait for in-flight requests to drain.
    pub async fn stop(&mut self) {
        let Some(tx) = self.shutdown_tx.take() else {
            return;
        };
        info!(addr = %self.addr, "Stopping webhook server");
        let _ = tx.send(());
        if let Err(e) = (&mut self.task).await {
            error!(error = %e, "Webhook server task failed");
        }
    }
}

/// Bind the listener and serve the webhook routes on a background task.
pub async fn start_webhook_server(
    config: WebhookServerConfig,
    state: WebhookState,
) -> Result<WebhookServerHandle, WebhookServerError> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let addr = listener.local_addr()?;

    let mut app = webhook_router(state).layer(TraceLayer::new_for_http());
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    info!(addr = %addr, cors = config.enable_cors, "Webhook server listening");

    let task = tokio::spawn(async move {
        let shutdown = async {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!(error = %e, "Webhook server stopped with error");
        }
    });

    Ok(WebhookServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Builder for creating and configuring a webhook server
pub struct WebhookServerBuilder {
    config: WebhookServerConfig,
    router: Option<Arc<EventRouter>>,
    sink: Option<TriggerSink>,
}

impl WebhookServerBuilder {
    pub fn new() -> Self {
        Self {
            config: WebhookServerConfig::default(),
            router: None,
            sink: None,
        }
    }

    pub fn config(mut self, config: WebhookServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn router(mut self, router: EventRouter) -> Self {
        self.router = Some(Arc::new(router));
        self
    }

    /// Set the callback receiving accepted events
    pub fn sink(mut self, sink: impl Fn(ChannelOutputs) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Build and start the server
    pub async fn start(self) -> Result<WebhookServerHandle, WebhookServerError> {
        let router = self.router.ok_or(WebhookServerError::MissingRouter)?;
        let sink = self.sink.ok_or(WebhookServerError::MissingSink)?;

        start_webhook_server(self.config, WebhookState { router, sink }).await
    }
}

impl Default for WebhookServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when starting the webhook server
#[derive(Debug, thiserror::Error)]
pub enum WebhookServerError {
    #[error("Event router not configured")]
    MissingRouter,
    #[error("Trigger sink not configured")]
    MissingSink,
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
