#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use apexhome_core::ChannelOutputs;
use apexhome_server::{ServerConfig, WebhookServerBuilder, WebhookServerConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apexhome_server=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::load()?;
    let router = config.event_router()?;

    info!(
        events = ?router.subscribed(),
        channels = router.catalog().len(),
        "Starting Apex Home webhook server"
    );

    let mut handle = WebhookServerBuilder::new()
        .config(WebhookServerConfig::from(&config))
        .router(router)
        .sink(emit)
        .start()
        .await?;

    info!(addr = %handle.addr, "Listening for webhook deliveries");

    tokio::signal::ctrl_c().await?;
    handle.stop().await;
    Ok(())
}

/// Write one JSON line per accepted event to stdout.
fn emit(outputs: ChannelOutputs) {
    match serde_json::to_string(&outputs) {
        Ok(line) => println!("{}", line),
        Err(e) => error!(error = %e, "Failed to serialize channel outputs"),
    }
}
