use crate::app_config::AppConfig;
use crate::cli::Args;
use crate::iss::HttpLocationSource;
use crate::metrics::{IssMetrics, MetricsServer};
use clap::Parser;
use prometheus_client::registry::Registry;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod app_config;
mod cli;
mod domain;
mod iss;
mod metrics;
mod poller;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args)?;
    info!("✅  Loaded configuration");

    let mut registry = Registry::default();
    let iss_metrics = IssMetrics::new(&mut registry);

    let server = MetricsServer::bind(config.metrics().socket_addr()).await?;
    let cancel = CancellationToken::new();
    let server_cancel = cancel.clone();
    let server_handle = tokio::spawn(async move {
        let result = server.serve(registry, server_cancel.clone()).await;
        server_cancel.cancel();
        result
    });
    info!("✅  Started metrics endpoint");

    let client = iss::new_client(config.iss())?;
    let source = HttpLocationSource::new(client, config.iss().url());

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Received shutdown signal");
                shutdown.cancel();
            }
            Err(e) => error!("❌ Unable to listen for the shutdown signal: {}", e),
        }
    });

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    poller::run(source, iss_metrics, config.iss().interval(), cancel.clone()).await;

    cancel.cancel();
    server_handle.await??;

    info!("👋 {} stopped", env!("CARGO_PKG_NAME"));
    Ok(())
}
