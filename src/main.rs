//! elspot-proxy server binary

use std::sync::Arc;

use anyhow::Context;

use elspot_proxy::api::{create_router, AppState};
use elspot_proxy::config::AppConfig;
use elspot_proxy::telemetry;
use elspot_proxy::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    telemetry::init(&config.logging)?;

    let client = UpstreamClient::new(&config.upstream).context("invalid upstream configuration")?;
    tracing::info!(
        upstream = %client.dataset_url(),
        timeout_secs = config.upstream.timeout_secs,
        "Upstream client initialised"
    );

    let router = create_router(AppState::new(Arc::new(client)));

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
