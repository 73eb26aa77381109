//! HTTP server command handler

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{info, warn};

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "Pet shop v{} starting on port {}",
        env!("CARGO_PKG_VERSION"),
        config.server.port
    );

    let port = config.server.port;
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;

    match state.accounts().admin_exists().await {
        Ok(true) => {}
        Ok(false) => warn!("No admin account exists. Run `petshop bootstrap` to create one"),
        Err(e) => warn!(error = %e, "Could not check for an admin account"),
    }

    let app = api::router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Web server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, stopping..."),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
