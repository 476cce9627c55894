// Korean Registration Number Validation - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use kr_regnum::{build_router, logging, AppState, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();
    logging::init_tracing("info", config.log_json);

    info!(
        bind = %config.bind_addr,
        max_batch_items = config.max_batch_items,
        cors_permissive = config.cors_permissive,
        version = kr_regnum::VERSION,
        "starting regnum server"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    let app = build_router(AppState::new(config));

    info!("server ready: GET /api/validate/:kind/:value, POST /api/validate/batch");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
