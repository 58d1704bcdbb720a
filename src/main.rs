use anyhow::Context;
use dotenvy::dotenv;
use polis::logging::{init_basic_console_logging, init_tracing, shutdown_tracer};
use polis::metrics::{init_metrics, is_observability_enabled, metrics_app};
use polis::router::init_router;
use polis::state::init_app_state;
use polis_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if is_observability_enabled() {
        init_tracing().context("Failed to initialize tracing")?;
    } else {
        init_basic_console_logging();
    }

    let metrics_handle = init_metrics().context("Failed to install metrics recorder")?;
    let state = init_app_state().await?;
    let server = ServerConfig::from_env()?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind(server.addr()?)
        .await
        .with_context(|| format!("Failed to bind {}:{}", server.host, server.port))?;
    info!("Server running on http://{}:{}", server.host, server.port);
    info!("Swagger UI available at http://{}:{}/swagger-ui", server.host, server.port);
    info!("Scalar UI available at http://{}:{}/scalar", server.host, server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
