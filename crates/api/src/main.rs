use std::sync::Arc;

use anyhow::Context;

use listkeep_api::app::{build_app, spawn_session_sweeper, AppServices};
use listkeep_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    listkeep_observability::init(config.log_format);

    let services = Arc::new(AppServices::new(&config));

    match config.session_sweep_interval {
        Some(every) => {
            spawn_session_sweeper(services.sessions.clone(), every);
        }
        None => tracing::warn!("session sweep disabled; expired sessions are kept until restart"),
    }

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
