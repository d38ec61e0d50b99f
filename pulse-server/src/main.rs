use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;

use pulse::db::default_pool_size;
use pulse::logging::{init_logger, parse_level};
use pulse::runtime::build_runtime;
use pulse::SqliteStorage;
use pulse_server::{AppState, Config};

fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::parse();

    let level = parse_level(&config.log_level)
        .with_context(|| format!("unknown log level {:?}", config.log_level))?;
    init_logger(level);

    let runtime = build_runtime(config.workers).context("failed to build tokio runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    let settings = config.settings();
    if config.dev_endpoints && !settings.is_development() {
        warn!("--dev-endpoints ignored outside the development environment");
    }

    let pool_size = config.pool_size.unwrap_or_else(default_pool_size);
    let database_url = config.database_url.clone();
    let storage = tokio::task::spawn_blocking(move || SqliteStorage::open(&database_url, pool_size))
        .await?
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let state = AppState::new(Arc::new(storage), settings);
    let app = pulse_server::app(state, config.static_dir.as_deref());

    info!(
        "Pulse serving on {} ({}, database {})",
        config.bind, settings.environment, config.database_url
    );
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pulse stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
