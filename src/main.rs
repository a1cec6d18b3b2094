//! User Gateway - A REST gateway for user records
//!
//! Serves CRUD operations on users through a read-through cache with sliding
//! TTL expiration and a background eviction sweeper.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_gateway::api::create_router;
use user_gateway::{spawn_metrics_collector, AppState, Config, InMemoryUserRepository};

/// Main entry point for the user gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Wrap the user provider in the cache decorator
/// 4. Start the cache sweeper and the metrics collector
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting {}", config.app_name);
    info!(
        "Configuration loaded: port={}, cache_ttl={}ms, sweep_interval={}ms, metrics_interval={}ms",
        config.server_port,
        config.cache_ttl.as_millis(),
        config.sweep_interval.as_millis(),
        config.metrics_interval.as_millis()
    );

    let provider = Arc::new(InMemoryUserRepository::new());
    let state = AppState::from_config(&config, provider).context("failed to build app state")?;
    info!("Cache decorator initialized");

    let shutdown = CancellationToken::new();
    let sweeper = state.users.start_sweeper(shutdown.clone());
    info!("Cache sweeper started");

    let collector = spawn_metrics_collector(
        state.users.clone(),
        state.metrics.clone(),
        config.metrics_interval,
        shutdown.clone(),
    );

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    if let Some(handle) = sweeper {
        if let Err(err) = handle.await {
            warn!("Cache sweeper ended abnormally: {}", err);
        }
    }

    if let Err(err) = collector.await {
        warn!("Metrics collector ended abnormally: {}", err);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, cancels `token` so the sweeper and the metrics
/// collector stop at their next tick boundary. In-flight requests are left to finish.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    token.cancel();
    info!("Background task cancellation requested");
}
