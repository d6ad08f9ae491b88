//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, sink worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::sink_worker::{SinkDispatcher, run_sink_worker};
use crate::infrastructure::persistence::{MemoryEventRepository, PgEventRepository};
use crate::infrastructure::sink::{AnalyticsSink, Ga4Sink, NullSink};
use crate::routes::app_router;
use crate::state::{AppState, DynEventRepository};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How long shutdown waits for queued analytics events to be forwarded.
const SINK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - GA4 sink (or NullSink fallback)
/// - Background sink worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, storage_backend) = connect_store(&config).await?;
    let sink = build_sink(&config)?;

    let (dispatcher, sink_rx) = SinkDispatcher::channel(config.sink_queue_capacity);
    let worker = tokio::spawn(run_sink_worker(
        sink_rx,
        sink,
        config.sink_worker_settings(),
    ));

    let state = AppState::new(
        repository,
        dispatcher,
        config.guest_username.clone(),
        config.aggregation_window,
        storage_backend,
    );

    let app = app_router(state, &config.router_options());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it every dispatcher clone) is gone; the worker
    // drains what is queued and exits.
    match tokio::time::timeout(SINK_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Sink worker panicked: {}", e),
        Err(_) => tracing::warn!("Sink worker still busy after shutdown, abandoning queued events"),
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Connects to Postgres when configured, otherwise uses the in-memory store.
async fn connect_store(config: &Config) -> Result<(Arc<DynEventRepository>, &'static str)> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("No database configured, events are kept in memory only");
        return Ok((Arc::new(MemoryEventRepository::new()), "memory"));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok((Arc::new(PgEventRepository::new(Arc::new(pool))), "postgres"))
}

fn build_sink(config: &Config) -> Result<Arc<dyn AnalyticsSink>> {
    let Some(settings) = config.ga4_settings() else {
        tracing::info!("Analytics sink disabled (NullSink)");
        return Ok(Arc::new(NullSink::new()));
    };

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    tracing::info!(measurement_id = %settings.measurement_id, "Analytics sink enabled (GA4)");
    Ok(Arc::new(Ga4Sink::new(http, settings)))
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
