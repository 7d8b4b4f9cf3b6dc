use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gongryak_api::config::ServerConfig;
use gongryak_api::router::build_app_router;
use gongryak_api::state::AppState;
use gongryak_api::store::{build_sheet_store, build_submission_sink};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        keying = ?config.survey.keying,
        scored = config.survey.scored,
        backend = ?config.sheets.backend,
        "Loaded server configuration"
    );

    // --- Sheet store ---
    let store = build_sheet_store(
        &config.sheets,
        Duration::from_secs(config.request_timeout_secs),
    )
    .expect("Failed to initialise sheet store");

    match store.health_check().await {
        Ok(()) => tracing::info!("Sheet store health check passed"),
        // Not fatal: the sheet may come back before the first submission.
        Err(e) => tracing::warn!(error = %e, "Sheet store health check failed"),
    }

    let sink = Arc::new(build_submission_sink(store, &config));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        sink,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, static_dir = %config.static_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let stopping = Arc::new(Notify::new());
    let signal = {
        let stopping = Arc::clone(&stopping);
        async move {
            shutdown_signal().await;
            stopping.notify_one();
        }
    };

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();

    tokio::select! {
        result = server => result.expect("Server error"),
        () = async {
            stopping.notified().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(timeout_secs = drain.as_secs(), "Connections still open after drain timeout, exiting");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// `RUST_LOG`-driven filter with a human-readable formatter, or JSON lines
/// when `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "gongryak_api=debug,gongryak_sheets=debug,tower_http=debug".into()
    });
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for SIGINT or SIGTERM (on Unix) to start graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
