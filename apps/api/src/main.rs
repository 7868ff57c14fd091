//! # Cafe POS API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main                                                                   │
//! │   1. tracing subscriber (RUST_LOG, default "info")                     │
//! │   2. ApiConfig::load()           ← CAFE_* environment variables        │
//! │   3. Database::new()             ← pool + embedded migrations          │
//! │   4. axum::serve(app)            ← until Ctrl+C / SIGTERM              │
//! │   5. db.close()                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cafe_api::{app, ApiConfig, AppState};
use cafe_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Cafe POS API server...");

    let config = ApiConfig::load()?;
    let addr = config.bind_addr()?;
    info!(
        %addr,
        database = %config.database_path,
        timezone = %config.timezone,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config).await?;
    info!("Database ready");

    let state = AppState::new(db.clone(), config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
