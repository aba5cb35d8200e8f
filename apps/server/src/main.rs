//! Server binary: config, database, router, graceful shutdown.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rentdesk_db::{Database, DbConfig};
use rentdesk_server::{api_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentdesk_server=info,rentdesk_db=info,tower_http=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    info!(port = config.http_port, db = %config.database_path.display(), "Starting rentdesk-server");

    // SQLite creates the file but not its directory
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let state = AppState::new(db.clone());
    let app = api_router(state, config.permissive_cors);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves when ctrl-c arrives.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
