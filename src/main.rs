//! Retrograde - Main entry point
//!
//! Audio reversal service: upload a file, get it back played backwards.
//! Wires configuration, database, output store, and the HTTP server
//! together, then serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retrograde::api;
use retrograde::config::{Config, ConfigOverrides};
use retrograde::db;
use retrograde::storage::OutputStore;

/// Command-line arguments for retrograde
#[derive(Parser, Debug)]
#[command(name = "retrograde")]
#[command(about = "Audio reversal service")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "RETROGRADE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "RETROGRADE_PORT")]
    port: Option<u16>,

    /// SQLite database file path
    #[arg(short, long, env = "RETROGRADE_DATABASE")]
    database: Option<String>,

    /// Directory finished artifacts are stored in
    #[arg(long, env = "RETROGRADE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Root directory for per-request workspaces
    #[arg(long, env = "RETROGRADE_WORK_DIR")]
    work_dir: Option<PathBuf>,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "RETROGRADE_MAX_UPLOAD_BYTES")]
    max_upload_bytes: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrograde=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let overrides = ConfigOverrides {
        port: args.port,
        database_path: args.database,
        output_dir: args.output_dir,
        work_dir: args.work_dir,
        max_upload_bytes: args.max_upload_bytes,
    };
    let config = Arc::new(
        Config::load(args.config.as_deref(), overrides)
            .context("Failed to load configuration")?,
    );

    info!("Starting retrograde on port {}", config.port);
    info!("Output directory: {}", config.output_dir.display());
    info!("Work directory: {}", config.work_dir.display());

    // Initialize database
    let db_pool = db::initialize_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    // Prepare the output store
    let store = OutputStore::new(&config.output_dir).context("Failed to prepare output store")?;

    // Build the application router
    let ctx = api::AppContext {
        config: config.clone(),
        db_pool: db_pool.clone(),
        store,
    };
    let app = api::create_router(ctx);

    // Create socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    // Create and run the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Close the database connection before exiting
    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
