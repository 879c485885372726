//! fitlog-server - workout logging HTTP API
//!
//! Resolves the root folder, opens (or creates) the database inside it and
//! serves the JSON API until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fitlog_common::config::{RootFolderInitializer, RootFolderResolver, ServerConfig, TomlConfig};
use fitlog_common::db::{init_database, sessions};
use fitlog_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fitlog-server
#[derive(Parser, Debug)]
#[command(name = "fitlog-server")]
#[command(about = "Workout logging HTTP API")]
#[command(version)]
struct Args {
    /// Folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "FITLOG_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "FITLOG_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load_default();
    let mut config = ServerConfig::from_toml(toml_config.as_ref());
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "fitlog_server={level},fitlog_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification before any database work
    info!(
        "Starting fitlog-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new("fitlog-server")
        .with_config(toml_config)
        .with_cli_arg(args.root_folder)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    match sessions::purge_expired_sessions(&pool).await {
        Ok(0) => {}
        Ok(n) => info!("Removed {} expired sessions", n),
        Err(e) => error!("Failed to purge expired sessions: {}", e),
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fitlog-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
