//! bbs-storefront - Storefront HTTP service
//!
//! Serves the beat catalog, cart and favorites JSON API. Cart and favorites
//! live in a SQLite file under the root folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bbs_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV};
use bbs_common::db::init_database;
use bbs_common::storage::SqliteStore;
use bbs_common::Catalog;
use bbs_storefront::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for bbs-storefront
#[derive(Parser, Debug)]
#[command(name = "bbs-storefront")]
#[command(about = "Storefront API for the BlingsBeats catalog, cart and favorites")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "BBS_PORT")]
    port: Option<u16>,

    /// Folder holding the storage database
    #[arg(short, long, env = ROOT_FOLDER_ENV)]
    root_folder: Option<PathBuf>,

    /// JSON catalog replacing the built-in beats
    #[arg(short, long, env = "BBS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: std::net::IpAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_source) = TomlConfig::load_or_default();

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "bbs_storefront={level},bbs_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting BlingsBeats storefront v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder.clone())
        .with_toml(&config)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .context("Failed to open storage database")?;

    let catalog = match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::sample(),
    };
    info!("Catalog ready: {} beats", catalog.len());

    let state = AppState::new(catalog, SqliteStore::new(pool.clone()));
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::new(args.host, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("bbs-storefront listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
