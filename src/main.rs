//! Superhero Binary Entry Point
//!
//! Runs the HTTP API. Core functionality is provided by the `superhero`
//! library crate.

use clap::Parser;
use std::net::SocketAddr;
use superhero::{
    AppConfig, SeedData, StorageBuilder, StorageHandles,
    server::{AppState, create_router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Superhero - heroes and their powers over HTTP
#[derive(Parser, Debug)]
#[command(name = "superhero", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "configs/config.yaml",
        env = "SUPERHERO_CONFIG"
    )]
    config: String,

    /// Server bind address (overrides config file)
    #[arg(long, env = "SUPERHERO_SERVER_BIND")]
    server_bind: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, env = "SUPERHERO_SERVER_PORT")]
    server_port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(long, env = "SUPERHERO_DB_URL")]
    db_url: Option<String>,

    /// Seed data file (overrides config file)
    #[arg(long, env = "SUPERHERO_SEED")]
    seed: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,superhero=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Superhero API");

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file
    tracing::info!("Loading configuration from: {}", cli.config);
    let mut config = AppConfig::load(&cli.config)?;

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(bind) = cli.server_bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.server_port {
        config.server.port = port;
    }
    if let Some(url) = cli.db_url {
        config.database.url = url;
    }
    if let Some(seed) = cli.seed {
        config.seed_path = Some(seed);
    }
    config.validate()?;

    // Build storage layer
    let db_url = config.database.connection_url();
    tracing::info!(
        "Server: {}:{}, Database: {}",
        config.server.bind,
        config.server.port,
        db_url,
    );

    let handles = StorageBuilder::new(&db_url)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .build()
        .await?;

    tracing::info!("Storage initialized");

    // Load demo data into an empty database
    if let Some(ref seed_path) = config.seed_path {
        tracing::info!("Loading seed data from: {}", seed_path);
        let seed = SeedData::load(seed_path)?;
        let result = seed.apply(&handles).await?;
        if result.skipped {
            tracing::info!("Database already populated, seed skipped");
        }
    }

    // Build Axum router
    let app = create_router(AppState::from_handles(&handles));

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;

    tracing::info!("Web server listening on: http://{}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_storage(handles).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Setup graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }
}

async fn shutdown_storage(handles: StorageHandles) {
    tracing::info!("Shutting down storage...");
    if let Err(e) = handles.shutdown().await {
        tracing::error!("Failed to shutdown storage: {}", e);
    }
}
