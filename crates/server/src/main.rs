use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prowlarr_bridge_core::{
    load_config, validate_config, HttpClientConfig, NoticeBoard, ProwlarrClient, SearchGateway,
    TomlSettingsStore,
};
use prowlarr_bridge_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("prowlarr-bridge {}", VERSION);

    // Determine config path
    let config_path = std::env::var("PROWLARR_BRIDGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Settings path: {:?}", config.settings.path);
    info!("Cache TTL: {}s", config.cache.ttl_secs);

    // Create Prowlarr client
    let client = ProwlarrClient::new(HttpClientConfig::from(&config.prowlarr))
        .context("Failed to create Prowlarr client")?;

    // Create gateway, notices are kept for the host to drain
    let notices = Arc::new(NoticeBoard::default());
    let store = TomlSettingsStore::new(&config.settings.path);
    let gateway = SearchGateway::from_config(&config, Arc::new(client), Arc::new(store))
        .with_notifier(notices.clone());

    match gateway.load_settings().await {
        Ok(true) => info!("Loaded stored settings from {:?}", config.settings.path),
        Ok(false) => info!("No stored settings, using configured connection"),
        Err(e) => warn!("Ignoring stored settings: {}", e),
    }

    let connection = gateway.settings().await;
    if connection.is_configured() {
        info!("Prowlarr at {}:{}", connection.host, connection.port);
    } else {
        warn!("Prowlarr host or API key not set; searches will return nothing until configured");
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(gateway), notices));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
