use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watermark_core::{load_config, validate_config, WatermarkService};
use watermark_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long shutdown waits for in-flight watermark jobs
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> Result<()> {
    init_logging();

    // Determine config path
    let config_path = std::env::var("WATERMARK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).context("Failed to serialize config")?;
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "Configuration loaded successfully (version {}, config hash {})",
        VERSION,
        &config_hash[..16]
    );
    info!(
        "Workers: {}, queue capacity: {}, backpressure: {:?}, replace policy: {:?}",
        config.processor.max_concurrent_workers,
        config.processor.queue_capacity,
        config.processor.backpressure,
        config.store.replace_policy
    );

    let service = Arc::new(WatermarkService::from_config(&config));
    info!("Watermark service initialized");

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::clone(&service)));

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

    info!("Server shutting down, waiting for in-flight watermark jobs...");
    match tokio::time::timeout(DRAIN_TIMEOUT, service.drain()).await {
        Ok(Ok(())) => info!("All watermark jobs finished"),
        Ok(Err(e)) => warn!("Could not drain worker pool: {}", e),
        Err(_) => warn!(
            "Gave up waiting for watermark jobs after {:?}",
            DRAIN_TIMEOUT
        ),
    }

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
