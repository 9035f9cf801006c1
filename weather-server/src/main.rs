//! Weather HTTP server
//!
//! Main entry point for the weather record API.

use std::sync::Arc;

use chrono::Local;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{
    Config, FallbackCatalog, InMemoryRecordStore, RandomIdGenerator, RecordStore,
    ResolutionService,
};
use weather_server::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_server=debug,weather_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("weather-server v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e:#}");
        Config::default()
    });
    let addr = config.bind_address()?;

    let today = Local::now().date_naive();
    let store = if config.server.seed_sample_data {
        InMemoryRecordStore::with_sample_data(today)
    } else {
        InMemoryRecordStore::new()
    };
    let fallback = if config.server.fallback_catalog {
        FallbackCatalog::new_zealand(today)
    } else {
        FallbackCatalog::empty()
    };

    info!(
        stored = store.len(),
        fallback = fallback.len(),
        "Weather data initialised"
    );
    debug!(cities = ?fallback.cities(), "Fallback catalog cities");

    let service = Arc::new(ResolutionService::new(
        store,
        Arc::new(fallback),
        Arc::new(RandomIdGenerator),
    ));

    let app = create_router(AppState::from_service(service)).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
