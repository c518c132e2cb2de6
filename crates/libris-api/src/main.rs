//! Libris API server entry point.

use std::error::Error;
use std::sync::Arc;

use libris_api::config::AppConfig;
use libris_api::state::AppState;
use libris_api::{build_library, routes};
use libris_core::clock::SystemClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Libris API server");

    let config = AppConfig::from_env()?;
    let library = build_library(&config)?;
    tracing::info!(max_loans = config.max_loans, "lending engine ready");

    let app_state = AppState::new(Arc::new(SystemClock), library);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
