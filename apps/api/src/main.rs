mod config;
mod dialog;
mod errors;
mod parsing;
mod review;
mod routes;
mod scene;
mod scoring;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::parsing::DocumentTextExtractor;
use crate::review::HeuristicReviewer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scanner API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Scan delay {:?}, track {:?}, idle clips every {:?}..{:?}",
        config.scan_delay, config.scan_track, config.idle_min_delay, config.idle_max_delay
    );

    let state = AppState::new(
        config.clone(),
        Arc::new(HeuristicReviewer),
        Arc::new(DocumentTextExtractor),
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // TODO: restrict origins once the renderer has a fixed host
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
