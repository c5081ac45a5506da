pub mod handlers;
pub mod types;

use crate::{Result, analysis::Analyst, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(analyst: Arc<Analyst>) -> Router {
    let body_limit = analyst.max_upload_bytes() + MULTIPART_OVERHEAD;
    let app_state = handlers::AppState { analyst };

    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze_page))
        .route("/api/analyze", post(handlers::analyze_api))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    let analyst = Arc::new(Analyst::new(&config)?);
    let app = router(analyst);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
