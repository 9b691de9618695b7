pub mod api;

use crate::services::CryptoService;
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CryptoService,
}

impl AppState {
    pub fn new(service: CryptoService) -> Self {
        Self { service }
    }
}

/// Build the router with all API routes
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/crypto", get(api::list_normalized_handler))
        .route(
            "/api/v1/crypto/maxNormalizedRange",
            get(api::max_normalized_range_handler),
        )
        .route(
            "/api/v1/crypto/statistic",
            get(api::all_statistics_handler),
        )
        .route(
            "/api/v1/crypto/statistic/{crypto_name}",
            get(api::statistic_handler),
        )
        .route(
            "/api/v1/crypto/notSupported",
            get(api::list_not_supported_handler).post(api::replace_not_supported_handler),
        )
        .route("/health", get(api::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(app_state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Registering routes:");
    tracing::info!("  GET  /api/v1/crypto");
    tracing::info!("  GET  /api/v1/crypto/maxNormalizedRange?date=2022-01-04");
    tracing::info!("  GET  /api/v1/crypto/statistic");
    tracing::info!("  GET  /api/v1/crypto/statistic/{{cryptoName}}");
    tracing::info!("  GET  /api/v1/crypto/notSupported");
    tracing::info!("  POST /api/v1/crypto/notSupported");
    tracing::info!("  GET  /health");

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("Shutdown signal received");
}
