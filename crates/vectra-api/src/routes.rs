//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use vectra_core::config::VectraConfig;
use vectra_core::error::{Result, VectraError};

use crate::handlers;
use crate::state::AppState;

/// Build the router over `state`, with CORS, tracing and compression layers.
pub fn create_router(state: AppState) -> Router {
    // Browsers on the service's own origin may call the API directly.
    let port = state.config.general.port;
    let origins: Vec<HeaderValue> = [
        format!("http://127.0.0.1:{}", port),
        format!("http://localhost:{}", port),
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let vector_routes = Router::new()
        .route("/embed", post(handlers::embed))
        .route("/text", post(handlers::embed_text))
        .route("/image", post(handlers::embed_image))
        .route("/video", post(handlers::embed_video))
        .route("/search", get(handlers::search).post(handlers::search_post))
        .route("/load-samples", post(handlers::load_samples))
        .route("/{id}", delete(handlers::delete_document));

    Router::new()
        .nest("/api/v1/vectors", vector_routes)
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/health/live", get(handlers::liveness))
        .route("/api/v1/health/ready", get(handlers::readiness))
        .route("/api/v1/health/db", get(handlers::engine_health))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to `general.bind_address:general.port` and serve until ctrl-c.
pub async fn start_server(config: &VectraConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.general.bind_address, config.general.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VectraError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .await
        .map_err(|e| VectraError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
