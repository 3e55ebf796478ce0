pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted snapshot body.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<config::AppConfig>,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build the full router with middleware.
pub fn app(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL; CORS disabled");
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

    let api = Router::new()
        .route("/risks/residual", post(routes::risks::residual))
        .route("/risks/heatmap", post(routes::risks::heatmap))
        .route("/compliance/aggregate", post(routes::compliance::aggregate))
        .route("/compliance/score", post(routes::compliance::score))
        .route("/kris/status", post(routes::kris::status))
        .route(
            "/traceability/requirements/{code}",
            post(routes::traceability::requirement),
        )
        .route("/traceability/risks/{id}", post(routes::traceability::risk))
        .route("/dashboard/summary", post(routes::dashboard::summary));

    Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
