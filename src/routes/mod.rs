//! HTTP routes.

pub mod generate;
pub mod image_generate;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::gateway::AdGateway;

/// Liveness text served at `/`.
pub const HEALTH_TEXT: &str = "Ad Generator Backend is running!";

/// Build the application router.
pub fn router(gateway: Arc<AdGateway>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/generate", post(generate::generate_ad))
        .route("/image-generate", post(image_generate::generate_image))
        .with_state(gateway)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    HEALTH_TEXT
}
