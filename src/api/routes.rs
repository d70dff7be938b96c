use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::imgur::ImageHost;
use crate::perchance::ImageGenerator;

/// Process-wide state. Built once at startup and never mutated, so concurrent
/// requests only share read-only handles.
pub struct AppState {
    pub generator: Arc<dyn ImageGenerator>,
    pub host: Arc<dyn ImageHost>,
    pub imgur_configured: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
