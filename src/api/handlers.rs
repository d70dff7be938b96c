//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::extract::JsonBody;
use crate::api::routes::AppState;
use crate::error::ApiError;
use crate::generation::{generate_and_host, GenerateImageDto, GenerationResult};

pub const SERVICE_NAME: &str = "Perchance Worker";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub imgur_configured: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        imgur_configured: state.imgur_configured,
    })
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<GenerateImageDto>,
) -> Result<Json<GenerationResult>, ApiError> {
    let request = payload.validate()?;
    let result = generate_and_host(state.generator.as_ref(), state.host.as_ref(), request).await?;
    Ok(Json(result))
}
