//! Common error type, result alias, and the HTTP error response shape.
//!
//! `AppError` is what every adapter and the pipeline return. `ApiError` is
//! what handlers return; converting one into the other is the only place
//! where failures are logged and given an HTTP status.
use std::error::Error as StdError;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

/// Generic message returned for every failure past validation.
pub const GENERATION_FAILED: &str = "Failed to generate image";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("HTTP request error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Perchance error: {0}")]
    Perchance(String),

    #[error("Imgur upload failed: {status} - {body}")]
    Imgur { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            code: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.into() }),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if let AppError::Validation(message) = err {
            tracing::warn!("Rejected request: {}", message);
            return ApiError::bad_request(message);
        }

        tracing::error!(
            error = ?err,
            causes = ?cause_chain(&err),
            "Error generating image: {}",
            err
        );

        ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({
                "error": GENERATION_FAILED,
                "details": err.to_string(),
            }),
        }
    }
}

/// Messages of every underlying cause, outermost first, excluding `err` itself.
pub fn cause_chain(err: &dyn StdError) -> Vec<String> {
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}
