use axum::Json;
use axum_macros::FromRequest;

use crate::error::ApiError;

/// `Json` that answers malformed bodies with a 400 `{error}` instead of
/// axum's plain-text rejections.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
