use std::any::Any;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{ApiError, InternalFailure};
use crate::state::AppState;

/// Last stop for failures that were not turned into a specific response.
///
/// `ApiError::Internal` responses leave the handler with an opaque body and
/// the raw cause in their extensions. Here the cause is logged and, outside
/// production, written back into the body for diagnostics.
pub async fn normalize_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    let Some(InternalFailure(cause)) = response.extensions_mut().remove::<InternalFailure>() else {
        return response;
    };

    error!(path = %path, error = %cause, "request failed");

    if state.config.is_production() {
        return response;
    }
    verbose_response(&cause)
}

pub fn verbose_response(cause: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": cause,
            "error": { "message": cause }
        })),
    )
        .into_response()
}

/// Turn a handler panic into an internal error so it flows through
/// `normalize_errors` like any other failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::internal(cause).into_response()
}
