use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

pub const UNAUTHORIZED: &str = "unauthorized request";

/// Rejects any request whose bearer token differs from the configured
/// `API_TOKEN`. Runs before routing, so unknown paths are rejected too.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = extract_bearer_token(request.headers())
        .is_some_and(|token| token == state.config.security.api_token);

    if !authorized {
        error!("Unauthorized request to path: {}", request.uri().path());
        return ApiError::unauthorized(UNAUTHORIZED).into_response();
    }

    next.run(request).await
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
