// handlers/mod.rs - HTTP handlers
//
// Every handler sits behind the bearer-token gate and the error normalizer;
// see `crate::app` for the middleware stack.
pub mod bookmarks;

use crate::error::ApiError;

/// Any path without a route.
pub async fn fallback() -> ApiError {
    ApiError::not_found("Not found")
}
