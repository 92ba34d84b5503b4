use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info};

use crate::api::BookmarkResponse;
use crate::database::models::Bookmark;
use crate::error::ApiError;
use crate::state::AppState;

use super::payload::{json_object, parse_patch};

pub const BOOKMARK_NOT_FOUND: &str = "Bookmark does not exist";

/// Resolve `:id` to a stored row, or 404. Ids that are not integers, or not
/// even valid UTF-8 once decoded, cannot exist and are reported the same way.
async fn fetch_bookmark(
    state: &AppState,
    id: Result<Path<String>, PathRejection>,
) -> Result<Bookmark, ApiError> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            error!("Bookmark id rejected: {}", rejection.body_text());
            return Err(ApiError::not_found(BOOKMARK_NOT_FOUND));
        }
    };

    let found = match id.parse::<i32>() {
        Ok(id) => state.bookmarks.select_by_id(id).await?,
        Err(_) => None,
    };

    found.ok_or_else(|| {
        error!("Bookmark with id {} does not exist", id);
        ApiError::not_found(BOOKMARK_NOT_FOUND)
    })
}

/// GET /api/bookmarks/:id - Get a single bookmark
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let bookmark = fetch_bookmark(&state, id).await?;
    Ok(Json(BookmarkResponse::from(bookmark)))
}

/// PATCH /api/bookmarks/:id - Partially update a bookmark
pub async fn patch(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let bookmark = fetch_bookmark(&state, id).await?;

    let body = json_object(payload)?;
    let patch = parse_patch(&body)?;

    state.bookmarks.update(bookmark.id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/bookmarks/:id - Delete a bookmark
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let bookmark = fetch_bookmark(&state, id).await?;

    state.bookmarks.delete(bookmark.id).await?;
    info!("Bookmark with id {} deleted", bookmark.id);
    Ok(StatusCode::NO_CONTENT)
}
