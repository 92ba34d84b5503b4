use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::{bookmarks_to_response, BookmarkResponse};
use crate::error::ApiError;
use crate::state::AppState;

use super::payload::{json_object, parse_new_bookmark};

/// GET /api/bookmarks - List every bookmark
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BookmarkResponse>>, ApiError> {
    let bookmarks = state.bookmarks.select_all().await?;
    Ok(Json(bookmarks_to_response(bookmarks)))
}

/// POST /api/bookmarks - Create a bookmark
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_object(payload)?;
    let new_bookmark = parse_new_bookmark(&body)?;

    let bookmark = state.bookmarks.insert(&new_bookmark).await?;
    info!("Bookmark with id {} created", bookmark.id);

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookmarkResponse::from(bookmark)),
    ))
}
