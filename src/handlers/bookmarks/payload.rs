use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Number, Value};
use tracing::error;

use crate::database::models::{BookmarkPatch, NewBookmark};
use crate::error::ApiError;

/// Columns a client may write, in the order they are validated.
pub const FIELDS: [&str; 4] = ["title", "url", "description", "rating"];

pub const PATCH_REQUIRES_FIELD: &str =
    "Request body must contain either 'title', 'url', 'description' or 'rating'";

/// Unwrap a JSON body that must be an object.
pub fn json_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid_json("Request body must be a JSON object")),
    }
}

/// All four fields are required and must not be null. The first missing one
/// is reported.
pub fn parse_new_bookmark(body: &Map<String, Value>) -> Result<NewBookmark, ApiError> {
    for field in FIELDS {
        if body.get(field).map_or(true, Value::is_null) {
            error!("{} is required", field);
            return Err(ApiError::bad_request(format!("Missing {} in request body", field)));
        }
    }

    Ok(NewBookmark {
        title: text_field(body, "title")?.unwrap_or_default(),
        url: text_field(body, "url")?.unwrap_or_default(),
        description: text_field(body, "description")?.unwrap_or_default(),
        rating: rating_field(body)?.unwrap_or_default(),
    })
}

/// At least one recognized field must be truthy; once that holds, every
/// recognized non-null field is written.
pub fn parse_patch(body: &Map<String, Value>) -> Result<BookmarkPatch, ApiError> {
    let supplied = FIELDS
        .iter()
        .filter(|field| body.get(**field).is_some_and(is_truthy))
        .count();
    if supplied == 0 {
        return Err(ApiError::bad_request(PATCH_REQUIRES_FIELD));
    }

    Ok(BookmarkPatch {
        title: text_field(body, "title")?,
        url: text_field(body, "url")?,
        description: text_field(body, "description")?,
        rating: rating_field(body)?,
    })
}

fn text_field(body: &Map<String, Value>, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::bad_request(format!("'{}' must be a string", field))),
    }
}

fn rating_field(body: &Map<String, Value>) -> Result<Option<i32>, ApiError> {
    match body.get("rating") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => whole_number(n)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request("'rating' must be an integer")),
        Some(_) => Err(ApiError::bad_request("'rating' must be an integer")),
    }
}

/// `4` and `4.0` are the same rating; `4.5` and anything outside `i32` are not.
fn whole_number(n: &Number) -> Option<i32> {
    if let Some(v) = n.as_i64() {
        return i32::try_from(v).ok();
    }
    let f = n.as_f64()?;
    let in_range = f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64;
    in_range.then_some(f as i32)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
