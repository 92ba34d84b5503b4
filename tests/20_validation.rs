mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use common::{delete, get, offline_app, patch, post, TOKEN};

const REQUIRED_FIELDS: [&str; 4] = ["title", "url", "description", "rating"];

// Validation happens before the store is touched, so the offline app answers
// these without a database.

#[tokio::test]
async fn create_reports_each_missing_field() -> Result<()> {
    let app = offline_app("test");

    for field in REQUIRED_FIELDS {
        let mut bookmark = json!({
            "title": "Test new title",
            "url": "www.mytesturl.com",
            "description": "Test tiny description",
            "rating": 4
        });
        bookmark.as_object_mut().unwrap().remove(field);

        let res = post(&app, "/api/bookmarks", bookmark).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert_eq!(
            res.body,
            json!({ "error": { "message": format!("Missing {} in request body", field) } })
        );
    }
    Ok(())
}

#[tokio::test]
async fn create_rejects_null_fields() -> Result<()> {
    let app = offline_app("test");

    let res = post(
        &app,
        "/api/bookmarks",
        json!({ "title": "t", "url": "u", "description": "d", "rating": null }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "error": { "message": "Missing rating in request body" } }));
    Ok(())
}

#[tokio::test]
async fn create_rejects_mistyped_rating() -> Result<()> {
    let app = offline_app("test");

    let res = post(
        &app,
        "/api/bookmarks",
        json!({ "title": "t", "url": "u", "description": "d", "rating": "five" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "error": { "message": "'rating' must be an integer" } }));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let app = offline_app("test");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bookmarks")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))?;
    let res = app.oneshot(request).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"]["message"].is_string(), "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn body_must_be_an_object() -> Result<()> {
    let app = offline_app("test");

    let res = post(&app, "/api/bookmarks", json!(["title", "url"])).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body,
        json!({ "error": { "message": "Request body must be a JSON object" } })
    );
    Ok(())
}

#[tokio::test]
async fn collection_accepts_trailing_slash() -> Result<()> {
    let app = offline_app("test");

    let res = post(&app, "/api/bookmarks/", json!({ "title": "t" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "error": { "message": "Missing url in request body" } }));
    Ok(())
}

#[tokio::test]
async fn undecodable_id_is_not_found() -> Result<()> {
    let app = offline_app("test");
    let not_found = json!({ "error": { "message": "Bookmark does not exist" } });

    let res = get(&app, "/api/bookmarks/%FF").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, not_found);

    let res = patch(&app, "/api/bookmarks/%FF", json!({ "title": "new" })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, not_found);

    let res = delete(&app, "/api/bookmarks/%FF").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, not_found);
    Ok(())
}
