#![allow(dead_code)]

use std::sync::OnceLock;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bookmarks_api::{
    app,
    config::AppConfig,
    database::{models::NewBookmark, BookmarkRepository, DatabaseManager},
    AppState,
};
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

pub const TOKEN: &str = "910237e9-95fd-4ecf-b17b-4af6605a1f01";

/// Nothing listens here; requests that reach the store fail fast.
const UNREACHABLE_DATABASE: &str = "postgres://nobody@127.0.0.1:1/bookmarks";

static DB_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub fn test_config(database_url: &str, environment: &str) -> AppConfig {
    let database_url = database_url.to_string();
    let environment = environment.to_string();
    AppConfig::from_lookup(move |key| match key {
        "APP_ENV" => Some(environment.clone()),
        "API_TOKEN" => Some(TOKEN.to_string()),
        "DATABASE_URL" => Some(database_url.clone()),
        "DATABASE_CONNECTION_TIMEOUT" => Some("1".to_string()),
        _ => None,
    })
}

/// App over a pool that never connects successfully. Good for anything that
/// is decided before the store is touched, and for exercising store failures.
pub fn offline_app(environment: &str) -> Router {
    app(offline_state(environment))
}

pub fn offline_state(environment: &str) -> AppState {
    let config = test_config(UNREACHABLE_DATABASE, environment);
    let pool = DatabaseManager::connect_lazy(&config.database).expect("lazy pool");
    AppState::new(config, pool)
}

/// App backed by the database at `TEST_DATABASE_URL`, with an empty table.
/// Holds a lock so cases in one test binary never share the table.
pub struct TestDb {
    pub app: Router,
    pub repo: BookmarkRepository,
    _guard: MutexGuard<'static, ()>,
}

pub async fn database_app() -> Result<Option<TestDb>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return Ok(None);
    };

    let guard = DB_LOCK.get_or_init(|| Mutex::new(())).lock().await;

    let config = test_config(&url, "test");
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to TEST_DATABASE_URL")?;
    DatabaseManager::migrate(&pool).await?;
    sqlx::query("TRUNCATE bookmarks RESTART IDENTITY")
        .execute(&pool)
        .await?;

    let state = AppState::new(config, pool);
    Ok(Some(TestDb {
        app: app(state.clone()),
        repo: state.bookmarks.clone(),
        _guard: guard,
    }))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
    };

    Ok(TestResponse { status, headers, body })
}

pub async fn get(app: &Router, uri: &str) -> Result<TestResponse> {
    send(app, Method::GET, uri, Some(TOKEN), None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Result<TestResponse> {
    send(app, Method::POST, uri, Some(TOKEN), Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> Result<TestResponse> {
    send(app, Method::PATCH, uri, Some(TOKEN), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Result<TestResponse> {
    send(app, Method::DELETE, uri, Some(TOKEN), None).await
}

pub fn make_bookmarks_array() -> Vec<NewBookmark> {
    vec![
        NewBookmark {
            title: "Thinkful".into(),
            url: "https://www.thinkful.com".into(),
            description: "Think outside the classroom".into(),
            rating: 5,
        },
        NewBookmark {
            title: "Google".into(),
            url: "https://www.google.com".into(),
            description: "Where we find everything else".into(),
            rating: 4,
        },
        NewBookmark {
            title: "MDN".into(),
            url: "https://developer.mozilla.org".into(),
            description: "The only place to find web documentation".into(),
            rating: 5,
        },
    ]
}

/// A bookmark carrying script payloads, and the title/description expected
/// back once filtered.
pub struct MaliciousBookmark {
    pub bookmark: NewBookmark,
    pub expected_title: String,
    pub expected_description: String,
}

pub fn make_malicious_bookmark() -> MaliciousBookmark {
    MaliciousBookmark {
        bookmark: NewBookmark {
            title: r#"Naughty naughty very naughty <script>alert("xss");</script>"#.into(),
            url: "https://www.hackers.com".into(),
            description: r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#.into(),
            rating: 1,
        },
        expected_title: r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#.into(),
        expected_description: r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#.into(),
    }
}

pub fn bookmark_json(id: i32, bookmark: &NewBookmark) -> Value {
    serde_json::json!({
        "id": id,
        "title": bookmark.title,
        "url": bookmark.url,
        "description": bookmark.description,
        "rating": bookmark.rating,
    })
}
