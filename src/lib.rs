use axum::{
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod state;

pub use state::AppState;

/// The full HTTP surface with its middleware stack.
pub fn app(state: AppState) -> Router {
    with_middleware(bookmark_routes(), state)
}

/// Wrap `routes` in the service's middleware. Outermost first: tracing, CORS,
/// security headers, bearer-token gate, error normalizer, panic catcher.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(handlers::fallback)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(from_fn_with_state(state.clone(), middleware::normalize_errors))
        .layer(from_fn_with_state(state.clone(), middleware::require_api_token))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn bookmark_routes() -> Router<AppState> {
    use handlers::bookmarks;

    let collection = get(bookmarks::bookmarks_list).post(bookmarks::bookmarks_create);

    Router::new()
        // Collection, with or without the trailing slash
        .route("/api/bookmarks", collection.clone())
        .route("/api/bookmarks/", collection)
        // Individual bookmark
        .route(
            "/api/bookmarks/:id",
            get(bookmarks::bookmark_get)
                .patch(bookmarks::bookmark_patch)
                .delete(bookmarks::bookmark_delete),
        )
}
