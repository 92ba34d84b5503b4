use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::BookmarkRepository;

/// Shared by every request: immutable configuration plus the store handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bookmarks: BookmarkRepository,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            bookmarks: BookmarkRepository::new(pool),
        }
    }
}
