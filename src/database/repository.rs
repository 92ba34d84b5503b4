use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkPatch, NewBookmark};

const COLUMNS: &str = "id, title, url, description, rating";

/// Data access for the `bookmarks` table. Every method is a single statement
/// against the pool; errors are returned as-is.
#[derive(Clone)]
pub struct BookmarkRepository {
    pool: PgPool,
}

impl BookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Bookmark>, DatabaseError> {
        let rows = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {COLUMNS} FROM bookmarks ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn select_by_id(&self, id: i32) -> Result<Option<Bookmark>, DatabaseError> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert one row and return it with the id assigned by the database.
    pub async fn insert(&self, bookmark: &NewBookmark) -> Result<Bookmark, DatabaseError> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "INSERT INTO bookmarks (title, url, description, rating) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.description)
        .bind(bookmark.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Write the columns present in `patch`. Returns the number of rows touched.
    pub async fn update(&self, id: i32, patch: &BookmarkPatch) -> Result<u64, DatabaseError> {
        let Some(mut query) = update_query(id, patch) else {
            return Ok(0);
        };
        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn update_query(id: i32, patch: &BookmarkPatch) -> Option<QueryBuilder<'_, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE bookmarks SET ");
    let mut set = qb.separated(", ");
    if let Some(title) = &patch.title {
        set.push("title = ").push_bind_unseparated(title);
    }
    if let Some(url) = &patch.url {
        set.push("url = ").push_bind_unseparated(url);
    }
    if let Some(description) = &patch.description {
        set.push("description = ").push_bind_unseparated(description);
    }
    if let Some(rating) = patch.rating {
        set.push("rating = ").push_bind_unseparated(rating);
    }
    qb.push(" WHERE id = ").push_bind(id);
    Some(qb)
}
