use sqlx::FromRow;

/// A stored row of the `bookmarks` table. Free-text fields are raw and must
/// go through `BookmarkResponse` before leaving the service.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Bookmark {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i32,
}

/// Validated input for an insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i32,
}

/// Columns to overwrite on an update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.rating.is_none()
    }
}
