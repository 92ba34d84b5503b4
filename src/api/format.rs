use serde::{Deserialize, Serialize};

use crate::api::sanitize::sanitize_html;
use crate::database::models::Bookmark;

/// Public wire format of a bookmark: `{ id, title, url, description, rating }`
/// with every free-text field passed through the HTML filter. Handlers can
/// only serialize bookmarks through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i32,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            title: sanitize_html(&bookmark.title),
            url: sanitize_html(&bookmark.url),
            description: sanitize_html(&bookmark.description),
            rating: bookmark.rating,
        }
    }
}

pub fn bookmarks_to_response(bookmarks: Vec<Bookmark>) -> Vec<BookmarkResponse> {
    bookmarks.into_iter().map(BookmarkResponse::from).collect()
}
