pub mod format;
pub mod sanitize;

pub use format::{bookmarks_to_response, BookmarkResponse};
pub use sanitize::sanitize_html;
