pub mod bookmark;

pub use bookmark::{Bookmark, BookmarkPatch, NewBookmark};
