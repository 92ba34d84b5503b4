pub mod collection;
pub mod payload;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::create as bookmarks_create;
pub use collection::list as bookmarks_list;
pub use record::delete as bookmark_delete;
pub use record::get as bookmark_get;
pub use record::patch as bookmark_patch;
