pub mod auth;
pub mod errors;

pub use auth::require_api_token;
pub use errors::{normalize_errors, panic_response};
