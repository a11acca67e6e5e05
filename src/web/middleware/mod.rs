//! Middleware and extractors for the HTTP layer.

pub mod auth;
pub mod cors;

pub use auth::{extract_token, remember_cookie, CurrentUser, OptionalCurrentUser, REMEMBER_COOKIE};
pub use cors::create_cors_layer;
