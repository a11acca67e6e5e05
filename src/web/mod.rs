//! JSON-over-HTTP layer.
//!
//! Thin axum handlers over the auth, admin and micropost services. Sessions
//! are carried by the remember token in a bearer header or cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
