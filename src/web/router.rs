//! Router configuration for the JSON API.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{feed, microposts, relationships, sessions, users, AppState};
use super::middleware::create_cors_layer;

/// Create the main API router, health check included.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let user_routes = Router::new()
        .route("/", get(users::index).post(users::create))
        .route(
            "/:id",
            get(users::show).patch(users::update).delete(users::destroy),
        )
        .route("/:id/following", get(users::following))
        .route("/:id/followers", get(users::followers));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .route(
            "/sessions",
            post(sessions::create).delete(sessions::destroy),
        )
        .route("/microposts", post(microposts::create))
        .route("/microposts/:id", delete(microposts::destroy))
        .route("/feed", get(feed::index))
        .route("/relationships", post(relationships::create))
        .route("/relationships/:followed_id", delete(relationships::destroy));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
