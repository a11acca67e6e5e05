//! Feed handler.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::micropost::FeedBuilder;
use crate::web::dto::{MicropostResponse, PageQuery, PaginatedResponse};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

/// GET /api/feed - The signed-in user's feed, newest first.
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<MicropostResponse>>, ApiError> {
    let page = FeedBuilder::new(state.db.pool())
        .feed_page(user.id, query.page(), state.per_page)
        .await?;

    Ok(Json(PaginatedResponse::from_page(page, MicropostResponse::from)))
}
