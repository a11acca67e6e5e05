//! Follow and unfollow handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::micropost::RelationshipRepository;
use crate::web::dto::{ApiResponse, FollowRequest, RelationshipResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

/// POST /api/relationships - Follow a user.
pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<FollowRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RelationshipResponse>>), ApiError> {
    let relationship = RelationshipRepository::new(state.db.pool())
        .follow(user.id, req.followed_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(relationship.into())),
    ))
}

/// DELETE /api/relationships/:followed_id - Unfollow a user.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(followed_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = RelationshipRepository::new(state.db.pool())
        .unfollow(user.id, followed_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found("Not following this user"));
    }

    Ok(StatusCode::NO_CONTENT)
}
