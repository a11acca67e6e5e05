//! Micropost handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::micropost::MicropostService;
use crate::web::dto::{ApiResponse, MicropostRequest, MicropostResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

/// POST /api/microposts - Post as the signed-in user.
pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<MicropostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MicropostResponse>>), ApiError> {
    let post = MicropostService::new(&state.db)
        .post(&user, &req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(post.into()))))
}

/// DELETE /api/microposts/:id - Delete one of one's own posts.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    MicropostService::new(&state.db).delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
