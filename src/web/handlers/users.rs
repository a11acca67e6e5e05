//! User handlers: signup, listing, profiles, edits and admin deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use super::AppState;
use crate::admin::UserAdminService;
use crate::auth::permission::require_same_user;
use crate::auth::{register, update_profile};
use crate::db::UserRepository;
use crate::micropost::{MicropostService, RelationshipRepository};
use crate::web::dto::{
    ApiResponse, MicropostResponse, PageQuery, PaginatedResponse, ProfileRequest,
    ProfileResponse, SignupRequest, SignupResponse, UserResponse, ValidatedJson,
    WELCOME_MESSAGE,
};
use crate::web::error::ApiError;
use crate::web::middleware::{remember_cookie, CurrentUser, OptionalCurrentUser};
use crate::MicroblogError;

/// POST /api/users - Sign up and sign in.
pub async fn create(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<SignupResponse>>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = register(&repo, &state.hasher, &state.validator, &req.into_form()).await?;

    let token = user.remember_token.clone();
    let response = SignupResponse {
        user: user.into(),
        remember_token: token.clone(),
        flash: WELCOME_MESSAGE.to_string(),
    };

    Ok((
        StatusCode::CREATED,
        jar.add(remember_cookie(token)),
        Json(ApiResponse::new(response)),
    ))
}

/// GET /api/users - List users (signed in only).
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(_viewer): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let page = UserRepository::new(state.db.pool())
        .list_paginated(query.page(), state.per_page)
        .await?;

    Ok(Json(PaginatedResponse::from_page(page, UserResponse::from)))
}

/// GET /api/users/:id - Show a profile with its microposts.
pub async fn show(
    State(state): State<Arc<AppState>>,
    OptionalCurrentUser(viewer): OptionalCurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let microposts = MicropostService::new(&state.db)
        .list_for_user(id, query.page(), state.per_page)
        .await?;

    let relationships = RelationshipRepository::new(state.db.pool());
    let following_count = relationships.following_count(id).await?;
    let followers_count = relationships.followers_count(id).await?;
    let followed_by_viewer = match viewer {
        Some(ref viewer) if viewer.id != id => {
            Some(relationships.is_following(viewer.id, id).await?)
        }
        _ => None,
    };

    Ok(Json(ApiResponse::new(ProfileResponse {
        user: user.into(),
        microposts: PaginatedResponse::from_page(microposts, MicropostResponse::from),
        following_count,
        followers_count,
        followed_by_viewer,
    })))
}

/// PATCH /api/users/:id - Edit one's own profile.
pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_same_user(Some(&current), id).map_err(MicroblogError::from)?;

    let repo = UserRepository::new(state.db.pool());
    let form = req.into_form(&current);
    let user = update_profile(&repo, &state.hasher, &state.validator, id, &form).await?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// DELETE /api/users/:id - Delete a user (admin only, never oneself).
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    OptionalCurrentUser(actor): OptionalCurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserAdminService::new(&state.db)
        .destroy_user(actor.as_ref(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/:id/following - Users this user follows.
pub async fn following(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    ensure_user_exists(&state, id).await?;

    let users = RelationshipRepository::new(state.db.pool())
        .following(id)
        .await?;

    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/users/:id/followers - Users following this user.
pub async fn followers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    ensure_user_exists(&state, id).await?;

    let users = RelationshipRepository::new(state.db.pool())
        .followers(id)
        .await?;

    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

async fn ensure_user_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    UserRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("User not found"))
}
