//! Session handlers: sign in and sign out.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use super::AppState;
use crate::auth::AuthService;
use crate::web::dto::{ApiResponse, SessionResponse, SignInRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::{remember_cookie, CurrentUser, REMEMBER_COOKIE};

/// POST /api/sessions - Sign in with email and password.
pub async fn create(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let user = AuthService::new(state.db.pool(), &state.hasher)
        .authenticate(&req.email, &req.password)
        .await?;

    let token = user.remember_token.clone();
    let response = SessionResponse {
        user: user.into(),
        remember_token: token.clone(),
    };

    Ok((jar.add(remember_cookie(token)), Json(ApiResponse::new(response))))
}

/// DELETE /api/sessions - Sign out.
///
/// Rotates the remember token so every copy of the old one stops working.
pub async fn destroy(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), ApiError> {
    AuthService::new(state.db.pool(), &state.hasher)
        .sign_out(user.id)
        .await?;

    let jar = jar.remove(Cookie::build(REMEMBER_COOKIE).path("/"));
    Ok((StatusCode::NO_CONTENT, jar))
}
