//! Remember-token authentication extractors.
//!
//! The token is read from `Authorization: Bearer <token>` first, then from
//! the `remember_token` cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use crate::auth::permission::require_signed_in;
use crate::auth::AuthService;
use crate::db::User;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::MicroblogError;

/// Name of the session cookie.
pub const REMEMBER_COOKIE: &str = "remember_token";

/// Extract the remember token from a request, if any.
pub fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(&parts.headers)
        .get(REMEMBER_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Build the session cookie for a token.
pub fn remember_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE, token))
        .path("/")
        .http_only(true)
        .permanent()
        .build()
}

/// Extractor for the signed-in user, if any.
///
/// An unknown token is treated like no token.
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalCurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts);
        let auth = AuthService::new(state.db.pool(), &state.hasher);
        let user = auth.current_user(token.as_deref()).await?;
        Ok(OptionalCurrentUser(user))
    }
}

/// Extractor for handlers that require a signed-in user.
///
/// Rejects with 401 when the request carries no valid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let OptionalCurrentUser(user) = OptionalCurrentUser::from_request_parts(parts, state).await?;
        let user = require_signed_in(user.as_ref()).map_err(MicroblogError::from)?;
        Ok(CurrentUser(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request};

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extract_bearer_token() {
        let parts = parts(Request::builder().header(AUTHORIZATION, "Bearer abc123"));
        assert_eq!(extract_token(&parts), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_cookie_token() {
        let parts = parts(Request::builder().header(COOKIE, "remember_token=xyz; theme=dark"));
        assert_eq!(extract_token(&parts), Some("xyz".to_string()));
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let parts = parts(
            Request::builder()
                .header(AUTHORIZATION, "Bearer from-header")
                .header(COOKIE, "remember_token=from-cookie"),
        );
        assert_eq!(extract_token(&parts), Some("from-header".to_string()));
    }

    #[test]
    fn test_no_token() {
        let parts = parts(Request::builder().header(AUTHORIZATION, "Basic dXNlcjpwYXNz"));
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn test_remember_cookie() {
        let cookie = remember_cookie("abc".to_string());
        assert_eq!(cookie.name(), REMEMBER_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
    }
}
