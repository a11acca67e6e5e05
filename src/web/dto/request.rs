//! Request DTOs for Web API.
//!
//! User-facing bodies reject unknown fields, so a client cannot smuggle
//! `admin` or other columns into a write.

use serde::Deserialize;
use validator::Validate;

use super::validation::no_control_chars;
use crate::auth::{ProfileForm, SignupForm};
use crate::db::User;

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    /// Display name.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Password confirmation.
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

impl SignupRequest {
    /// Convert into the signup form.
    pub fn into_form(self) -> SignupForm {
        SignupForm {
            name: self.name,
            email: self.email,
            password: self.password,
            password_confirmation: self.password_confirmation,
        }
    }
}

/// Profile edit request. Omitted fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfileRequest {
    /// New display name.
    #[validate(custom(function = "no_control_chars"))]
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New password confirmation.
    pub password_confirmation: Option<String>,
}

impl ProfileRequest {
    /// Convert into a profile form, filling gaps from the current record.
    pub fn into_form(self, current: &User) -> ProfileForm {
        ProfileForm {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            password: self.password,
            password_confirmation: self.password_confirmation,
        }
    }
}

/// Sign-in request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// New micropost request.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MicropostRequest {
    /// Post text.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub content: String,
}

/// Follow request.
#[derive(Debug, Deserialize, Validate)]
pub struct FollowRequest {
    /// ID of the user to follow.
    pub followed_id: i64,
}

/// Page selection query (`?page=N`, 1-based).
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number.
    pub page: Option<u32>,
}

impl PageQuery {
    /// Requested page, defaulting to the first.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
