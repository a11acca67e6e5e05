//! Sign-in, remember tokens and sign-out.
//!
//! A session is identified by the user's remember token. Clients present it
//! on each request; signing out rotates it so every copy held elsewhere
//! stops resolving.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::password::CredentialHasher;
use crate::db::{DbPool, User, UserRepository};
use crate::{MicroblogError, Result};

/// Generate a new opaque remember token.
pub fn generate_remember_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Authentication against the user store.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    hasher: &'a CredentialHasher,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService.
    pub fn new(pool: &'a DbPool, hasher: &'a CredentialHasher) -> Self {
        Self {
            users: UserRepository::new(pool),
            hasher,
        }
    }

    /// Check an email/password pair.
    ///
    /// An unknown email and a wrong password fail with the same error and
    /// both pay for one digest verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self.users.get_by_email(email).await?;

        let digest = match user {
            Some(ref u) => u.password_digest.as_str(),
            None => self.hasher.dummy_digest(),
        };
        if !self.hasher.verify(password, Some(digest)) || user.is_none() {
            warn!(found = user.is_some(), "Sign-in failed");
            return Err(MicroblogError::Authentication);
        }

        let user = user.ok_or(MicroblogError::Authentication)?;
        info!(user_id = user.id, "Sign-in successful");

        Ok(user)
    }

    /// Resolve the user behind a remember token.
    ///
    /// A missing or unknown token resolves to no user.
    pub async fn current_user(&self, token: Option<&str>) -> Result<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };
        let user = self.users.get_by_remember_token(token).await?;
        if user.is_none() {
            debug!("Remember token did not resolve");
        }
        Ok(user)
    }

    /// Sign a user out everywhere by rotating their remember token.
    ///
    /// Returns the replacement token.
    pub async fn sign_out(&self, user_id: i64) -> Result<String> {
        let token = generate_remember_token();
        if !self.users.update_remember_token(user_id, &token).await? {
            return Err(MicroblogError::NotFound("user".to_string()));
        }

        info!(user_id, "Signed out");
        Ok(token)
    }
}
