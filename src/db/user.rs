//! User model.
//!
//! The write-side structs deliberately have no `admin` field: the flag can
//! only change through [`UserRepository::set_admin`](super::UserRepository::set_admin).

use chrono::{DateTime, Utc};

/// User entity representing a registered account.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address, always lower-case.
    pub email: String,
    /// Password digest (Argon2 PHC string).
    pub password_digest: String,
    /// Opaque token identifying a remembered session.
    pub remember_token: String,
    /// Whether the user is an administrator.
    pub admin: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address (normalized by the repository).
    pub email: String,
    /// Password digest (should be pre-hashed with Argon2).
    pub password_digest: String,
    /// Initial remember token.
    pub remember_token: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_digest: impl Into<String>,
        remember_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_digest: password_digest.into(),
            remember_token: remember_token.into(),
        }
    }
}

/// Profile columns an ordinary edit may change.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password digest (if changing password).
    pub password_digest: Option<String>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set new password digest.
    pub fn password_digest(mut self, digest: impl Into<String>) -> Self {
        self.password_digest = Some(digest.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_digest.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("Example User", "user@example.com", "digest", "token");

        assert_eq!(user.name, "Example User");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.password_digest, "digest");
        assert_eq!(user.remember_token, "token");
    }

    #[test]
    fn test_user_update_builder() {
        let update = UserUpdate::new().name("New Name").email("new@example.com");

        assert_eq!(update.name.as_deref(), Some("New Name"));
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert!(update.password_digest.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_user_update_empty() {
        assert!(UserUpdate::new().is_empty());
    }

    #[test]
    fn test_user_is_admin() {
        let now = Utc::now();
        let user = User {
            id: 1,
            name: "Example".to_string(),
            email: "user@example.com".to_string(),
            password_digest: "digest".to_string(),
            remember_token: "token".to_string(),
            admin: false,
            created_at: now,
            updated_at: now,
        };
        assert!(!user.is_admin());

        let admin = User {
            admin: true,
            ..user
        };
        assert!(admin.is_admin());
    }
}
