//! Micropost and relationship models.

use chrono::{DateTime, Utc};

/// A short post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Micropost {
    /// Unique micropost ID.
    pub id: i64,
    /// ID of the owning user.
    pub user_id: i64,
    /// Post text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new micropost.
#[derive(Debug, Clone)]
pub struct NewMicropost {
    /// ID of the owning user.
    pub user_id: i64,
    /// Post text.
    pub content: String,
    /// Creation timestamp; `None` means now.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMicropost {
    /// Create a new micropost record.
    pub fn new(user_id: i64, content: impl Into<String>) -> Self {
        Self {
            user_id,
            content: content.into(),
            created_at: None,
        }
    }

    /// Backdate the post (used when importing or seeding).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// A follower -> followed edge.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Relationship {
    pub id: i64,
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTime<Utc>,
}
