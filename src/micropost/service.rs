//! Micropost service.
//!
//! High-level operations for posting and deleting with ownership checks.

use tracing::info;

use super::repository::MicropostRepository;
use super::types::{Micropost, NewMicropost};
use crate::auth::permission::require_owner;
use crate::auth::validation::{too_long, FieldErrors, BLANK};
use crate::db::{Database, PaginatedResult, User, UserRepository};
use crate::{MicroblogError, Result};

/// Maximum micropost length (in characters).
pub const MAX_MICROPOST_LENGTH: usize = 140;

/// Validate micropost content.
pub fn validate_content(content: &str) -> Result<()> {
    let mut errors = FieldErrors::new();
    if content.trim().is_empty() {
        errors.add("content", BLANK);
    }
    if content.chars().count() > MAX_MICROPOST_LENGTH {
        errors.add("content", too_long(MAX_MICROPOST_LENGTH));
    }
    errors.into_result()
}

/// Service for micropost operations.
pub struct MicropostService<'a> {
    db: &'a Database,
}

impl<'a> MicropostService<'a> {
    /// Create a new MicropostService.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Publish a post as `actor`.
    pub async fn post(&self, actor: &User, content: &str) -> Result<Micropost> {
        validate_content(content)?;

        let repo = MicropostRepository::new(self.db.pool());
        let post = repo.create(&NewMicropost::new(actor.id, content)).await?;

        info!(user_id = actor.id, micropost_id = post.id, "Micropost created");
        Ok(post)
    }

    /// Delete one of `actor`'s posts.
    pub async fn delete(&self, actor: &User, post_id: i64) -> Result<()> {
        let repo = MicropostRepository::new(self.db.pool());
        let post = repo
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| MicroblogError::NotFound("micropost".to_string()))?;

        require_owner(actor, post.user_id)?;

        repo.delete(post.id).await?;
        info!(user_id = actor.id, micropost_id = post.id, "Micropost deleted");
        Ok(())
    }

    /// A user's posts for their profile page, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<PaginatedResult<Micropost>> {
        if UserRepository::new(self.db.pool())
            .get_by_id(user_id)
            .await?
            .is_none()
        {
            return Err(MicroblogError::NotFound("user".to_string()));
        }

        MicropostRepository::new(self.db.pool())
            .list_by_user(user_id, page, per_page)
            .await
    }
}
