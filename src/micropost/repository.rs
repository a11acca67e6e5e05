//! Micropost repository.

use chrono::Utc;

use super::types::{Micropost, NewMicropost};
use crate::db::{DbPool, PaginatedResult};
use crate::{MicroblogError, Result};

/// Repository for micropost CRUD operations.
pub struct MicropostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MicropostRepository<'a> {
    /// Create a new MicropostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a micropost. Content is stored as given.
    pub async fn create(&self, new_post: &NewMicropost) -> Result<Micropost> {
        let created_at = new_post.created_at.unwrap_or_else(Utc::now);
        let result =
            sqlx::query("INSERT INTO microposts (user_id, content, created_at) VALUES (?, ?, ?)")
                .bind(new_post.user_id)
                .bind(&new_post.content)
                .bind(created_at)
                .execute(self.pool)
                .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| MicroblogError::NotFound("micropost".to_string()))
    }

    /// Get a micropost by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Micropost>> {
        let post = sqlx::query_as::<_, Micropost>(
            "SELECT id, user_id, content, created_at FROM microposts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Delete a micropost by ID.
    ///
    /// Returns true if a micropost was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM microposts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's posts, newest first.
    pub async fn list_by_user(
        &self,
        user_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<PaginatedResult<Micropost>> {
        let (page, per_page, offset) = PaginatedResult::<Micropost>::window(page, per_page);

        let total = self.count_by_user(user_id).await?;
        let items = sqlx::query_as::<_, Micropost>(
            "SELECT id, user_id, content, created_at FROM microposts
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(i64::from(per_page))
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(PaginatedResult {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Count a user's posts.
    pub async fn count_by_user(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM microposts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}
