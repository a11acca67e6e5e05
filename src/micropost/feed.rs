//! Status feed.
//!
//! A user's feed is their own posts plus the posts of everyone they follow,
//! newest first. It is recomputed from the tables on every call.

use futures::stream::{BoxStream, StreamExt};

use super::types::Micropost;
use crate::db::{DbPool, PaginatedResult};
use crate::{MicroblogError, Result};

const FEED_SQL: &str = "SELECT id, user_id, content, created_at FROM microposts
     WHERE user_id = ?
        OR user_id IN (SELECT followed_id FROM relationships WHERE follower_id = ?)
     ORDER BY created_at DESC, id DESC";

const FEED_PAGE_SQL: &str = "SELECT id, user_id, content, created_at FROM microposts
     WHERE user_id = ?
        OR user_id IN (SELECT followed_id FROM relationships WHERE follower_id = ?)
     ORDER BY created_at DESC, id DESC
     LIMIT ? OFFSET ?";

const FEED_COUNT_SQL: &str = "SELECT COUNT(*) FROM microposts
     WHERE user_id = ?
        OR user_id IN (SELECT followed_id FROM relationships WHERE follower_id = ?)";

/// Builds feeds from the micropost and relationship tables.
pub struct FeedBuilder<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedBuilder<'a> {
    /// Create a new FeedBuilder with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Stream a user's whole feed, newest first (ties broken by id).
    ///
    /// Rows are fetched lazily as the stream is polled. The stream holds a
    /// pool connection until it is dropped, so with a single-connection pool
    /// drain it before issuing other queries.
    pub fn feed(&self, user_id: i64) -> BoxStream<'a, Result<Micropost>> {
        sqlx::query_as::<_, Micropost>(FEED_SQL)
            .bind(user_id)
            .bind(user_id)
            .fetch(self.pool)
            .map(|row| row.map_err(MicroblogError::from))
            .boxed()
    }

    /// One page of a user's feed with the total count.
    pub async fn feed_page(
        &self,
        user_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<PaginatedResult<Micropost>> {
        let (page, per_page, offset) = PaginatedResult::<Micropost>::window(page, per_page);

        let total: (i64,) = sqlx::query_as(FEED_COUNT_SQL)
            .bind(user_id)
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        let items = sqlx::query_as::<_, Micropost>(FEED_PAGE_SQL)
            .bind(user_id)
            .bind(user_id)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(PaginatedResult {
            items,
            total: total.0,
            page,
            per_page,
        })
    }
}
