//! Follow relationships.

use chrono::Utc;
use tracing::info;

use super::types::Relationship;
use crate::db::{DbPool, User};
use crate::{MicroblogError, Result};

/// Message for an attempt to follow oneself.
pub const CANNOT_FOLLOW_SELF: &str = "can't follow yourself";

/// Repository for follower/followed edges.
pub struct RelationshipRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RelationshipRepository<'a> {
    /// Create a new RelationshipRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Make `follower_id` follow `followed_id`.
    ///
    /// Following someone already followed returns the existing edge.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<Relationship> {
        if follower_id == followed_id {
            return Err(MicroblogError::field("followed_id", CANNOT_FOLLOW_SELF));
        }

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(followed_id)
            .fetch_one(self.pool)
            .await?;
        if !exists.0 {
            return Err(MicroblogError::NotFound("user".to_string()));
        }

        let result = sqlx::query(
            "INSERT INTO relationships (follower_id, followed_id, created_at) VALUES (?, ?, ?)
             ON CONFLICT(follower_id, followed_id) DO NOTHING",
        )
        .bind(follower_id)
        .bind(followed_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(follower_id, followed_id, "Followed user");
        }

        self.get(follower_id, followed_id)
            .await?
            .ok_or_else(|| MicroblogError::NotFound("relationship".to_string()))
    }

    /// Remove a follow edge. Returns false if there was none.
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM relationships WHERE follower_id = ? AND followed_id = ?")
                .bind(follower_id)
                .bind(followed_id)
                .execute(self.pool)
                .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(follower_id, followed_id, "Unfollowed user");
        }
        Ok(removed)
    }

    /// Look up one edge.
    pub async fn get(&self, follower_id: i64, followed_id: i64) -> Result<Option<Relationship>> {
        let relationship = sqlx::query_as::<_, Relationship>(
            "SELECT id, follower_id, followed_id, created_at FROM relationships
             WHERE follower_id = ? AND followed_id = ?",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(relationship)
    }

    /// Whether `follower_id` follows `followed_id`.
    pub async fn is_following(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        Ok(self.get(follower_id, followed_id).await?.is_some())
    }

    /// Users that `user_id` follows, ordered by id.
    pub async fn following(&self, user_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT u.id, u.name, u.email, u.password_digest, u.remember_token, u.admin,
                    u.created_at, u.updated_at
             FROM users u JOIN relationships r ON r.followed_id = u.id
             WHERE r.follower_id = ?
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Users following `user_id`, ordered by id.
    pub async fn followers(&self, user_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT u.id, u.name, u.email, u.password_digest, u.remember_token, u.admin,
                    u.created_at, u.updated_at
             FROM users u JOIN relationships r ON r.follower_id = u.id
             WHERE r.followed_id = ?
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Number of users `user_id` follows.
    pub async fn following_count(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM relationships WHERE follower_id = ?")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count.0)
    }

    /// Number of users following `user_id`.
    pub async fn followers_count(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM relationships WHERE followed_id = ?")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup() -> (Database, Vec<i64>) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let mut ids = Vec::new();
        for name in ["michael", "archer", "lana"] {
            let user = repo
                .create(&NewUser::new(
                    name,
                    format!("{name}@example.com"),
                    "digest",
                    format!("token-{name}"),
                ))
                .await
                .unwrap();
            ids.push(user.id);
        }
        (db, ids)
    }

    #[tokio::test]
    async fn test_follow_and_unfollow() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        assert!(!repo.is_following(ids[0], ids[1]).await.unwrap());

        let rel = repo.follow(ids[0], ids[1]).await.unwrap();
        assert_eq!(rel.follower_id, ids[0]);
        assert_eq!(rel.followed_id, ids[1]);
        assert!(repo.is_following(ids[0], ids[1]).await.unwrap());
        assert!(!repo.is_following(ids[1], ids[0]).await.unwrap());

        assert!(repo.unfollow(ids[0], ids[1]).await.unwrap());
        assert!(!repo.is_following(ids[0], ids[1]).await.unwrap());
        assert!(!repo.unfollow(ids[0], ids[1]).await.unwrap());
    }

    #[tokio::test]
    async fn test_follow_twice_is_idempotent() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        let first = repo.follow(ids[0], ids[1]).await.unwrap();
        let second = repo.follow(ids[0], ids[1]).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.following_count(ids[0]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cannot_follow_self() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        let result = repo.follow(ids[0], ids[0]).await;
        match result {
            Err(MicroblogError::Validation(errors)) => {
                assert_eq!(errors.get("followed_id").to_vec(), vec![CANNOT_FOLLOW_SELF]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_follow_missing_user() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        let result = repo.follow(ids[0], 999).await;
        assert!(matches!(result, Err(MicroblogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_following_and_followers() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        repo.follow(ids[0], ids[1]).await.unwrap();
        repo.follow(ids[0], ids[2]).await.unwrap();
        repo.follow(ids[2], ids[0]).await.unwrap();

        let following: Vec<i64> = repo
            .following(ids[0])
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(following, vec![ids[1], ids[2]]);

        let followers: Vec<i64> = repo
            .followers(ids[0])
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(followers, vec![ids[2]]);

        assert_eq!(repo.following_count(ids[0]).await.unwrap(), 2);
        assert_eq!(repo.followers_count(ids[0]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_relationships_removed_with_user() {
        let (db, ids) = setup().await;
        let repo = RelationshipRepository::new(db.pool());

        repo.follow(ids[0], ids[1]).await.unwrap();
        repo.follow(ids[1], ids[0]).await.unwrap();

        UserRepository::new(db.pool()).delete(ids[1]).await.unwrap();

        assert_eq!(repo.following_count(ids[0]).await.unwrap(), 0);
        assert_eq!(repo.followers_count(ids[0]).await.unwrap(), 0);
    }
}
