//! User repository.
//!
//! This module provides CRUD operations for users in the database.

use chrono::Utc;
use sqlx::QueryBuilder;

use super::pagination::PaginatedResult;
use super::user::{NewUser, User, UserUpdate};
use super::DbPool;
use crate::auth::validation::{normalize_email, TAKEN};
use crate::{MicroblogError, Result};

const USER_COLUMNS: &str =
    "id, name, email, password_digest, remember_token, admin, created_at, updated_at";

/// Map a UNIQUE violation on the users table to a field error on `email`.
///
/// The remember token index can collide too, but tokens are random UUIDs so
/// in practice only the email index ever fires.
fn map_write_error(e: sqlx::Error) -> MicroblogError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            MicroblogError::field("email", TAKEN)
        }
        _ => MicroblogError::Database(e.to_string()),
    }
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// The email is stored lower-cased. A duplicate email fails with a
    /// validation error on `email`, even when two creates race.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_digest, remember_token, admin, created_at, updated_at)
             VALUES (?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(normalize_email(&new_user.email))
        .bind(&new_user.password_digest)
        .bind(&new_user.remember_token)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(map_write_error)?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| MicroblogError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? COLLATE NOCASE"
        ))
        .bind(normalize_email(email))
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get the user holding a remember token.
    pub async fn get_by_remember_token(&self, token: &str) -> Result<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE remember_token = ?"
        ))
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Update a user's profile columns.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(normalize_email(email));
        }
        if let Some(ref digest) = update.password_digest {
            separated.push("password_digest = ");
            separated.push_bind_unseparated(digest);
        }
        separated.push("updated_at = ");
        separated.push_bind_unseparated(Utc::now());

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Set or clear the admin flag.
    ///
    /// Returns false if the user does not exist.
    pub async fn set_admin(&self, id: i64, admin: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET admin = ?, updated_at = ? WHERE id = ?")
            .bind(admin)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a user's remember token.
    pub async fn update_remember_token(&self, id: i64, token: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET remember_token = ? WHERE id = ?")
            .bind(token)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user and everything they own.
    ///
    /// Relationships in either direction and the user's microposts are
    /// removed in the same transaction as the user row.
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM relationships WHERE follower_id = ? OR followed_id = ?")
            .bind(id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM microposts WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// List users one page at a time, ordered by id.
    pub async fn list_paginated(&self, page: u32, per_page: u32) -> Result<PaginatedResult<User>> {
        let (page, per_page, offset) = PaginatedResult::<User>::window(page, per_page);

        let total = self.count().await?;
        let items = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?"
        ))
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

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Check if an email is used by a user other than `except_id`
    /// (case-insensitive).
    pub async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? COLLATE NOCASE AND id <> ?)",
        )
        .bind(normalize_email(email))
        .bind(except_id.unwrap_or(0))
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }
}
