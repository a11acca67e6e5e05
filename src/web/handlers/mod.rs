//! Request handlers for the JSON API.

pub mod feed;
pub mod microposts;
pub mod relationships;
pub mod sessions;
pub mod users;

use std::sync::Arc;

use crate::auth::{CredentialHasher, UserValidator};
use crate::config::Config;
use crate::db::Database;
use crate::Result;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<Database>,
    /// Password hasher.
    pub hasher: CredentialHasher,
    /// Signup and profile validator.
    pub validator: UserValidator,
    /// Items per page for listings.
    pub per_page: u32,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Arc<Database>,
        hasher: CredentialHasher,
        validator: UserValidator,
        per_page: u32,
    ) -> Self {
        Self {
            db,
            hasher,
            validator,
            per_page: per_page.max(1),
        }
    }

    /// Build the state from configuration.
    pub fn from_config(db: Arc<Database>, config: &Config) -> Result<Self> {
        Ok(Self::new(
            db,
            CredentialHasher::from_config(&config.auth)?,
            UserValidator::from_config(&config.auth),
            config.pagination.per_page,
        ))
    }
}
