//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{PaginatedResult, User};
use crate::micropost::{Micropost, Relationship};

/// Flash shown to a freshly signed-up user.
pub const WELCOME_MESSAGE: &str = "Welcome to the Sample App!";

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Build a response from a store page, converting each item.
    pub fn from_page<U>(page: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let meta = PaginationMeta {
            page: page.page,
            per_page: page.per_page,
            total: page.total.max(0) as u64,
            total_pages: page.total_pages(),
        };
        Self {
            data: page.items.into_iter().map(f).collect(),
            meta,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Number of pages.
    pub total_pages: u32,
}

// ============================================================================
// User DTOs
// ============================================================================

/// Public user information. Never includes the digest or token.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            admin: user.admin,
            created_at: user.created_at,
        }
    }
}

/// Response to a successful signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// The new user.
    pub user: UserResponse,
    /// Token identifying the new session.
    pub remember_token: String,
    /// Greeting for the new user.
    pub flash: String,
}

/// Response to a successful sign-in.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The signed-in user.
    pub user: UserResponse,
    /// Token identifying the session.
    pub remember_token: String,
}

/// A user's profile page.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    /// One page of the user's posts, newest first.
    pub microposts: PaginatedResponse<MicropostResponse>,
    pub following_count: i64,
    pub followers_count: i64,
    /// Whether the viewer follows this user (absent for anonymous viewers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_by_viewer: Option<bool>,
}

// ============================================================================
// Micropost DTOs
// ============================================================================

/// Micropost information.
#[derive(Debug, Serialize)]
pub struct MicropostResponse {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Micropost> for MicropostResponse {
    fn from(post: Micropost) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// Follow relationship information.
#[derive(Debug, Serialize)]
pub struct RelationshipResponse {
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Relationship> for RelationshipResponse {
    fn from(rel: Relationship) -> Self {
        Self {
            follower_id: rel.follower_id,
            followed_id: rel.followed_id,
            created_at: rel.created_at,
        }
    }
}
