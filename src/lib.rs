//! Microblog - user accounts and a micropost feed.
//!
//! Signup, remember-token sessions, admin user management, microposts,
//! follow relationships and the status feed, with a thin JSON API on top.

pub mod admin;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod micropost;
pub mod web;

pub use admin::UserAdminService;
pub use auth::{
    register, update_profile, AuthService, CredentialHasher, FieldErrors, PermissionError,
    ProfileForm, SignupForm, UserValidator,
};
pub use config::Config;
pub use db::{Database, NewUser, PaginatedResult, User, UserRepository, UserUpdate};
pub use error::{MicroblogError, Result};
pub use micropost::{FeedBuilder, Micropost, MicropostService, RelationshipRepository};
