//! Micropost module.
//!
//! This module provides:
//! - Microposts owned by users
//! - Follow relationships between users
//! - The status feed built from both

pub mod feed;
pub mod relationship;
mod repository;
mod service;
mod types;

pub use feed::FeedBuilder;
pub use relationship::RelationshipRepository;
pub use repository::MicropostRepository;
pub use service::{validate_content, MicropostService, MAX_MICROPOST_LENGTH};
pub use types::{Micropost, NewMicropost, Relationship};
