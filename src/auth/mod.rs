//! Authentication module.
//!
//! This module provides password hashing, field validation, signup and
//! profile edits, remember-token sessions and permission checks.

pub mod password;
pub mod permission;
mod registration;
mod session;
pub mod validation;

pub use password::CredentialHasher;
pub use permission::PermissionError;
pub use registration::{register, update_profile};
pub use session::{generate_remember_token, AuthService};
pub use validation::{FieldErrors, ProfileForm, SignupForm, UserValidator};
