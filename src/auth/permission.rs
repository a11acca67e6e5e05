//! Permission checks.
//!
//! Checks take the acting user explicitly; there is no ambient session.
//! `None` means the request carried no valid remember token.

use thiserror::Error;

use crate::db::User;

/// Permission-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// User is not signed in.
    #[error("please sign in")]
    NotAuthenticated,

    /// Action is reserved for administrators.
    #[error("this action requires an administrator")]
    AdminRequired,

    /// Action targets a record belonging to someone else.
    #[error("you can only change your own records")]
    NotOwner,

    /// Administrators cannot delete their own account.
    #[error("administrators cannot delete themselves")]
    CannotModifySelf,
}

/// Check if a user is an administrator.
pub fn is_admin(user: &User) -> bool {
    user.is_admin()
}

/// Require a signed-in user.
///
/// # Examples
///
/// ```
/// use microblog::auth::permission::{require_signed_in, PermissionError};
///
/// assert_eq!(require_signed_in(None).unwrap_err(), PermissionError::NotAuthenticated);
/// ```
pub fn require_signed_in(user: Option<&User>) -> Result<&User, PermissionError> {
    user.ok_or(PermissionError::NotAuthenticated)
}

/// Require a signed-in administrator.
pub fn require_admin(user: Option<&User>) -> Result<&User, PermissionError> {
    let user = require_signed_in(user)?;
    if !is_admin(user) {
        return Err(PermissionError::AdminRequired);
    }
    Ok(user)
}

/// Require that the actor is the user being acted on.
pub fn require_same_user(user: Option<&User>, target_id: i64) -> Result<&User, PermissionError> {
    let user = require_signed_in(user)?;
    if user.id != target_id {
        return Err(PermissionError::NotOwner);
    }
    Ok(user)
}

/// Require that the actor owns a resource.
pub fn require_owner(actor: &User, owner_id: i64) -> Result<(), PermissionError> {
    if actor.id != owner_id {
        return Err(PermissionError::NotOwner);
    }
    Ok(())
}

/// Require an administrator acting on someone other than themself.
pub fn require_admin_over(user: Option<&User>, target_id: i64) -> Result<&User, PermissionError> {
    let admin = require_admin(user)?;
    if admin.id == target_id {
        return Err(PermissionError::CannotModifySelf);
    }
    Ok(admin)
}
