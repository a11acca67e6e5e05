//! User signup and profile edits.

use tracing::info;

use crate::auth::password::CredentialHasher;
use crate::auth::session::generate_remember_token;
use crate::auth::validation::{ProfileForm, SignupForm, UserValidator};
use crate::db::{NewUser, User, UserRepository, UserUpdate};
use crate::{MicroblogError, Result};

/// Register a new user.
///
/// This function:
/// 1. Validates all fields, including email uniqueness
/// 2. Hashes the password
/// 3. Creates the user with a fresh remember token
///
/// The new account is never an administrator. A concurrent signup with the
/// same email that slips past step 1 is still rejected by the store.
///
/// # Examples
///
/// ```ignore
/// let form = SignupForm::new("Example User", "user@example.com", "foobar");
/// let user = register(&repo, &hasher, &validator, &form).await?;
/// ```
pub async fn register(
    repo: &UserRepository<'_>,
    hasher: &CredentialHasher,
    validator: &UserValidator,
    form: &SignupForm,
) -> Result<User> {
    validator.validate_signup(repo, form).await?;

    let digest = hasher.digest(&form.password)?;
    let new_user = NewUser::new(
        form.name.trim(),
        &form.email,
        digest,
        generate_remember_token(),
    );

    let user = repo.create(&new_user).await?;

    info!(user_id = user.id, email = %user.email, "New user registered");

    Ok(user)
}

/// Apply a profile edit to an existing user.
///
/// The password is re-hashed only when the form changes it.
pub async fn update_profile(
    repo: &UserRepository<'_>,
    hasher: &CredentialHasher,
    validator: &UserValidator,
    user_id: i64,
    form: &ProfileForm,
) -> Result<User> {
    if repo.get_by_id(user_id).await?.is_none() {
        return Err(MicroblogError::NotFound("user".to_string()));
    }

    validator.validate_profile(repo, user_id, form).await?;

    let mut update = UserUpdate::new().name(form.name.trim()).email(&form.email);
    if form.changes_password() {
        if let Some(ref password) = form.password {
            update = update.password_digest(hasher.digest(password)?);
        }
    }

    let user = repo
        .update(user_id, &update)
        .await?
        .ok_or_else(|| MicroblogError::NotFound("user".to_string()))?;

    info!(
        user_id = user.id,
        password_changed = form.changes_password(),
        "Profile updated"
    );

    Ok(user)
}
