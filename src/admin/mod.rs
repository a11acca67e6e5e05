//! Administration module.
//!
//! Privileged user management: deleting accounts and toggling the admin
//! flag. The admin flag is only ever written from here.

use tracing::{info, warn};

use crate::auth::permission::{require_admin, require_admin_over};
use crate::db::{Database, User, UserRepository};
use crate::{MicroblogError, Result};

/// Admin service for user management.
pub struct UserAdminService<'a> {
    db: &'a Database,
}

impl<'a> UserAdminService<'a> {
    /// Create a new UserAdminService.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Delete another user along with their microposts and relationships.
    ///
    /// Non-admins are rejected, as is an admin deleting themself. In both
    /// cases no user is removed.
    pub async fn destroy_user(&self, actor: Option<&User>, target_id: i64) -> Result<()> {
        let admin = require_admin_over(actor, target_id)?;

        let repo = UserRepository::new(self.db.pool());
        if !repo.delete(target_id).await? {
            return Err(MicroblogError::NotFound("user".to_string()));
        }

        info!(admin_id = admin.id, user_id = target_id, "User deleted");
        Ok(())
    }

    /// Grant or revoke admin rights.
    ///
    /// An admin cannot revoke their own rights.
    pub async fn set_admin(&self, actor: Option<&User>, target_id: i64, admin: bool) -> Result<User> {
        let acting = if admin {
            require_admin(actor)?
        } else {
            require_admin_over(actor, target_id)?
        };

        let repo = UserRepository::new(self.db.pool());
        if !repo.set_admin(target_id, admin).await? {
            return Err(MicroblogError::NotFound("user".to_string()));
        }

        info!(admin_id = acting.id, user_id = target_id, admin, "Admin flag changed");

        repo.get_by_id(target_id)
            .await?
            .ok_or_else(|| MicroblogError::NotFound("user".to_string()))
    }

    /// Promote the accounts listed in configuration to administrators.
    ///
    /// Emails with no matching account are skipped. Returns how many
    /// accounts were promoted.
    pub async fn promote_admins(&self, emails: &[String]) -> Result<usize> {
        let repo = UserRepository::new(self.db.pool());
        let mut promoted = 0;

        for email in emails {
            match repo.get_by_email(email).await? {
                Some(user) if user.is_admin() => {}
                Some(user) => {
                    repo.set_admin(user.id, true).await?;
                    info!(user_id = user.id, "Promoted configured admin");
                    promoted += 1;
                }
                None => {
                    warn!(email = %email, "Configured admin has no account yet");
                }
            }
        }

        Ok(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PermissionError;
    use crate::db::NewUser;

    async fn create_user(db: &Database, email: &str, admin: bool) -> User {
        let repo = UserRepository::new(db.pool());
        let user = repo
            .create(&NewUser::new("Example", email, "digest", format!("token-{email}")))
            .await
            .unwrap();
        if admin {
            repo.set_admin(user.id, true).await.unwrap();
        }
        repo.get_by_id(user.id).await.unwrap().unwrap()
    }

    async fn user_count(db: &Database) -> i64 {
        UserRepository::new(db.pool()).count().await.unwrap()
    }

    #[tokio::test]
    async fn test_admin_destroys_other_user() {
        let db = Database::open_in_memory().await.unwrap();
        let admin = create_user(&db, "admin@example.com", true).await;
        let other = create_user(&db, "other@example.com", false).await;

        let service = UserAdminService::new(&db);
        service.destroy_user(Some(&admin), other.id).await.unwrap();

        assert_eq!(user_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_destroy() {
        let db = Database::open_in_memory().await.unwrap();
        let member = create_user(&db, "member@example.com", false).await;
        let other = create_user(&db, "other@example.com", false).await;

        let service = UserAdminService::new(&db);
        let result = service.destroy_user(Some(&member), other.id).await;

        assert!(matches!(
            result,
            Err(MicroblogError::Permission(PermissionError::AdminRequired))
        ));
        assert_eq!(user_count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_destroy() {
        let db = Database::open_in_memory().await.unwrap();
        let other = create_user(&db, "other@example.com", false).await;

        let service = UserAdminService::new(&db);
        let result = service.destroy_user(None, other.id).await;

        assert!(matches!(
            result,
            Err(MicroblogError::Permission(PermissionError::NotAuthenticated))
        ));
        assert_eq!(user_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_admin_cannot_destroy_self() {
        let db = Database::open_in_memory().await.unwrap();
        let admin = create_user(&db, "admin@example.com", true).await;

        let service = UserAdminService::new(&db);
        let result = service.destroy_user(Some(&admin), admin.id).await;

        assert!(matches!(
            result,
            Err(MicroblogError::Permission(PermissionError::CannotModifySelf))
        ));
        assert_eq!(user_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_destroy_missing_user() {
        let db = Database::open_in_memory().await.unwrap();
        let admin = create_user(&db, "admin@example.com", true).await;

        let service = UserAdminService::new(&db);
        let result = service.destroy_user(Some(&admin), 999).await;
        assert!(matches!(result, Err(MicroblogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_admin() {
        let db = Database::open_in_memory().await.unwrap();
        let admin = create_user(&db, "admin@example.com", true).await;
        let member = create_user(&db, "member@example.com", false).await;

        let service = UserAdminService::new(&db);

        let promoted = service.set_admin(Some(&admin), member.id, true).await.unwrap();
        assert!(promoted.is_admin());

        let demoted = service.set_admin(Some(&admin), member.id, false).await.unwrap();
        assert!(!demoted.is_admin());

        let result = service.set_admin(Some(&member), admin.id, false).await;
        assert!(matches!(result, Err(MicroblogError::Permission(_))));

        let result = service.set_admin(Some(&admin), admin.id, false).await;
        assert!(matches!(
            result,
            Err(MicroblogError::Permission(PermissionError::CannotModifySelf))
        ));
    }

    #[tokio::test]
    async fn test_promote_admins() {
        let db = Database::open_in_memory().await.unwrap();
        let user = create_user(&db, "boss@example.com", false).await;

        let service = UserAdminService::new(&db);
        let emails = vec!["BOSS@example.com".to_string(), "ghost@example.com".to_string()];

        assert_eq!(service.promote_admins(&emails).await.unwrap(), 1);
        // Already promoted
        assert_eq!(service.promote_admins(&emails).await.unwrap(), 0);

        let repo = UserRepository::new(db.pool());
        assert!(repo.get_by_id(user.id).await.unwrap().unwrap().is_admin());
    }
}
