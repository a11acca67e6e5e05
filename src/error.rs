//! Error types for the microblog service.

use thiserror::Error;

use crate::auth::permission::PermissionError;
use crate::auth::validation::FieldErrors;

/// Common error type for the microblog service.
#[derive(Error, Debug)]
pub enum MicroblogError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Credentials did not match.
    ///
    /// Deliberately carries no detail so callers cannot tell an unknown
    /// email from a wrong password.
    #[error("invalid email/password combination")]
    Authentication,

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(#[from] PermissionError),

    /// Field-level validation failure.
    #[error("validation error: {0}")]
    Validation(FieldErrors),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Hash(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MicroblogError {
    /// Build a validation error carrying a single field message.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        MicroblogError::Validation(errors)
    }
}

impl From<FieldErrors> for MicroblogError {
    fn from(errors: FieldErrors) -> Self {
        MicroblogError::Validation(errors)
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for MicroblogError {
    fn from(e: sqlx::Error) -> Self {
        MicroblogError::Database(e.to_string())
    }
}

/// Result type alias for microblog operations.
pub type Result<T> = std::result::Result<T, MicroblogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_display() {
        let err = MicroblogError::Authentication;
        assert_eq!(err.to_string(), "invalid email/password combination");
    }

    #[test]
    fn test_permission_error_display() {
        let err: MicroblogError = PermissionError::AdminRequired.into();
        assert_eq!(
            err.to_string(),
            "permission denied: this action requires an administrator"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = MicroblogError::field("name", "can't be blank");
        assert_eq!(err.to_string(), "validation error: Name can't be blank");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = MicroblogError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MicroblogError = io_err.into();
        assert!(matches!(err, MicroblogError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: MicroblogError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, MicroblogError::Database(_)));
    }
}
