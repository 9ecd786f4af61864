//! Error types for authgate.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for authgate.
#[derive(Error, Debug)]
pub enum AuthGateError {
    /// Database error.
    ///
    /// Wraps errors from the store backend. Errors from sqlx are
    /// converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Identity lookup by username found no user.
    #[error("user not found with username: {0}")]
    UnknownUser(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for AuthGateError {
    fn from(e: sqlx::Error) -> Self {
        AuthGateError::Database(e.to_string())
    }
}

/// Result type alias for authgate operations.
pub type Result<T> = std::result::Result<T, AuthGateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_display() {
        let err = AuthGateError::UnknownUser("alice".to_string());
        assert_eq!(err.to_string(), "user not found with username: alice");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = AuthGateError::NotFound("session".to_string());
        assert_eq!(err.to_string(), "session not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = AuthGateError::Config("cookie_name is empty".to_string());
        assert_eq!(err.to_string(), "configuration error: cookie_name is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AuthGateError = io_err.into();
        assert!(matches!(err, AuthGateError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_password_error_conversion() {
        let err: AuthGateError = PasswordError::InvalidHash.into();
        assert!(matches!(err, AuthGateError::Password(_)));
        assert_eq!(err.to_string(), "password error: invalid password hash format");
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: AuthGateError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AuthGateError::Database(_)));
    }
}
