//! User model for authgate.

/// User entity representing a registered account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store.
    pub id: i64,
    /// Login username (unique, case-sensitive).
    pub username: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (must already be hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new user record from a username and password hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
        }
    }
}
