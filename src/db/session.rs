//! Session model for authgate.
//!
//! A session row asserts that a user authenticated at a given time.
//! Its existence is the only signal that the user is logged in.

use chrono::{DateTime, Utc};

/// Persisted session.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Session {
    /// Session ID (UUID v4), assigned by the store.
    pub id: String,
    /// Owning user ID.
    pub user_id: i64,
    /// When the user authenticated.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Owning user ID.
    pub user_id: i64,
    /// When the user authenticated.
    pub created_at: DateTime<Utc>,
}

impl NewSession {
    /// Create a session record for `user_id` stamped with the current time.
    pub fn now(user_id: i64) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}
