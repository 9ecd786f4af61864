//! Store contracts consumed by the authentication core.
//!
//! The core only depends on these traits, so any record store that
//! satisfies them (SQLite here, in-memory fakes in tests) is conformant.

use async_trait::async_trait;

use crate::db::{NewSession, NewUser, Session, User};
use crate::Result;

/// Persistent collection of user records keyed by unique username.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by exact username match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Insert a new user, assigning its ID.
    ///
    /// Returns `None` when the store rejects the username as a duplicate.
    /// The check and the insert are a single atomic step.
    async fn insert(&self, new_user: &NewUser) -> Result<Option<User>>;

    /// Persist changes to an existing user.
    async fn save(&self, user: &User) -> Result<User>;
}

/// Persistent collection of active sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session record, assigning its ID.
    async fn save(&self, new_session: &NewSession) -> Result<Session>;

    /// Look up a session by ID.
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Remove every session owned by `user_id`.
    ///
    /// Returns the number of rows removed. Zero is not an error.
    async fn delete_by_user_id(&self, user_id: i64) -> Result<u64>;

    /// Count sessions owned by `user_id`.
    async fn count_by_user_id(&self, user_id: i64) -> Result<i64>;
}
