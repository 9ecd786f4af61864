//! Authenticated identity types.

use crate::db::User;

/// Minimal identity data for an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID.
    pub user_id: i64,
    /// Username.
    pub username: String,
    /// Stored password hash.
    pub password_hash: String,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            password_hash: user.password,
        }
    }
}

/// Per-request "current identity" slot owned by the boundary layer.
///
/// The authentication core never reads it; logout only asks the owner
/// to drop whatever identity it holds.
pub trait IdentitySlot {
    /// Forget the identity held for the current request.
    fn invalidate(&mut self);
}

impl IdentitySlot for Option<Principal> {
    fn invalidate(&mut self) {
        *self = None;
    }
}
