//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::auth::Principal;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Public user information. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

impl From<&Principal> for UserInfo {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.user_id,
            username: principal.username.clone(),
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Registered username.
    pub username: String,
}

/// Login response. The session ID travels in the cookie only.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Logged-in user.
    pub user: UserInfo,
    /// When the session was opened (RFC 3339).
    pub logged_in_at: String,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
