//! Middleware for the HTTP API.

pub mod auth;
pub mod security;

pub use auth::{require_session, AuthUser, RequestIdentity};
pub use security::security_headers;
