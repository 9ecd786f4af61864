//! Authentication module for authgate.
//!
//! This module provides password hashing, the identity types and the
//! registration/login/logout service.

mod identity;
mod password;
mod service;

pub use identity::{IdentitySlot, Principal};
pub use password::{verify_password, Argon2Hasher, CredentialHasher, PasswordError};
pub use service::{AuthService, RegistrationRequest};
