//! authgate - minimal username/password authentication service.
//!
//! Users register with a username and password, log in to obtain a
//! server-side session, and log out to end it. Every route except login,
//! registration and the error page requires a live session.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    verify_password, Argon2Hasher, AuthService, CredentialHasher, IdentitySlot, PasswordError,
    Principal, RegistrationRequest,
};
pub use config::Config;
pub use db::{
    CredentialStore, Database, NewSession, NewUser, Session, SessionRepository, SessionStore,
    User, UserRepository,
};
pub use error::{AuthGateError, Result};
