//! API handlers.

pub mod auth;
pub mod pages;

pub use auth::*;
pub use pages::*;
