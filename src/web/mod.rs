//! HTTP boundary for authgate.
//!
//! Maps requests onto the authentication core and enforces the access
//! policy: only login, registration and the error page are public.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
