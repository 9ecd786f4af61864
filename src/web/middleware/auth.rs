//! Session-cookie authentication: the access policy gate.
//!
//! A caller is authenticated only if its session cookie names a session
//! row that still exists and whose user still exists.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{IdentitySlot, Principal};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Identity of the caller for the current request.
///
/// Built per request from the session cookie; handlers receive it by
/// value, so no identity is ever shared between requests.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    principal: Option<Principal>,
}

impl RequestIdentity {
    /// Identity of an authenticated caller.
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Identity of an anonymous caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The caller's principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Whether the caller is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

impl IdentitySlot for RequestIdentity {
    fn invalidate(&mut self) {
        self.principal = None;
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the gate middleware
        if let Some(identity) = parts.extensions.get::<RequestIdentity>() {
            return Ok(identity.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(&state.session.cookie_name) else {
            return Ok(RequestIdentity::anonymous());
        };

        let principal = state.auth.resolve_session(cookie.value()).await?;
        Ok(RequestIdentity { principal })
    }
}

/// Extractor for authenticated callers.
///
/// Rejects with 401 when the request carries no live session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let identity = RequestIdentity::from_request_parts(parts, state).await?;
        identity
            .principal
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Middleware guarding routes that require an authenticated caller.
///
/// The resolved identity is stored in the request extensions so that
/// extractors further down do not hit the session store again.
pub async fn require_session(
    identity: RequestIdentity,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !identity.is_authenticated() {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        return Err(ApiError::unauthorized("Authentication required"));
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal {
            user_id: 1,
            username: "alice".to_string(),
            password_hash: "h".to_string(),
        }
    }

    #[test]
    fn test_anonymous_identity() {
        let identity = RequestIdentity::anonymous();
        assert!(!identity.is_authenticated());
        assert!(identity.principal().is_none());
    }

    #[test]
    fn test_authenticated_identity() {
        let identity = RequestIdentity::authenticated(principal());
        assert!(identity.is_authenticated());
        assert_eq!(identity.principal().unwrap().username, "alice");
    }

    #[test]
    fn test_invalidate() {
        let mut identity = RequestIdentity::authenticated(principal());
        identity.invalidate();
        assert!(!identity.is_authenticated());
    }
}
