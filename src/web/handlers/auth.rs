//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::{Argon2Hasher, AuthService, RegistrationRequest};
use crate::config::SessionConfig;
use crate::db::{Database, SessionRepository, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UserInfo,
};
use crate::web::error::ApiError;
use crate::web::middleware::RequestIdentity;

/// Authentication service backed by the SQLite stores.
pub type SqliteAuthService = AuthService<UserRepository, SessionRepository, Argon2Hasher>;

/// Application state shared across handlers.
///
/// Holds no per-request data; the caller's identity arrives in each
/// handler as a `RequestIdentity` or `AuthUser` value.
pub struct AppState {
    /// Authentication core.
    pub auth: SqliteAuthService,
    /// Session cookie settings.
    pub session: SessionConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: &Database, hasher: Argon2Hasher, session: SessionConfig) -> Self {
        let auth = AuthService::new(
            UserRepository::new(db.pool().clone()),
            SessionRepository::new(db.pool().clone()),
            hasher,
        );
        Self { auth, session }
    }

    /// Build the cookie handing `session_id` to the client.
    pub fn session_cookie(&self, session_id: String) -> Cookie<'static> {
        Cookie::build((self.session.cookie_name.clone(), session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.session.secure_cookie)
            .build()
    }

    /// Build the cookie used to clear the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.session.cookie_name.clone(), ""))
            .path("/")
            .build()
    }
}

/// POST /register - User registration.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    if req.username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    let registered = state
        .auth
        .register(RegistrationRequest::new(&req.username, req.password))
        .await?;

    if !registered {
        return Err(ApiError::conflict("A user with this username already exists"));
    }

    Ok(Json(ApiResponse::new(RegisterResponse {
        username: req.username,
    })))
}

/// POST /login - User login.
///
/// Unknown username and wrong password produce the same response.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let session = state
        .auth
        .authenticate(&req.username, &req.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let response = LoginResponse {
        user: UserInfo {
            id: session.user_id,
            username: req.username,
        },
        logged_in_at: session.created_at.to_rfc3339(),
    };

    let jar = jar.add(state.session_cookie(session.id));
    Ok((jar, Json(ApiResponse::new(response))))
}

/// POST /logout - End every session of the caller.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut identity: RequestIdentity,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let user_id = identity
        .principal()
        .map(|p| p.user_id)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    state.auth.logout(user_id, &mut identity).await?;

    let jar = jar.remove(state.removal_cookie());
    Ok((jar, Json(ApiResponse::new(MessageResponse::new("Logged out")))))
}
