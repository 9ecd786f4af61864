//! Page handlers for authenticated and error views.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::web::dto::{ApiResponse, MessageResponse, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /home - The caller's own account.
pub async fn home(AuthUser(principal): AuthUser) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::new(UserInfo::from(&principal)))
}

/// GET /users/:username - Look up a user by name.
///
/// Goes through the identity-loading path, so an unknown name is a 404
/// rather than an empty result.
pub async fn get_user(
    State(state): State<Arc<super::AppState>>,
    AuthUser(_caller): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let principal = state.auth.load_principal(&username).await?;
    Ok(Json(ApiResponse::new(UserInfo::from(&principal))))
}

/// GET /errorpage - Where clients land after a failed login.
pub async fn error_page() -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::new(MessageResponse::new(
        "Authentication failed. Check your username and password and try again.",
    )))
}
