//! Login endpoint.
//!
//! Verification goes through the password shim: bcrypt for hashed
//! credentials, exact comparison for legacy plaintext rows. Failures are
//! indistinguishable to the caller (always 401, never a user object).

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use steward_shared::auth::password::verify_password;
use steward_shared::models::user::User;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::users::UserDto;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserDto,
}

/// POST /api/auth
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<Json<LoginResponse>> {
    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing field: username".to_string()))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing field: password".to_string()))?;

    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let stored = user
        .password
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    if !verify_password(&password, stored)? {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(Json(LoginResponse {
        success: true,
        user: user.into(),
    }))
}
