//! User account management.
//!
//! Responses never carry the stored credential; [`UserDto`] exposes the
//! parsed permissions map instead of the raw JSON column.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::auth::password::hash_password;
use steward_shared::models::user::{CreateUser, Permissions, UpdateUser, User};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

/// A user as the wire sees it: no password field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: String,
    pub permissions: Permissions,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let permissions = user.permissions_map();
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            role: user.role,
            permissions,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    pub role: String,
    /// Plaintext from the client; hashed before storage. Absent on update
    /// means keep the stored credential.
    pub password: Option<String>,
    #[serde(default)]
    pub permissions: Permissions,
}

fn check_role(role: &str) -> Result<(), ApiError> {
    if role == "Admin" || role == "Staff" {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Invalid role '{role}', expected Admin or Staff"
        )))
    }
}

fn hash_if_present(password: Option<String>) -> Result<Option<String>, ApiError> {
    match password {
        Some(p) if !p.is_empty() => Ok(Some(hash_password(&p)?)),
        _ => Ok(None),
    }
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    payload.validate()?;
    check_role(&payload.role)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: payload.name,
            username: payload.username,
            role: payload.role,
            password: hash_if_present(payload.password)?,
            permissions: payload.permissions,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<UserDto>> {
    payload.validate()?;
    check_role(&payload.role)?;
    let id = payload
        .id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;

    User::update(
        &state.db,
        &id,
        UpdateUser {
            name: payload.name.clone(),
            username: payload.username.clone(),
            role: payload.role.clone(),
            password: hash_if_present(payload.password)?,
            permissions: payload.permissions.clone(),
        },
    )
    .await?;

    Ok(Json(UserDto {
        id,
        name: payload.name,
        username: payload.username,
        role: payload.role,
        permissions: payload.permissions,
    }))
}

/// DELETE /api/users?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    User::delete(&state.db, &params.id).await?;
    Ok(success())
}
