//! Transactional wipe of operational data (members, events, donations,
//! expenses). Accounts and settings survive.
//!
//! Authorization is decided from storage: the caller identifies itself via
//! the `x-user-id` header and the server checks that user's stored role.
//! Client-supplied role headers are never trusted.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use steward_shared::db::reset_system_data;
use steward_shared::models::user::User;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPayload {
    #[serde(default)]
    pub confirm_reset: bool,
}

/// POST /api/reset
pub async fn reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ResetPayload>,
) -> ApiResult<Json<Value>> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing x-user-id header".to_string()))?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    if !user.is_admin() {
        return Err(ApiError::Forbidden(
            "Only administrators can reset system data".to_string(),
        ));
    }

    if !payload.confirm_reset {
        return Err(ApiError::BadRequest(
            "confirmReset must be true".to_string(),
        ));
    }

    reset_system_data(&state.db).await?;
    tracing::warn!(user = %user.username, "System data reset");

    Ok(Json(json!({
        "success": true,
        "message": "System data has been reset",
    })))
}
