//! Read and upsert the single global settings row.

use axum::{extract::State, Json};

use steward_backup::scheduler::parse_backup_time;
use steward_shared::models::settings::Settings;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

/// GET /api/settings
pub async fn read(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let settings = Settings::load(&state.db).await?;
    Ok(Json(settings))
}

/// POST /api/settings
pub async fn save(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> ApiResult<Json<Settings>> {
    if settings.theme != "light" && settings.theme != "dark" {
        return Err(ApiError::BadRequest(format!(
            "Invalid theme '{}', expected light or dark",
            settings.theme
        )));
    }
    if parse_backup_time(&settings.backup_time).is_none() {
        return Err(ApiError::BadRequest(format!(
            "Invalid backup time '{}', expected HH:MM",
            settings.backup_time
        )));
    }
    if settings.app_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Missing field: appName".to_string(),
        ));
    }

    settings.save(&state.db, state.engine()).await?;
    Ok(Json(settings))
}
