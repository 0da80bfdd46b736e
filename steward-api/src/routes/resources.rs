//! Bookable venue resources. No update route; the client recreates instead.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::models::resource::Resource;

use crate::app::AppState;
use crate::error::ApiResult;

use super::{success, DeleteParams};

#[derive(Debug, Serialize)]
pub struct ResourceDto {
    pub id: String,
    pub name: String,
}

impl From<Resource> for ResourceDto {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResourcePayload {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

/// GET /api/resources
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ResourceDto>>> {
    let resources = Resource::list(&state.db).await?;
    Ok(Json(resources.into_iter().map(Into::into).collect()))
}

/// POST /api/resources
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ResourcePayload>,
) -> ApiResult<(StatusCode, Json<ResourceDto>)> {
    payload.validate()?;
    let resource = Resource::create(&state.db, payload.name).await?;
    Ok((StatusCode::CREATED, Json(resource.into())))
}

/// DELETE /api/resources?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    Resource::delete(&state.db, &params.id).await?;
    Ok(success())
}
