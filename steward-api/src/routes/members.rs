//! Member CRUD.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::models::member::{Member, MemberInput};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub join_date: String,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub network: String,
}

impl From<Member> for MemberDto {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            join_date: m.join_date,
            avatar_url: m.avatar_url,
            address: m.address,
            network: m.network,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub join_date: String,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub network: String,
}

impl MemberPayload {
    fn into_input(self) -> MemberInput {
        MemberInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            join_date: self.join_date,
            avatar_url: self.avatar_url,
            address: self.address,
            network: self.network,
        }
    }
}

/// GET /api/members
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<MemberDto>>> {
    let members = Member::list(&state.db).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// POST /api/members
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MemberPayload>,
) -> ApiResult<(StatusCode, Json<MemberDto>)> {
    payload.validate()?;
    let member = Member::create(&state.db, payload.into_input()).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// PUT /api/members (id in body)
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<MemberPayload>,
) -> ApiResult<Json<MemberDto>> {
    payload.validate()?;
    let id = payload
        .id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;

    let input = payload.into_input();
    Member::update(&state.db, &id, input.clone()).await?;

    Ok(Json(MemberDto {
        id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        join_date: input.join_date,
        avatar_url: input.avatar_url,
        address: input.address,
        network: input.network,
    }))
}

/// DELETE /api/members?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    Member::delete(&state.db, &params.id).await?;
    Ok(success())
}
