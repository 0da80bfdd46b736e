//! Donation CRUD.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::models::donation::{Donation, DonationInput};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDto {
    pub id: String,
    pub donor_name: String,
    pub member_id: Option<String>,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub giving_type_id: Option<String>,
    pub service_time: Option<String>,
    pub recorded_by_id: Option<String>,
    pub reference: Option<String>,
}

impl From<Donation> for DonationDto {
    fn from(d: Donation) -> Self {
        Self {
            id: d.id,
            donor_name: d.donor_name,
            member_id: d.member_id,
            amount: d.amount,
            date: d.date,
            category: d.category,
            giving_type_id: d.giving_type_id,
            service_time: d.service_time,
            recorded_by_id: d.recorded_by_id,
            reference: d.reference,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DonationPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub donor_name: String,
    pub member_id: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub date: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub giving_type_id: Option<String>,
    pub service_time: Option<String>,
    pub recorded_by_id: Option<String>,
    pub reference: Option<String>,
}

impl DonationPayload {
    fn into_input(self) -> DonationInput {
        DonationInput {
            donor_name: self.donor_name,
            member_id: self.member_id,
            amount: self.amount,
            date: self.date,
            category: self.category,
            giving_type_id: self.giving_type_id,
            service_time: self.service_time,
            recorded_by_id: self.recorded_by_id,
            reference: self.reference,
        }
    }
}

/// GET /api/donations
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DonationDto>>> {
    let donations = Donation::list(&state.db).await?;
    Ok(Json(donations.into_iter().map(Into::into).collect()))
}

/// POST /api/donations
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DonationPayload>,
) -> ApiResult<(StatusCode, Json<DonationDto>)> {
    payload.validate()?;
    let donation = Donation::create(&state.db, payload.into_input()).await?;
    Ok((StatusCode::CREATED, Json(donation.into())))
}

/// PUT /api/donations (id in body)
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<DonationPayload>,
) -> ApiResult<Json<DonationDto>> {
    payload.validate()?;
    let id = payload
        .id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;

    let input = payload.into_input();
    Donation::update(&state.db, &id, input.clone()).await?;

    Ok(Json(DonationDto {
        id,
        donor_name: input.donor_name,
        member_id: input.member_id,
        amount: input.amount,
        date: input.date,
        category: input.category,
        giving_type_id: input.giving_type_id,
        service_time: input.service_time,
        recorded_by_id: input.recorded_by_id,
        reference: input.reference,
    }))
}

/// DELETE /api/donations?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    Donation::delete(&state.db, &params.id).await?;
    Ok(success())
}
