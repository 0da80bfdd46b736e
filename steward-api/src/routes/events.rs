//! Calendar event CRUD. `resource` carries the venue name by value.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::models::event::{Event, EventInput};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub resource: String,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            description: e.description,
            resource: e.resource,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource: String,
}

impl EventPayload {
    fn into_input(self) -> EventInput {
        EventInput {
            title: self.title,
            date: self.date,
            description: self.description,
            resource: self.resource,
        }
    }
}

/// GET /api/events
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EventDto>>> {
    let events = Event::list(&state.db).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<(StatusCode, Json<EventDto>)> {
    payload.validate()?;
    let event = Event::create(&state.db, payload.into_input()).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// PUT /api/events (id in body)
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<Json<EventDto>> {
    payload.validate()?;
    let id = payload
        .id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;

    let input = payload.into_input();
    Event::update(&state.db, &id, input.clone()).await?;

    Ok(Json(EventDto {
        id,
        title: input.title,
        date: input.date,
        description: input.description,
        resource: input.resource,
    }))
}

/// DELETE /api/events?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    Event::delete(&state.db, &params.id).await?;
    Ok(success())
}
