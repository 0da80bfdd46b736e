//! Shared handlers for the five lookup-table route groups.
//!
//! The table identity arrives as an [`Extension`] set when the router is
//! built. Wire bodies keep each table's own label field (`name`, or `time`
//! for service times), so requests and responses are plain JSON objects
//! rather than a fixed struct.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{Map, Value};

use steward_shared::models::lookup::{LookupEntry, LookupTable};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

fn to_wire(table: LookupTable, entry: LookupEntry) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), Value::String(entry.id));
    obj.insert(
        table.label_column().to_string(),
        Value::String(entry.label),
    );
    obj.insert("createdAt".to_string(), Value::String(entry.created_at));
    Value::Object(obj)
}

fn label_from(table: LookupTable, body: &Value) -> Result<String, ApiError> {
    body.get(table.label_column())
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing field: {}", table.label_column())))
}

/// GET /api/<lookup-group>
pub async fn list(
    State(state): State<AppState>,
    Extension(table): Extension<LookupTable>,
) -> ApiResult<Json<Vec<Value>>> {
    let entries = LookupEntry::list(&state.db, table).await?;
    Ok(Json(
        entries.into_iter().map(|e| to_wire(table, e)).collect(),
    ))
}

/// POST /api/<lookup-group>
pub async fn create(
    State(state): State<AppState>,
    Extension(table): Extension<LookupTable>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let label = label_from(table, &body)?;
    let entry = LookupEntry::create(&state.db, table, label).await?;
    Ok((StatusCode::CREATED, Json(to_wire(table, entry))))
}

/// PUT /api/<lookup-group> (id in body)
pub async fn update(
    State(state): State<AppState>,
    Extension(table): Extension<LookupTable>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;
    let label = label_from(table, &body)?;

    LookupEntry::update(&state.db, table, id, &label).await?;
    Ok(success())
}

/// DELETE /api/<lookup-group>?id=
pub async fn remove(
    State(state): State<AppState>,
    Extension(table): Extension<LookupTable>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    LookupEntry::delete(&state.db, table, &params.id).await?;
    Ok(success())
}
