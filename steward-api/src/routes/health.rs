//! Liveness endpoint with a database ping.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiResult;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    steward_shared::db::health_check(&state.db).await?;

    Ok(Json(json!({
        "status": "ok",
        "engine": state.engine().label(),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
