//! API route handlers, one module per route group.

use serde::Deserialize;

pub mod auth;
pub mod backup;
pub mod donations;
pub mod events;
pub mod expenses;
pub mod health;
pub mod lookups;
pub mod members;
pub mod reports;
pub mod reset;
pub mod resources;
pub mod settings;
pub mod upload;
pub mod users;

/// Query parameters for the collection DELETE routes (`DELETE /api/...?id=`).
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: String,
}

/// Standard `{"success": true}` body for mutations with nothing else to say.
pub(crate) fn success() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "success": true }))
}
