//! Expense CRUD.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use steward_shared::models::expense::{Expense, ExpenseInput};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::{success, DeleteParams};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub recorded_by_id: Option<String>,
}

impl From<Expense> for ExpenseDto {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            description: e.description,
            amount: e.amount,
            date: e.date,
            category: e.category,
            recorded_by_id: e.recorded_by_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub date: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub recorded_by_id: Option<String>,
}

impl ExpensePayload {
    fn into_input(self) -> ExpenseInput {
        ExpenseInput {
            description: self.description,
            amount: self.amount,
            date: self.date,
            category: self.category,
            recorded_by_id: self.recorded_by_id,
        }
    }
}

/// GET /api/expenses
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ExpenseDto>>> {
    let expenses = Expense::list(&state.db).await?;
    Ok(Json(expenses.into_iter().map(Into::into).collect()))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ExpensePayload>,
) -> ApiResult<(StatusCode, Json<ExpenseDto>)> {
    payload.validate()?;
    let expense = Expense::create(&state.db, payload.into_input()).await?;
    Ok((StatusCode::CREATED, Json(expense.into())))
}

/// PUT /api/expenses (id in body)
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<ExpensePayload>,
) -> ApiResult<Json<ExpenseDto>> {
    payload.validate()?;
    let id = payload
        .id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing field: id".to_string()))?;

    let input = payload.into_input();
    Expense::update(&state.db, &id, input.clone()).await?;

    Ok(Json(ExpenseDto {
        id,
        description: input.description,
        amount: input.amount,
        date: input.date,
        category: input.category,
        recorded_by_id: input.recorded_by_id,
    }))
}

/// DELETE /api/expenses?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    Expense::delete(&state.db, &params.id).await?;
    Ok(success())
}
