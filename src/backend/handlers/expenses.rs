use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::{AppState, AuthUser};
use crate::database::db::queries;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateExpensePayload {
    pub value: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Optional "YYYY-MM-DD"; defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

pub async fn create_expense_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !payload.value.is_finite() || payload.value <= 0.0 {
        return Err(ApiError::BadRequest("Expense value must be positive".into()));
    }
    if payload.category.trim().is_empty() {
        return Err(ApiError::BadRequest("Expense category is required".into()));
    }

    let spent_on = match payload.date.as_deref() {
        Some(raw) if !raw.is_empty() => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD.".into()))?,
        _ => Local::now().date_naive(),
    };

    let expense = queries::create_variable_expense(
        &state.db,
        user_id,
        payload.value,
        &payload.category,
        payload.description.as_deref(),
        spent_on,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Expense registered successfully",
            "expense": expense,
        })),
    ))
}

pub async fn delete_expense_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(expense_id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let deleted = queries::delete_variable_expense(&state.db, user_id, expense_id).await?;

    if !deleted {
        return Err(ApiError::NotFound(
            "Expense not found or you do not have permission to delete it.".into(),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Expense deleted successfully" })),
    ))
}
