use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::{AppState, AuthUser};
use crate::database::db::queries;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct IncomePayload {
    #[serde(rename = "rendaMensal")]
    pub monthly_income: f64,
}

#[derive(Debug, Deserialize)]
pub struct FixedExpensePayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct FixedExpensesPayload {
    #[serde(rename = "despesasFixas")]
    pub expenses: Vec<FixedExpensePayload>,
}

pub async fn save_income_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<IncomePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !payload.monthly_income.is_finite() || payload.monthly_income < 0.0 {
        return Err(ApiError::BadRequest(
            "Monthly income must be zero or positive".into(),
        ));
    }

    if queries::get_user(&state.db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }

    let (income, created) = queries::upsert_income(&state.db, user_id, payload.monthly_income).await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Income saved successfully")
    } else {
        (StatusCode::OK, "Income updated successfully")
    };

    Ok((status, Json(json!({ "message": message, "income": income }))))
}

pub async fn save_fixed_expenses_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<FixedExpensesPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    for expense in &payload.expenses {
        if expense.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Fixed expense name is required".into()));
        }
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            return Err(ApiError::BadRequest(
                "Fixed expense amount must be positive".into(),
            ));
        }
    }

    if queries::get_user(&state.db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }

    let expenses: Vec<(String, f64)> = payload
        .expenses
        .iter()
        .map(|e| (e.name.clone(), e.amount))
        .collect();

    // Whole-set replace, atomically.
    let saved = queries::replace_fixed_expenses(&state.db, user_id, &expenses).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Fixed expenses saved successfully",
            "fixedExpenses": saved,
        })),
    ))
}
