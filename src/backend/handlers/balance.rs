use axum::extract::State;
use axum::{Extension, Json};
use chrono::{Datelike, Local};

use crate::backend::{AppState, AuthUser};
use crate::database::db::queries;
use crate::engine::{self, BalanceInput, BalanceSnapshot};
use crate::error::ApiError;

/// Current balance, health classification, and (from day 8 onward) the
/// month-end projection. All numbers are computed fresh on every call.
pub async fn get_balance_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<BalanceSnapshot>, ApiError> {
    // No income row means onboarding never finished; the engine never runs.
    let income = queries::get_income(&state.db, user_id).await?.ok_or_else(|| {
        ApiError::NotFound("Income data not found for user. Please complete onboarding.".into())
    })?;

    let total_fixed = queries::sum_fixed_expenses(&state.db, user_id).await?;

    let today = Local::now().date_naive();
    let start_of_month = today.with_day(1).expect("day 1 exists in every month");
    let total_variable =
        queries::sum_variable_expenses(&state.db, user_id, start_of_month, today).await?;

    let snapshot = engine::evaluate(&BalanceInput {
        total_income: income.monthly_income,
        total_fixed_expenses: total_fixed,
        total_variable_expenses_month: total_variable,
        today,
    });

    Ok(Json(snapshot))
}
