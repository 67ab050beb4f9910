use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpense {
    pub expense_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub spent_on: NaiveDate,    // calendar day the money was spent
    pub created_at: NaiveDateTime,
}
