use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub expense_id: i64,
    pub user_id: i64,
    pub name: String,           // rent, subscriptions, ...
    pub amount: f64,
    pub created_at: NaiveDateTime,
}
