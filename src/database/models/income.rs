use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub income_id: i64,
    pub user_id: i64,
    pub monthly_income: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
