use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub created_at: NaiveDateTime,
}
