use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(FromRow, Debug)]
pub struct AuthCode {
    pub auth_code_id: i64,
    pub email: String,
    pub code_hash: String,      // argon2 PHC string, never the clear code
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}
