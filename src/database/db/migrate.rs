use sqlx::migrate::MigrateError;
use sqlx::{Pool, Sqlite};

/// Apply the embedded migrations. Safe to call on every startup.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
