use dotenvy::dotenv;
use saldo::config::Config;
use saldo::{backend, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = database::db::connection::get_db_pool(&config.database_url).await?;
    database::db::migrate::run_migrations(&pool).await?;

    backend::run_server(pool, &config).await?;

    Ok(())
}
