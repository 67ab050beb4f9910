mod handlers;
mod middleware;
mod routes;

pub use middleware::AuthUser;

use std::net::SocketAddr;

use sqlx::{Pool, Sqlite};

use crate::auth::token::AuthKeys;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub keys: AuthKeys,
}

pub async fn run_server(pool: Pool<Sqlite>, config: &Config) -> anyhow::Result<()> {
    let state = AppState {
        db: pool,
        keys: AuthKeys::new(config.jwt_secret.as_bytes()),
    };

    let app = routes::api_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
