use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://saldo.db";
const DEFAULT_PORT: u16 = 8080;

// Keeps local development working without a .env file. Production must set
// JWT_SECRET; the startup warning makes a missing one hard to ignore.
const INSECURE_DEV_SECRET: &str = "insecure-dev-secret-do-not-deploy";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
}

impl Config {
    /// Collect configuration from the environment (after `dotenv` has run).
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("JWT_SECRET is not set; using an insecure development key");
                INSECURE_DEV_SECRET.to_string()
            }
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            database_url,
            jwt_secret,
            port,
        }
    }
}
