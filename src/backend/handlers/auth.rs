use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Local};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::error::ApiError;

// Codes expire quickly; a fresh one can always be requested.
const CODE_TTL_MINUTES: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

pub async fn request_code_handler(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !auth::is_valid_email(&body.email) {
        return Err(ApiError::BadRequest("Invalid email format".into()));
    }

    let code = auth::generate_code();
    let code_hash = auth::hash_code(&code)?;
    let expires_at = Local::now().naive_local() + Duration::minutes(CODE_TTL_MINUTES);

    queries::create_auth_code(&state.db, &body.email, &code_hash, expires_at).await?;

    // Email delivery is simulated: the code only shows up in the server log.
    log::info!("auth code for {}: {} (simulated email send)", body.email, code);

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Authentication code sent (simulated)." })),
    ))
}

pub async fn verify_code_handler(
    State(state): State<AppState>,
    Json(body): Json<VerifyCodeBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !auth::is_valid_email(&body.email) {
        return Err(ApiError::BadRequest("Invalid email format".into()));
    }
    if body.code.len() != auth::CODE_LENGTH {
        return Err(ApiError::BadRequest("Invalid code format".into()));
    }

    let entry = queries::latest_auth_code(&state.db, &body.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or code. Code not found.".into()))?;

    if Local::now().naive_local() > entry.expires_at {
        return Err(ApiError::Unauthorized("Authentication code expired.".into()));
    }
    if !auth::verify_code(&body.code, &entry.code_hash) {
        return Err(ApiError::Unauthorized("Invalid authentication code.".into()));
    }

    // Code checks out: first login creates the account.
    let user = queries::find_or_create_user(&state.db, &body.email).await?;
    let token = state.keys.issue(user.user_id)?;

    log::info!("user {} authenticated", user.user_id);

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Successfully authenticated.",
            "token": token,
            "userId": user.user_id,
            "email": user.email,
        })),
    ))
}
