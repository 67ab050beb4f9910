use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::errors::ErrorKind;

use crate::backend::AppState;
use crate::error::ApiError;

/// Authenticated user id, pulled from the session token and inserted into the
/// request extensions. Handlers downstream only ever see this opaque id.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header required".into()))?;

    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::Unauthorized(
            "Authorization header format must be Bearer {token}".into(),
        ));
    }

    let user_id = state.keys.verify(token).map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
            ApiError::Unauthorized("Token is expired or not valid yet".into())
        }
        ErrorKind::InvalidSignature => ApiError::Unauthorized("Invalid token signature".into()),
        ErrorKind::InvalidToken => ApiError::Unauthorized("Malformed token".into()),
        _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
    })?;

    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}
