use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Verifies a bearer session token and stores the claims as a request
/// extension for the handler behind it.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        bearer_token(req.headers()).ok_or(ApiError::Unauthorized("Missing bearer token"))?;
    let claims = state
        .jwt
        .verify(&token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token"))?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}
