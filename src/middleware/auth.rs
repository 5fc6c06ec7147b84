//! Bearer-token gate in front of every `/api` route.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let authorized = presented
        .map(|token| tokens_match(token.as_bytes(), state.config.api_token.as_bytes()))
        .unwrap_or(false);
    if !authorized {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            credential = presented.is_some(),
            "unauthorized request"
        );
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Token from `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Comparison time depends only on the lengths, not on where the first mismatch is.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented.iter().zip(expected).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}
