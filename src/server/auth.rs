//! Static bearer-token authentication.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;

use super::{AppState, error_body};
use crate::observability::mask_token;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// Constant-time comparison against the configured key.
pub fn token_matches(presented: &str, expected: &str) -> bool {
    bool::from(presented.as_bytes().ct_eq(expected.as_bytes()))
}

pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = bearer_token(request.headers());
    let accepted = presented
        .is_some_and(|token| token_matches(token, state.api_key.expose_secret()));

    if !accepted {
        tracing::warn!(
            token = %mask_token(presented),
            path = %request.uri().path(),
            "Rejected unauthenticated tool request"
        );
        let mut response = error_body(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Missing or invalid bearer token".to_string(),
        );
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        return response;
    }

    next.run(request).await
}
