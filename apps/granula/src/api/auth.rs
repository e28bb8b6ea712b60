//! # Authentication Module
//!
//! Simple API key authentication for the Granula HTTP API.
//!
//! Enabled when `server.api_key` (or `GRANULA_API_KEY`) is non-empty. Every
//! endpoint except `/health` then requires the key:
//!
//! ```text
//! Authorization: Bearer <your-api-key>
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// The configured API key.
pub type ApiKey = Arc<str>;

// =============================================================================
// API KEY AUTHENTICATION
// =============================================================================

/// Compare two keys in constant time.
///
/// Both keys are padded to the same length so the comparison always runs
/// over the same number of bytes.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided_bytes.len()].copy_from_slice(provided_bytes);
    padded_expected[..expected_bytes.len()].copy_from_slice(expected_bytes);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

/// API key authentication middleware.
///
/// `/health` is always allowed for load balancer checks. Both
/// `Bearer <key>` and a raw `<key>` are accepted.
pub async fn api_key_auth_middleware(
    State(expected): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = auth_header else {
        tracing::warn!(
            event = "auth_failure",
            reason = "missing_authorization_header",
            "Missing Authorization header"
        );
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized"));
    };

    let provided_key = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
    if keys_match(provided_key, &expected) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            event = "auth_failure",
            reason = "invalid_api_key",
            "Authentication failed: invalid API key"
        );
        Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

// =============================================================================
// TESTS
// =============================================================================
