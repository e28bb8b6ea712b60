//! # Middleware Module
//!
//! Rate limiting for the Granula HTTP API.
//!
//! The limit comes from `server.rate_limit` in the configuration, or
//! `GRANULA_RATE_LIMIT` (requests per second, default 100, 0 disables).

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Global rate limiter type alias.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a global rate limiter, or `None` when `requests_per_second` is 0.
pub fn create_rate_limiter(requests_per_second: u32) -> Option<GlobalRateLimiter> {
    let rps = NonZeroU32::new(requests_per_second)?;
    Some(Arc::new(RateLimiter::direct(Quota::per_second(rps))))
}

/// Rate limiting middleware.
///
/// Returns 429 Too Many Requests once the global quota is exhausted.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match limiter.check() {
        Ok(()) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!(
                event = "rate_limited",
                path = %request.uri().path(),
                "Rate limit exceeded"
            );
            Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
