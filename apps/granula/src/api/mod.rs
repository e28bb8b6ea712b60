//! # Granula HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /parse` - Parse a granularity into a bucket
//! - `POST /resolve` - Best bucket for a range
//! - `POST /menu` - Granularity menu for a kind
//! - `POST /default` - Default granularity of a dimension
//! - `POST /validate` - Validate a user-typed granularity
//!
//! ## Security Configuration
//!
//! Taken from [`AppConfig`], which applies these environment overrides:
//!
//! - `GRANULA_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//!   (default: localhost only)
//! - `GRANULA_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `GRANULA_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{ApiKey, keys_match};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    BucketResponse, DefaultRequest, HealthResponse, MenuRequest, MenuResponse, ParseRequest,
    ParseResponse, ResolveRequest, ValidateRequest, ValidateResponse,
};

use crate::config::AppConfig;
use crate::error::AppError;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (2 MB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. The engine is stateless; only configuration is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from the configured origins.
///
/// - `*`: allows all origins
/// - unset or no valid origin: localhost only
/// - otherwise: the comma-separated list of origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(server.cors_origins.as_deref());

    let rate_limiter = create_rate_limiter(server.rate_limit);
    match rate_limiter {
        Some(_) => tracing::info!("Rate limiting enabled: {} requests/second", server.rate_limit),
        None => tracing::info!("Rate limiting disabled"),
    }

    let api_key: Option<ApiKey> = state.config.api_key().map(Arc::from);
    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set GRANULA_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/parse", post(handlers::parse_handler))
        .route("/resolve", post(handlers::resolve_handler))
        .route("/menu", post(handlers::menu_handler))
        .route("/default", post(handlers::default_handler))
        .route("/validate", post(handlers::validate_handler));

    if let Some(key) = api_key {
        router = router.layer(axum_middleware::from_fn_with_state(
            key,
            auth::api_key_auth_middleware,
        ));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server on `addr`.
pub async fn run_server(addr: &str, config: AppConfig) -> Result<(), AppError> {
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Granula HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_is_routed() {
        let router = create_router(AppState::new(AppConfig::default()));
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let router = create_router(AppState::new(AppConfig::default()));
        let response = router
            .oneshot(Request::get("/graph").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
