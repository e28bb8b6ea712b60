//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every engine error is a client error: the handlers answer 400 with the
//! error message in the response body.

use super::types::{
    BucketResponse, DefaultRequest, HealthResponse, MenuRequest, MenuResponse, ParseRequest,
    ParseResponse, ResolveRequest, ValidateRequest, ValidateResponse, parse_anchor,
};
use axum::{Json, http::StatusCode, response::IntoResponse};
use granula_core::{Bucket, GranularityMenu, generate_granularity_menu, validate_granularity};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PARSE HANDLER
// =============================================================================

/// Parse a granularity into a bucket.
pub async fn parse_handler(Json(request): Json<ParseRequest>) -> impl IntoResponse {
    match Bucket::parse(&request.input) {
        Ok(bucket) => (StatusCode::OK, Json(ParseResponse::success(bucket))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(ParseResponse::error(e.to_string()))),
    }
}

// =============================================================================
// RESOLVE HANDLER
// =============================================================================

/// Pick the best bucket for a range.
pub async fn resolve_handler(Json(request): Json<ResolveRequest>) -> impl IntoResponse {
    match request.resolve() {
        Ok(bucket) => {
            tracing::debug!(
                kind = %request.range.kind(),
                coarse = request.coarse,
                bucket = %bucket,
                "Resolved best bucket"
            );
            (StatusCode::OK, Json(BucketResponse::success(bucket)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(BucketResponse::error(format!("Resolve failed: {}", e))),
        ),
    }
}

// =============================================================================
// MENU HANDLER
// =============================================================================

/// Build the granularity menu for a kind.
pub async fn menu_handler(Json(request): Json<MenuRequest>) -> impl IntoResponse {
    let menu = parse_anchor(request.anchor.as_ref()).and_then(|anchor| {
        generate_granularity_menu(request.kind, anchor.as_ref(), request.coarse)
    });

    match menu {
        Ok(menu) => (
            StatusCode::OK,
            Json(MenuResponse::success(GranularityMenu::into_vec(menu))),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(MenuResponse::error(format!("Menu failed: {}", e))),
        ),
    }
}

// =============================================================================
// DEFAULT HANDLER
// =============================================================================

/// Pick the default granularity of a dimension.
pub async fn default_handler(Json(request): Json<DefaultRequest>) -> impl IntoResponse {
    match request.resolve() {
        Ok(bucket) => (StatusCode::OK, Json(BucketResponse::success(bucket))),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(BucketResponse::error(format!("Default failed: {}", e))),
        ),
    }
}

// =============================================================================
// VALIDATE HANDLER
// =============================================================================

/// Validate a user-typed granularity.
///
/// Invalid input is a normal answer here, so this always responds 200.
pub async fn validate_handler(Json(request): Json<ValidateRequest>) -> impl IntoResponse {
    let response = ValidateResponse::from(validate_granularity(request.kind, &request.granularity));
    (StatusCode::OK, Json(response))
}
