//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Buckets travel in their `GranularityInput` form: a JSON number for
//! number buckets, an ISO-8601 duration string for time buckets.

use granula_core::{
    Bucket, BucketRange, ContinuousKind, GranularityError, GranularityInput, GranularitySet,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// SHARED PARSING
// =============================================================================

/// Parse an optional anchor.
pub fn parse_anchor(anchor: Option<&GranularityInput>) -> Result<Option<Bucket>, GranularityError> {
    anchor.map(Bucket::parse).transpose()
}

/// Parse and validate an optional custom granularity list.
pub fn parse_custom(
    custom: Option<&[GranularityInput]>,
) -> Result<Option<GranularitySet>, GranularityError> {
    custom.map(GranularitySet::parse_all).transpose()
}

// =============================================================================
// PARSE REQUEST/RESPONSE
// =============================================================================

/// Bucket parse request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    pub input: GranularityInput,
}

/// Bucket parse response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub success: bool,
    pub bucket: Option<Bucket>,
    pub kind: Option<ContinuousKind>,
    pub display: Option<String>,
    pub canonical_size: Option<f64>,
    pub error: Option<String>,
}

impl ParseResponse {
    pub fn success(bucket: Bucket) -> Self {
        Self {
            success: true,
            bucket: Some(bucket),
            kind: Some(bucket.kind()),
            display: Some(bucket.to_string()),
            canonical_size: Some(bucket.canonical_size()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            bucket: None,
            kind: None,
            display: None,
            canonical_size: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// RESOLVE REQUEST
// =============================================================================

/// Best bucket request.
///
/// ```json
/// {
///   "range": { "kind": "time", "start": "2024-01-01T00:00:00Z", "end": "2024-02-01T00:00:00Z" },
///   "coarse": false,
///   "anchor": "PT1H",
///   "custom": ["PT1H", "P1D", "P1W"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub range: BucketRange,
    #[serde(default)]
    pub coarse: bool,
    #[serde(default)]
    pub anchor: Option<GranularityInput>,
    #[serde(default)]
    pub custom: Option<Vec<GranularityInput>>,
}

impl ResolveRequest {
    /// Resolve the request against the engine.
    pub fn resolve(&self) -> Result<Bucket, GranularityError> {
        if let BucketRange::Number { start, end } = self.range {
            // Re-checks the boundaries serde let through.
            BucketRange::number(start, end)?;
        }
        let anchor = parse_anchor(self.anchor.as_ref())?;
        let custom = parse_custom(self.custom.as_deref())?;
        granula_core::resolve_best_bucket(
            &self.range,
            self.coarse,
            anchor.as_ref(),
            custom.as_ref(),
        )
    }
}

// =============================================================================
// MENU REQUEST/RESPONSE
// =============================================================================

/// Granularity menu request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuRequest {
    pub kind: ContinuousKind,
    #[serde(default)]
    pub anchor: Option<GranularityInput>,
    #[serde(default)]
    pub coarse: bool,
}

/// Granularity menu response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub success: bool,
    pub granularities: Vec<Bucket>,
    pub error: Option<String>,
}

impl MenuResponse {
    pub fn success(granularities: Vec<Bucket>) -> Self {
        Self {
            success: true,
            granularities,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            granularities: Vec::new(),
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// DEFAULT REQUEST
// =============================================================================

/// Default granularity request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultRequest {
    pub kind: ContinuousKind,
    #[serde(default)]
    pub anchor: Option<GranularityInput>,
    #[serde(default)]
    pub custom: Option<Vec<GranularityInput>>,
}

impl DefaultRequest {
    /// Resolve the request against the engine.
    pub fn resolve(&self) -> Result<Bucket, GranularityError> {
        let anchor = parse_anchor(self.anchor.as_ref())?;
        let custom = parse_custom(self.custom.as_deref())?;
        granula_core::default_granularity(self.kind, anchor.as_ref(), custom.as_ref())
    }
}

// =============================================================================
// BUCKET RESPONSE
// =============================================================================

/// A single bucket answer, shared by `/resolve` and `/default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketResponse {
    pub success: bool,
    pub bucket: Option<Bucket>,
    pub display: Option<String>,
    pub error: Option<String>,
}

impl BucketResponse {
    pub fn success(bucket: Bucket) -> Self {
        Self {
            success: true,
            bucket: Some(bucket),
            display: Some(bucket.to_string()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            bucket: None,
            display: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// VALIDATE REQUEST/RESPONSE
// =============================================================================

/// Granularity validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub kind: ContinuousKind,
    pub granularity: String,
}

/// Granularity validation response. `error` explains an invalid value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub error: Option<String>,
}

impl From<Result<(), GranularityError>> for ValidateResponse {
    fn from(result: Result<(), GranularityError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}
