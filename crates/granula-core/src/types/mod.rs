//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the resolution engine:
//! - Dimension kinds (`ContinuousKind`)
//! - The wire form of a granularity (`GranularityInput`)
//! - Range boundaries handed in by callers (`BucketRange`)
//! - Error types (`GranularityError`)
//!
//! ## Purity Guarantees
//!
//! All types in this module are plain values:
//! - No interior mutability
//! - No I/O on construction
//! - `Send + Sync` so they can be shared freely across threads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// DIMENSION KIND
// =============================================================================

/// The two kinds of continuous dimension that can be bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuousKind {
    /// Timestamps, bucketed by calendar durations.
    Time,
    /// Real numbers, bucketed by a numeric width.
    Number,
}

impl ContinuousKind {
    /// Get the kind name as used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContinuousKind::Time => "time",
            ContinuousKind::Number => "number",
        }
    }
}

impl fmt::Display for ContinuousKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContinuousKind {
    type Err = GranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(ContinuousKind::Time),
            "number" => Ok(ContinuousKind::Number),
            other => Err(GranularityError::InvalidArgument(format!(
                "unknown dimension kind '{}': expected 'time' or 'number'",
                other
            ))),
        }
    }
}

// =============================================================================
// GRANULARITY INPUT
// =============================================================================

/// A granularity as callers supply it: a bare number or a duration string.
///
/// This is also the serialized form of a `Bucket`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GranularityInput {
    /// A numeric bucket width.
    Number(f64),
    /// An ISO-8601 duration, or a number written as text.
    Text(String),
}

impl From<f64> for GranularityInput {
    fn from(value: f64) -> Self {
        GranularityInput::Number(value)
    }
}

impl From<&str> for GranularityInput {
    fn from(value: &str) -> Self {
        GranularityInput::Text(value.to_string())
    }
}

impl From<String> for GranularityInput {
    fn from(value: String) -> Self {
        GranularityInput::Text(value)
    }
}

impl fmt::Display for GranularityInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GranularityInput::Number(n) => write!(f, "{}", n),
            GranularityInput::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// RANGE
// =============================================================================

/// The boundaries of the data being bucketed, already resolved to one kind.
///
/// Only `|end - start|` matters to the engine; the ordering of the
/// boundaries is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BucketRange {
    /// A timestamp range `[start, end)`.
    Time {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// A number range `[start, end)`.
    Number { start: f64, end: f64 },
}

impl BucketRange {
    /// Create a time range.
    #[must_use]
    pub const fn time(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        BucketRange::Time { start, end }
    }

    /// Create a number range. Both boundaries must be finite.
    pub fn number(start: f64, end: f64) -> Result<Self, GranularityError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GranularityError::InvalidArgument(format!(
                "number range boundaries must be finite, got [{}, {})",
                start, end
            )));
        }
        Ok(BucketRange::Number { start, end })
    }

    /// The dimension kind this range belongs to.
    #[must_use]
    pub const fn kind(&self) -> ContinuousKind {
        match self {
            BucketRange::Time { .. } => ContinuousKind::Time,
            BucketRange::Number { .. } => ContinuousKind::Number,
        }
    }

    /// Absolute length of the range in canonical units.
    ///
    /// Milliseconds for time ranges, plain units for number ranges.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            BucketRange::Time { start, end } => {
                end.signed_duration_since(*start).num_milliseconds().unsigned_abs() as f64
            }
            BucketRange::Number { start, end } => (end - start).abs(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building buckets or resolving granularities.
///
/// - No silent failures
/// - Use `Result<T, GranularityError>` for fallible operations
/// - The engine never panics; every error is recoverable by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GranularityError {
    /// The input is neither a positive finite number nor a floorable duration.
    #[error("Invalid bucket input '{0}': must be number or duration")]
    InvalidBucketInput(String),

    /// The text is not an ISO-8601 duration.
    #[error("Invalid duration format: '{0}'")]
    InvalidDuration(String),

    /// The duration parses but has no well-defined calendar floor.
    #[error("Duration '{0}' is not floorable")]
    NotFloorableDuration(String),

    /// The text is not a positive decimal integer.
    #[error("Invalid number format: '{0}'")]
    InvalidNumberFormat(String),

    /// A caller-supplied argument is inconsistent (mixed kinds, unsorted set, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// TESTS
// =============================================================================
