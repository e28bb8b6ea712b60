//! # Granularity Validation
//!
//! Checks applied to caller-supplied granularities before they reach the
//! resolver: single values typed by a user, and custom granularity sets
//! attached to a dimension.

use crate::bucket::Bucket;
use crate::duration::Duration;
use crate::primitives::{CUSTOM_DEFAULT_INDEX, MAX_CUSTOM_GRANULARITIES};
use crate::search::find_smallest;
use crate::types::{ContinuousKind, GranularityError, GranularityInput};
use serde::{Deserialize, Serialize};

// =============================================================================
// SINGLE GRANULARITY
// =============================================================================

/// Validate a granularity typed as text for a dimension of the given kind.
///
/// - time: must be an ISO-8601 duration, and floorable
/// - number: must be a positive decimal integer
pub fn validate_granularity(kind: ContinuousKind, text: &str) -> Result<(), GranularityError> {
    let text = text.trim();
    match kind {
        ContinuousKind::Time => {
            let duration = Duration::parse(text)?;
            if !duration.is_floorable() {
                return Err(GranularityError::NotFloorableDuration(text.to_string()));
            }
            Ok(())
        }
        ContinuousKind::Number => {
            let is_decimal = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
            match text.parse::<u64>() {
                Ok(value) if is_decimal && value > 0 => Ok(()),
                _ => Err(GranularityError::InvalidNumberFormat(text.to_string())),
            }
        }
    }
}

/// Whether a granularity typed as text is valid for the given kind.
#[must_use]
pub fn is_granularity_valid(kind: ContinuousKind, text: &str) -> bool {
    validate_granularity(kind, text).is_ok()
}

/// Fail unless `bucket` has the expected kind.
pub(crate) fn ensure_kind(
    expected: ContinuousKind,
    bucket: &Bucket,
    role: &str,
) -> Result<(), GranularityError> {
    if bucket.kind() != expected {
        return Err(GranularityError::InvalidArgument(format!(
            "{} '{}' is a {} bucket, expected {}",
            role,
            bucket,
            bucket.kind(),
            expected
        )));
    }
    Ok(())
}

// =============================================================================
// CUSTOM GRANULARITY SET
// =============================================================================

/// A validated custom granularity list.
///
/// Non-empty, a single kind, strictly ascending by canonical size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct GranularitySet {
    kind: ContinuousKind,
    entries: Vec<Bucket>,
}

impl GranularitySet {
    /// Validate a custom granularity list.
    pub fn new(entries: Vec<Bucket>) -> Result<Self, GranularityError> {
        let Some(first) = entries.first() else {
            return Err(GranularityError::InvalidArgument(
                "custom granularities must not be empty".to_string(),
            ));
        };
        if entries.len() > MAX_CUSTOM_GRANULARITIES {
            return Err(GranularityError::InvalidArgument(format!(
                "at most {} custom granularities are supported, got {}",
                MAX_CUSTOM_GRANULARITIES,
                entries.len()
            )));
        }

        let kind = first.kind();
        for bucket in &entries {
            ensure_kind(kind, bucket, "custom granularity")?;
        }

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].canonical_size() >= pair[1].canonical_size())
        {
            return Err(GranularityError::InvalidArgument(format!(
                "custom granularities must be strictly ascending: '{}' is not smaller than '{}'",
                pair[0], pair[1]
            )));
        }

        Ok(Self { kind, entries })
    }

    /// Parse and validate raw inputs.
    pub fn parse_all(inputs: &[GranularityInput]) -> Result<Self, GranularityError> {
        let entries = inputs
            .iter()
            .map(Bucket::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    #[must_use]
    pub const fn kind(&self) -> ContinuousKind {
        self.kind
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Bucket] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The smallest entry.
    #[must_use]
    pub fn smallest(&self) -> Option<Bucket> {
        find_smallest(&self.entries)
    }

    /// The entry a dimension defaults to when it has custom granularities.
    pub fn default_entry(&self) -> Result<Bucket, GranularityError> {
        self.entries.get(CUSTOM_DEFAULT_INDEX).copied().ok_or_else(|| {
            GranularityError::InvalidArgument(format!(
                "custom granularities need at least {} entries to pick a default, got {}",
                CUSTOM_DEFAULT_INDEX + 1,
                self.entries.len()
            ))
        })
    }
}

impl TryFrom<Vec<Bucket>> for GranularitySet {
    type Error = GranularityError;

    fn try_from(entries: Vec<Bucket>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<GranularitySet> for Vec<Bucket> {
    fn from(set: GranularitySet) -> Self {
        set.entries
    }
}

// =============================================================================
// TESTS
// =============================================================================
