//! # Buckets
//!
//! The unit by which a continuous value is grouped: a numeric width for
//! number dimensions, a calendar duration for time dimensions.
//!
//! Buckets are immutable values. They are compared in two ways:
//! - structurally (`==`): number buckets by size, time buckets by duration
//! - by canonical size (`canonical_size`), used for every ordering decision
//!
//! The display form round-trips through [`Bucket::parse`].

use crate::duration::{Duration, Span};
use crate::types::{ContinuousKind, GranularityError, GranularityInput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// NUMBER BUCKET
// =============================================================================

/// A numeric bucket of fixed, strictly positive width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBucket {
    size: f64,
}

impl NumberBucket {
    /// Create a number bucket. The size must be finite and positive.
    pub fn new(size: f64) -> Result<Self, GranularityError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(GranularityError::InvalidBucketInput(size.to_string()));
        }
        Ok(Self { size })
    }

    /// Static table entries, where `size` is a positive literal.
    pub(crate) const fn from_static(size: f64) -> Self {
        Self { size }
    }

    /// The bucket width.
    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }
}

// =============================================================================
// TIME BUCKET
// =============================================================================

/// A time bucket backed by a floorable calendar duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBucket {
    duration: Duration,
}

impl TimeBucket {
    /// Create a time bucket, rejecting durations with no calendar floor.
    pub fn new(duration: Duration) -> Result<Self, GranularityError> {
        if !duration.is_floorable() {
            return Err(GranularityError::NotFloorableDuration(duration.to_string()));
        }
        Ok(Self { duration })
    }

    /// Static table entries: a single unit with a floorable count.
    pub(crate) const fn from_span(span: Span, count: u32) -> Self {
        Self {
            duration: Duration::from_span(span, count),
        }
    }

    /// The underlying duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

// =============================================================================
// BUCKET
// =============================================================================

/// A bucket of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GranularityInput", into = "GranularityInput")]
pub enum Bucket {
    Number(NumberBucket),
    Time(TimeBucket),
}

impl Bucket {
    /// Parse caller input into a bucket.
    ///
    /// Numbers become number buckets; duration strings become time buckets.
    /// Text that is not a duration is accepted when it reads as a positive
    /// number, so that every display string parses back.
    pub fn parse(input: &GranularityInput) -> Result<Self, GranularityError> {
        let rejected = || GranularityError::InvalidBucketInput(input.to_string());

        match input {
            GranularityInput::Number(size) => {
                NumberBucket::new(*size).map(Bucket::Number).map_err(|_| rejected())
            }
            GranularityInput::Text(text) => {
                let text = text.trim();
                if text.starts_with('P') {
                    let duration = Duration::parse(text).map_err(|_| rejected())?;
                    return TimeBucket::new(duration)
                        .map(Bucket::Time)
                        .map_err(|_| rejected());
                }
                let size: f64 = text.parse().map_err(|_| rejected())?;
                NumberBucket::new(size).map(Bucket::Number).map_err(|_| rejected())
            }
        }
    }

    /// Create a number bucket.
    pub fn number(size: f64) -> Result<Self, GranularityError> {
        NumberBucket::new(size).map(Bucket::Number)
    }

    /// Create a time bucket from a duration string.
    pub fn time(text: &str) -> Result<Self, GranularityError> {
        TimeBucket::new(Duration::parse(text)?).map(Bucket::Time)
    }

    /// The dimension kind this bucket applies to.
    #[must_use]
    pub const fn kind(&self) -> ContinuousKind {
        match self {
            Bucket::Number(_) => ContinuousKind::Number,
            Bucket::Time(_) => ContinuousKind::Time,
        }
    }

    /// The comparable magnitude of this bucket.
    ///
    /// Milliseconds for time buckets, the width for number buckets.
    #[must_use]
    pub fn canonical_size(&self) -> f64 {
        match self {
            Bucket::Number(bucket) => bucket.size(),
            Bucket::Time(bucket) => bucket.duration().canonical_length_ms() as f64,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Number(bucket) => write!(f, "{}", bucket.size()),
            Bucket::Time(bucket) => write!(f, "{}", bucket.duration()),
        }
    }
}

impl FromStr for Bucket {
    type Err = GranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&GranularityInput::from(s))
    }
}

impl TryFrom<GranularityInput> for Bucket {
    type Error = GranularityError;

    fn try_from(input: GranularityInput) -> Result<Self, Self::Error> {
        Self::parse(&input)
    }
}

impl From<Bucket> for GranularityInput {
    fn from(bucket: Bucket) -> Self {
        match bucket {
            Bucket::Number(b) => GranularityInput::Number(b.size()),
            Bucket::Time(b) => GranularityInput::Text(b.duration().to_string()),
        }
    }
}

impl From<NumberBucket> for Bucket {
    fn from(bucket: NumberBucket) -> Self {
        Bucket::Number(bucket)
    }
}

impl From<TimeBucket> for Bucket {
    fn from(bucket: TimeBucket) -> Self {
        Bucket::Time(bucket)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_durations() {
        let week = Bucket::parse(&"P1W".into()).expect("week");
        assert_eq!(week.kind(), ContinuousKind::Time);

        let five = Bucket::parse(&5.0.into()).expect("five");
        assert_eq!(five, Bucket::number(5.0).expect("five"));
        assert_eq!(five.kind(), ContinuousKind::Number);
    }

    #[test]
    fn display_matches_input() {
        assert_eq!(Bucket::parse(&"P1W".into()).expect("week").to_string(), "P1W");
        assert_eq!(Bucket::parse(&5.0.into()).expect("5").to_string(), "5");
        assert_eq!(Bucket::parse(&300000.0.into()).expect("300000").to_string(), "300000");
        assert_eq!(Bucket::parse(&0.1.into()).expect("0.1").to_string(), "0.1");
    }

    #[test]
    fn numeric_text_parses_as_number() {
        let bucket: Bucket = "2".parse().expect("2");
        assert_eq!(bucket, Bucket::number(2.0).expect("2"));
    }

    #[test]
    fn rejects_invalid_input() {
        for input in [
            GranularityInput::from("not-a-duration"),
            GranularityInput::from("P2D"),
            GranularityInput::from("P1DT2H"),
            GranularityInput::from(""),
            GranularityInput::Number(0.0),
            GranularityInput::Number(-5.0),
            GranularityInput::Number(f64::NAN),
            GranularityInput::Number(f64::INFINITY),
        ] {
            assert!(
                matches!(Bucket::parse(&input), Err(GranularityError::InvalidBucketInput(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn equality_follows_duration_identity() {
        let week: Bucket = "P1W".parse().expect("week");
        let seven_days = Bucket::Time(TimeBucket::from_span(Span::Day, 7));

        assert_ne!(week, seven_days);
        assert_eq!(week.canonical_size(), seven_days.canonical_size());
        assert_eq!(week, "P1W".parse().expect("week"));
        assert_ne!(week, "P1D".parse().expect("day"));
    }

    #[test]
    fn kinds_never_compare_equal() {
        let number = Bucket::number(60_000.0).expect("number");
        let minute: Bucket = "PT1M".parse().expect("minute");

        assert_eq!(number.canonical_size(), minute.canonical_size());
        assert_ne!(number, minute);
    }

    #[test]
    fn canonical_size_of_month() {
        let month: Bucket = "P1M".parse().expect("month");
        assert_eq!(month.canonical_size(), 2_592_000_000.0);
    }

    #[test]
    fn serde_uses_wire_form() {
        let buckets = vec![
            Bucket::number(10.0).expect("10"),
            "PT1H".parse::<Bucket>().expect("hour"),
        ];
        let json = serde_json::to_string(&buckets).expect("serialize");
        assert_eq!(json, r#"[10.0,"PT1H"]"#);

        let back: Vec<Bucket> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, buckets);

        assert!(serde_json::from_str::<Bucket>("\"P2D\"").is_err());
    }
}
