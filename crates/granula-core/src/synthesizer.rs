//! # Number Bucket Synthesizer
//!
//! Generates round number buckets (…, 1, 5, 10, 50, 100, …) scaled to the
//! magnitude of a center value, rounded to the same number of significant
//! digits as the center has whole digits.

use crate::bucket::NumberBucket;
use crate::types::GranularityError;

/// Synthesizes ascending number buckets around a center magnitude.
pub struct NumberBucketSynthesizer;

impl NumberBucketSynthesizer {
    /// Emit `count` ascending buckets starting at the decade of `center`.
    ///
    /// For each power of ten `10^k`, starting at `k = floor(log10(center))`:
    /// - unless `coarse`, the half step `5 * 10^(k-1)`
    /// - the whole step `10^k`
    ///
    /// Stops early only if the next step would overflow `f64`.
    pub fn synthesize(
        center: f64,
        count: usize,
        coarse: bool,
    ) -> Result<Vec<NumberBucket>, GranularityError> {
        if !center.is_finite() || center <= 0.0 {
            return Err(GranularityError::InvalidArgument(format!(
                "synthesis center must be finite and positive, got {}",
                center
            )));
        }

        let digits = whole_digits(center);
        let mut exponent = decimal_magnitude(center);
        let mut buckets = Vec::with_capacity(count);

        while buckets.len() < count {
            if !coarse {
                let half_step = 5.0 * 10f64.powi(exponent - 1);
                if !push_step(&mut buckets, half_step, digits) || buckets.len() == count {
                    break;
                }
            }
            let whole_step = 10f64.powi(exponent);
            if !push_step(&mut buckets, whole_step, digits) {
                break;
            }
            exponent += 1;
        }

        Ok(buckets)
    }
}

/// Round and append one step. Returns `false` once steps overflow.
fn push_step(buckets: &mut Vec<NumberBucket>, step: f64, digits: u32) -> bool {
    if !step.is_finite() {
        return false;
    }
    // Underflowed steps below the smallest positive f64 are skipped.
    if let Ok(bucket) = NumberBucket::new(round_to_significant_digits(step, digits)) {
        buckets.push(bucket);
    }
    true
}

/// `floor(log10(|value|))`, corrected for floating point error at exact
/// powers of ten.
pub(crate) fn decimal_magnitude(value: f64) -> i32 {
    let value = value.abs();
    let mut magnitude = value.log10().floor() as i32;
    if 10f64.powi(magnitude) > value {
        magnitude -= 1;
    } else if 10f64.powi(magnitude + 1) <= value {
        magnitude += 1;
    }
    magnitude
}

/// Number of digits before the decimal point; at least one.
#[must_use]
pub fn whole_digits(value: f64) -> u32 {
    if value == 0.0 || !value.is_finite() {
        return 1;
    }
    decimal_magnitude(value).max(0) as u32 + 1
}

/// Round `value` to `digits` significant digits.
///
/// Scales by an exact power of ten so that round values stay exact.
#[must_use]
pub fn round_to_significant_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let shift = digits as i32 - decimal_magnitude(value) - 1;
    if shift >= 0 {
        let multiplier = 10f64.powi(shift);
        (value * multiplier).round() / multiplier
    } else {
        let divisor = 10f64.powi(-shift);
        (value / divisor).round() * divisor
    }
}

// =============================================================================
// TESTS
// =============================================================================
