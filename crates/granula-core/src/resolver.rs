//! # Best Bucket Resolver
//!
//! Picks the bucket a range should be grouped by.
//!
//! The range length is matched against the kind's checkpoint table, largest
//! threshold first. The first checkpoint that fires proposes a candidate,
//! which is then adjusted for the anchor and the custom granularity set:
//!
//! - anchor present: the entry closest to the candidate among the anchored
//!   universe (or the custom set) that is no finer than the anchor
//! - custom set only: the best match for the candidate inside the set
//! - neither: the candidate itself
//!
//! When no checkpoint fires the range is tiny, and the kind's minimum
//! granularity (or the smallest custom entry) is used unless the anchor is
//! coarser than that.

use crate::bucket::Bucket;
use crate::checkpoint::CheckpointMode;
use crate::profile::KindProfile;
use crate::search::{find_best_match, find_bigger_closest_to_ideal};
use crate::types::{BucketRange, ContinuousKind, GranularityError};
use crate::validation::{GranularitySet, ensure_kind};

/// Resolve the best bucket for a range.
///
/// Fails with `InvalidArgument` only when the anchor or the custom set has a
/// different kind than the range.
pub fn resolve_best_bucket(
    range: &BucketRange,
    coarse: bool,
    anchor: Option<&Bucket>,
    custom: Option<&GranularitySet>,
) -> Result<Bucket, GranularityError> {
    let kind = range.kind();
    check_kinds(kind, anchor, custom)?;

    let profile = KindProfile::for_kind(kind);
    let table = profile.table(CheckpointMode::from_coarse(coarse));
    let range_length = range.length();
    let anchor_size = anchor.map(Bucket::canonical_size);

    if let Some(checkpoint) = table.first_firing(range_length, anchor_size) {
        let ideal_size = checkpoint.candidate.canonical_size();

        return match (anchor, custom) {
            (Some(anchor), Some(set)) => Ok(closest_above_anchor(
                profile,
                set.as_slice(),
                anchor,
                ideal_size,
            )),
            (Some(anchor), None) => {
                let universe = profile.anchored_universe(anchor)?;
                Ok(closest_above_anchor(profile, &universe, anchor, ideal_size))
            }
            (None, Some(set)) => {
                Ok(find_best_match(set.as_slice(), ideal_size).unwrap_or(checkpoint.candidate))
            }
            (None, None) => Ok(checkpoint.candidate),
        };
    }

    let minimum = custom
        .and_then(GranularitySet::smallest)
        .unwrap_or_else(|| profile.min_granularity());

    match anchor {
        Some(anchor) if anchor.canonical_size() > minimum.canonical_size() => Ok(*anchor),
        _ => Ok(minimum),
    }
}

/// The granularity a dimension starts out with.
///
/// The anchor wins when present, then the custom set's default entry, then
/// the kind's static default.
pub fn default_granularity(
    kind: ContinuousKind,
    anchor: Option<&Bucket>,
    custom: Option<&GranularitySet>,
) -> Result<Bucket, GranularityError> {
    check_kinds(kind, anchor, custom)?;

    if let Some(anchor) = anchor {
        return Ok(*anchor);
    }
    match custom {
        Some(set) => set.default_entry(),
        None => Ok(KindProfile::for_kind(kind).default_granularity()),
    }
}

fn check_kinds(
    kind: ContinuousKind,
    anchor: Option<&Bucket>,
    custom: Option<&GranularitySet>,
) -> Result<(), GranularityError> {
    if let Some(anchor) = anchor {
        ensure_kind(kind, anchor, "anchor")?;
    }
    if let Some(set) = custom
        && set.kind() != kind
    {
        return Err(GranularityError::InvalidArgument(format!(
            "custom granularities are {} buckets, expected {}",
            set.kind(),
            kind
        )));
    }
    Ok(())
}

fn closest_above_anchor(
    profile: &KindProfile,
    universe: &[Bucket],
    anchor: &Bucket,
    ideal_size: f64,
) -> Bucket {
    find_bigger_closest_to_ideal(universe, anchor.canonical_size(), ideal_size)
        .unwrap_or_else(|| profile.default_granularity())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn bucket(text: &str) -> Bucket {
        text.parse().expect("bucket")
    }

    fn set(texts: &[&str]) -> GranularitySet {
        GranularitySet::new(texts.iter().map(|t| bucket(t)).collect()).expect("set")
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().expect("timestamp")
    }

    fn time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> BucketRange {
        BucketRange::time(start, end)
    }

    fn resolve(
        range: &BucketRange,
        coarse: bool,
        anchor: Option<&str>,
        custom: Option<&GranularitySet>,
    ) -> String {
        let anchor = anchor.map(bucket);
        resolve_best_bucket(range, coarse, anchor.as_ref(), custom)
            .expect("resolve")
            .to_string()
    }

    #[test]
    fn one_year_of_time() {
        let range = time_range(at(1994, 2, 24, 0, 0), at(1995, 2, 25, 0, 0));
        assert_eq!(resolve(&range, false, None, None), "P1W");
        assert_eq!(resolve(&range, true, None, None), "P1M");
    }

    #[test]
    fn forty_five_minutes_of_time() {
        let range = time_range(at(2024, 1, 1, 10, 0), at(2024, 1, 1, 10, 45));
        assert_eq!(resolve(&range, false, None, None), "PT1M");
        assert_eq!(resolve(&range, true, None, None), "PT5M");
    }

    #[test]
    fn number_range_with_and_without_anchor() {
        let range = BucketRange::number(0.0, 100.0).expect("range");
        assert_eq!(resolve(&range, false, None, None), "1");
        assert_eq!(resolve(&range, false, Some("50"), None), "50");
    }

    #[test]
    fn custom_set_without_anchor_takes_best_match() {
        let range = BucketRange::number(0.0, 10.0).expect("range");
        let custom = set(&["0.25", "0.5", "0.78", "5"]);
        assert_eq!(resolve(&range, false, None, Some(&custom)), "5");
    }

    #[test]
    fn custom_set_below_every_checkpoint_uses_its_smallest() {
        let range = time_range(at(2024, 1, 1, 10, 0), at(2024, 1, 1, 10, 45));
        let custom = set(&["PT1H", "PT8H", "PT12H", "P1D", "P1W"]);
        assert_eq!(resolve(&range, false, None, Some(&custom)), "PT1H");
    }

    #[test]
    fn anchor_floors_the_answer() {
        let day = time_range(at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 0));
        assert_eq!(resolve(&day, false, Some("PT6H"), None), "PT6H");

        let year = time_range(at(2023, 1, 1, 0, 0), at(2024, 1, 1, 0, 0));
        assert_eq!(resolve(&year, false, Some("PT6H"), None), "P1W");
    }

    #[test]
    fn fine_anchor_does_not_cap_the_answer() {
        let year = time_range(at(1994, 2, 24, 0, 0), at(1995, 2, 25, 0, 0));
        assert_eq!(resolve(&year, false, Some("PT1S"), None), "P1W");
        assert_eq!(resolve(&year, true, Some("PT1S"), None), "P1M");

        let range = BucketRange::number(0.0, 100_000.0).expect("range");
        assert_eq!(resolve(&range, false, Some("1"), None), "1000");
    }

    #[test]
    fn tiny_range_falls_back_to_minimum() {
        let range = BucketRange::number(0.0, 0.05).expect("range");
        assert_eq!(resolve(&range, false, None, None), "1");

        let custom = set(&["0.01", "0.02"]);
        assert_eq!(resolve(&range, false, None, Some(&custom)), "0.01");
        // Coarser than the minimum, yet below every threshold.
        assert_eq!(resolve(&range, false, Some("0.05"), Some(&custom)), "0.05");
    }

    #[test]
    fn anchor_above_every_option_falls_back_to_default() {
        let range = BucketRange::number(0.0, 100.0).expect("range");
        let custom = set(&["1", "5", "10"]);
        assert_eq!(resolve(&range, false, Some("50"), Some(&custom)), "10");
    }

    #[test]
    fn resolving_on_own_answer_is_stable() {
        let range = time_range(at(2024, 3, 1, 0, 0), at(2024, 3, 9, 6, 0));
        for coarse in [false, true] {
            let first = resolve(&range, coarse, None, None);
            assert_eq!(resolve(&range, coarse, Some(&first), None), first);
        }
    }

    #[test]
    fn rejects_mismatched_kinds() {
        let range = BucketRange::number(0.0, 100.0).expect("range");
        let anchor = bucket("PT1H");
        assert!(matches!(
            resolve_best_bucket(&range, false, Some(&anchor), None),
            Err(GranularityError::InvalidArgument(_))
        ));

        let custom = set(&["PT1H", "P1D"]);
        assert!(matches!(
            resolve_best_bucket(&range, false, None, Some(&custom)),
            Err(GranularityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn default_granularity_precedence() {
        let anchor = bucket("PT6H");
        let custom = set(&["PT1H", "PT8H", "PT12H", "P1D", "P1W"]);
        let resolved = |anchor: Option<&Bucket>, custom: Option<&GranularitySet>| {
            default_granularity(ContinuousKind::Time, anchor, custom)
                .expect("default")
                .to_string()
        };
        assert_eq!(resolved(Some(&anchor), Some(&custom)), "PT6H");
        assert_eq!(resolved(None, Some(&custom)), "PT12H");
        assert_eq!(resolved(None, None), "P1D");
    }

    #[test]
    fn default_granularity_for_numbers() {
        let custom = set(&["100", "500", "1000", "5000", "10000"]);
        let picked =
            default_granularity(ContinuousKind::Number, None, Some(&custom)).expect("default");
        assert_eq!(picked.canonical_size(), 1000.0);

        let picked = default_granularity(ContinuousKind::Number, None, None).expect("default");
        assert_eq!(picked.canonical_size(), 10.0);
    }

    #[test]
    fn default_granularity_needs_a_third_custom_entry() {
        let custom = set(&["1", "5"]);
        assert!(default_granularity(ContinuousKind::Number, None, Some(&custom)).is_err());
    }
}
