//! # Resolution Scenario Tests (T0-T3)
//!
//! End-to-end behaviour of the engine through its public API.
//!
//! ## Tiers
//! - T0: Bucket Parsing
//! - T1: Granularity Menus
//! - T2: Best Bucket Resolution
//! - T3: Custom Granularities and Defaults

use chrono::{DateTime, TimeZone, Utc};
use granula_core::{
    Bucket, BucketRange, ContinuousKind, GranularityError, GranularityInput, GranularitySet,
    default_granularity, generate_granularity_menu, resolve_best_bucket,
};

fn bucket(text: &str) -> Bucket {
    text.parse().expect("bucket")
}

fn buckets(texts: &[&str]) -> Vec<Bucket> {
    texts.iter().map(|t| bucket(t)).collect()
}

fn strings(list: &[Bucket]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn utc(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .expect("timestamp")
        .with_timezone(&Utc)
}

fn time_range(start: &str, end: &str) -> BucketRange {
    BucketRange::time(utc(start), utc(end))
}

fn resolve(range: &BucketRange, coarse: bool, anchor: Option<&str>) -> String {
    let anchor = anchor.map(bucket);
    resolve_best_bucket(range, coarse, anchor.as_ref(), None)
        .expect("resolve")
        .to_string()
}

// =============================================================================
// TIER T0: BUCKET PARSING
// =============================================================================

mod t0_bucket_parsing {
    use super::*;

    /// T0.1: Display strings parse back to equal buckets.
    #[test]
    fn display_round_trips() {
        assert_eq!(bucket("P1W").to_string(), "P1W");
        let five = Bucket::parse(&GranularityInput::Number(5.0)).expect("five");
        assert_eq!(five.to_string(), "5");
        assert_eq!(bucket(&five.to_string()), five);
    }

    /// T0.2: Garbage is rejected.
    #[test]
    fn rejects_garbage() {
        for text in ["not-a-duration", "P", "PT", "P1.5D", ""] {
            assert!(
                matches!(text.parse::<Bucket>(), Err(GranularityError::InvalidBucketInput(_))),
                "{text} should be rejected"
            );
        }
    }

    /// T0.3: Durations without a calendar floor are rejected.
    #[test]
    fn rejects_unfloorable_durations() {
        for text in ["PT7M", "P2D", "P1DT1H", "P5M"] {
            assert!(text.parse::<Bucket>().is_err(), "{text} should be rejected");
        }
    }

    /// T0.4: Non-positive and non-finite numbers are rejected.
    #[test]
    fn rejects_bad_numbers() {
        for value in [0.0, -5.0, f64::INFINITY, f64::NAN] {
            assert!(Bucket::parse(&GranularityInput::Number(value)).is_err());
        }
    }

    /// T0.5: Kinds follow the input.
    #[test]
    fn kinds() {
        assert_eq!(bucket("PT15M").kind(), ContinuousKind::Time);
        assert_eq!(bucket("2.5").kind(), ContinuousKind::Number);
    }
}

// =============================================================================
// TIER T1: GRANULARITY MENUS
// =============================================================================

mod t1_granularity_menus {
    use super::*;

    fn menu(kind: ContinuousKind, anchor: Option<&str>, coarse: bool) -> Vec<String> {
        let anchor = anchor.map(bucket);
        let menu = generate_granularity_menu(kind, anchor.as_ref(), coarse).expect("menu");
        strings(menu.as_slice())
    }

    /// T1.1: Default number menu.
    #[test]
    fn default_number_menu() {
        assert_eq!(
            menu(ContinuousKind::Number, None, false),
            vec!["0.1", "1", "10", "100", "1000"]
        );
    }

    /// T1.2: Anchored number menu starts at the anchor.
    #[test]
    fn anchored_number_menu() {
        assert_eq!(
            menu(ContinuousKind::Number, Some("100"), false),
            vec!["100", "500", "1000", "5000", "10000"]
        );
    }

    /// T1.3: Default time menus, fine and coarse.
    #[test]
    fn default_time_menus() {
        assert_eq!(
            menu(ContinuousKind::Time, None, false),
            vec!["PT1M", "PT5M", "PT1H", "P1D", "P1W"]
        );
        assert_eq!(
            menu(ContinuousKind::Time, None, true),
            vec!["PT1M", "PT5M", "PT1H", "PT6H", "PT12H"]
        );
    }

    /// T1.4: The coarse time menu is a prefix of every coarse granularity,
    /// ascending.
    #[test]
    fn coarse_time_menu_is_an_ascending_prefix() {
        let every_coarse = ["PT1M", "PT5M", "PT1H", "PT6H", "PT12H", "P1D", "P1W", "P1M"];
        let coarse = menu(ContinuousKind::Time, None, true);
        assert_eq!(coarse.len(), 5);
        for (index, granularity) in coarse.iter().enumerate() {
            assert_eq!(granularity, every_coarse[index]);
        }
    }

    /// T1.5: Anchored time menus cut from the supported ladder.
    #[test]
    fn anchored_time_menus() {
        assert_eq!(
            menu(ContinuousKind::Time, Some("PT12H"), false),
            vec!["PT12H", "P1D", "P1W", "P1M", "P3M"]
        );
        assert_eq!(
            menu(ContinuousKind::Time, Some("PT15M"), false),
            vec!["PT15M", "PT1H", "PT6H", "PT8H", "PT12H"]
        );
    }

    /// T1.6: Anchors near the top of the ladder yield short menus.
    #[test]
    fn short_menus_near_the_top() {
        assert_eq!(
            menu(ContinuousKind::Time, Some("P6M"), false),
            vec!["P6M", "P1Y"]
        );
        assert_eq!(menu(ContinuousKind::Time, Some("P1Y"), false), vec!["P1Y"]);
    }
}

// =============================================================================
// TIER T2: BEST BUCKET RESOLUTION
// =============================================================================

mod t2_best_bucket {
    use super::*;

    /// T2.1: A year of data.
    #[test]
    fn one_year() {
        let range = time_range("1994-02-24T00:00:00Z", "1995-02-25T00:00:00Z");
        assert_eq!(resolve(&range, false, None), "P1W");
        assert_eq!(resolve(&range, true, None), "P1M");
    }

    /// T2.2: Forty five minutes of data.
    #[test]
    fn forty_five_minutes() {
        let range = time_range("2024-06-01T12:00:00Z", "2024-06-01T12:45:00Z");
        assert_eq!(resolve(&range, false, None), "PT1M");
        assert_eq!(resolve(&range, true, None), "PT5M");
    }

    /// T2.3: A month of data.
    #[test]
    fn one_month() {
        let range = time_range("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z");
        assert_eq!(resolve(&range, false, None), "P1D");
        assert_eq!(resolve(&range, true, None), "P1W");
    }

    /// T2.4: Just over a week.
    #[test]
    fn eight_and_a_half_days() {
        let range = time_range("2024-01-01T00:00:00Z", "2024-01-09T12:00:00Z");
        assert_eq!(resolve(&range, false, None), "P1D");
        assert_eq!(resolve(&range, true, None), "P1D");
    }

    /// T2.5: Days and hours.
    #[test]
    fn days_and_hours() {
        let four_days = time_range("2024-01-01T00:00:00Z", "2024-01-05T00:00:00Z");
        assert_eq!(resolve(&four_days, false, None), "PT1H");
        assert_eq!(resolve(&four_days, true, None), "PT12H");

        let one_day = time_range("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        assert_eq!(resolve(&one_day, false, None), "PT1H");
        assert_eq!(resolve(&one_day, true, None), "PT6H");

        let four_hours = time_range("2024-01-01T00:00:00Z", "2024-01-01T04:00:00Z");
        assert_eq!(resolve(&four_hours, false, None), "PT5M");
        assert_eq!(resolve(&four_hours, true, None), "PT1H");
    }

    /// T2.6: Reversed bounds measure the same length.
    #[test]
    fn reversed_bounds() {
        let range = time_range("1995-02-25T00:00:00Z", "1994-02-24T00:00:00Z");
        assert_eq!(resolve(&range, false, None), "P1W");
    }

    /// T2.7: Numbers.
    #[test]
    fn number_ranges() {
        let range = BucketRange::number(0.0, 100.0).expect("range");
        assert_eq!(resolve(&range, false, None), "1");
        assert_eq!(resolve(&range, false, Some("50")), "50");

        let wide = BucketRange::number(-5000.0, 5000.0).expect("range");
        assert_eq!(resolve(&wide, false, None), "1000");
        assert_eq!(resolve(&wide, true, None), "5000");
    }

    /// T2.8: An anchor is never refined below.
    #[test]
    fn anchor_floor() {
        let day = time_range("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        assert_eq!(resolve(&day, false, Some("PT6H")), "PT6H");

        let year = time_range("2023-01-01T00:00:00Z", "2024-01-01T00:00:00Z");
        assert_eq!(resolve(&year, false, Some("PT6H")), "P1W");
        assert_eq!(resolve(&year, false, Some("P1M")), "P1M");
    }

    /// T2.10: A fine anchor still coarsens with the range.
    #[test]
    fn fine_anchor_far_below_the_candidate() {
        let year = time_range("1994-02-24T00:00:00Z", "1995-02-25T00:00:00Z");
        assert_eq!(resolve(&year, false, Some("PT1S")), "P1W");
        assert_eq!(resolve(&year, false, Some("PT1M")), "P1W");

        let four_days = time_range("2024-01-01T00:00:00Z", "2024-01-05T00:00:00Z");
        assert_eq!(resolve(&four_days, true, Some("PT1M")), "PT12H");

        let wide = BucketRange::number(0.0, 100_000.0).expect("range");
        assert_eq!(resolve(&wide, false, Some("1")), "1000");
        // The synthesized universe above 1 tops out at 10000.
        assert_eq!(resolve(&wide, true, Some("1")), "10000");
    }

    /// T2.9: Empty ranges fall back to the minimum granularity.
    #[test]
    fn empty_range() {
        let instant = time_range("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z");
        assert_eq!(resolve(&instant, false, None), "PT1M");
        assert_eq!(resolve(&instant, true, None), "PT1M");

        let point = BucketRange::number(3.0, 3.0).expect("range");
        assert_eq!(resolve(&point, false, None), "1");
    }
}

// =============================================================================
// TIER T3: CUSTOM GRANULARITIES AND DEFAULTS
// =============================================================================

mod t3_custom_and_defaults {
    use super::*;

    fn custom(texts: &[&str]) -> GranularitySet {
        GranularitySet::new(buckets(texts)).expect("set")
    }

    /// T3.1: Number custom set without anchor.
    #[test]
    fn number_custom_set() {
        let range = BucketRange::number(0.0, 10.0).expect("range");
        let set = custom(&["0.25", "0.5", "0.78", "5"]);
        let picked = resolve_best_bucket(&range, false, None, Some(&set)).expect("resolve");
        assert_eq!(picked.to_string(), "5");
    }

    /// T3.2: Time custom set without anchor.
    #[test]
    fn time_custom_set() {
        let set = custom(&["PT1H", "PT8H", "PT12H", "P1D", "P1W"]);

        let day = time_range("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        let picked = resolve_best_bucket(&day, false, None, Some(&set)).expect("resolve");
        assert_eq!(picked.to_string(), "PT1H");

        let minutes = time_range("2024-01-01T00:00:00Z", "2024-01-01T00:45:00Z");
        let picked = resolve_best_bucket(&minutes, false, None, Some(&set)).expect("resolve");
        assert_eq!(picked.to_string(), "PT1H");

        let year = time_range("2023-01-01T00:00:00Z", "2024-01-01T00:00:00Z");
        let picked = resolve_best_bucket(&year, false, None, Some(&set)).expect("resolve");
        assert_eq!(picked.to_string(), "P1W");
    }

    /// T3.3: Custom set with an anchor.
    #[test]
    fn time_custom_set_with_anchor() {
        let set = custom(&["PT1H", "PT8H", "PT12H", "P1D", "P1W"]);
        let anchor = bucket("PT8H");
        let day = time_range("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        let picked = resolve_best_bucket(&day, false, Some(&anchor), Some(&set)).expect("resolve");
        assert_eq!(picked.to_string(), "PT8H");
    }

    /// T3.4: Unsorted custom sets are refused.
    #[test]
    fn unsorted_custom_set() {
        assert!(matches!(
            GranularitySet::new(buckets(&["P1D", "PT1H"])),
            Err(GranularityError::InvalidArgument(_))
        ));
    }

    /// T3.5: Custom set of another kind is refused.
    #[test]
    fn mismatched_custom_set() {
        let set = custom(&["1", "5", "10"]);
        let range = time_range("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        assert!(matches!(
            resolve_best_bucket(&range, false, None, Some(&set)),
            Err(GranularityError::InvalidArgument(_))
        ));
    }

    /// T3.6: Defaults.
    #[test]
    fn defaults() {
        let set = custom(&["100", "500", "1000", "5000", "10000"]);
        let picked =
            default_granularity(ContinuousKind::Number, None, Some(&set)).expect("default");
        assert_eq!(picked.canonical_size(), 1000.0);

        let anchor = bucket("250");
        let picked = default_granularity(ContinuousKind::Number, Some(&anchor), Some(&set))
            .expect("default");
        assert_eq!(picked, anchor);

        let picked = default_granularity(ContinuousKind::Time, None, None).expect("default");
        assert_eq!(picked.to_string(), "P1D");
    }
}
