//! # Innate Primitives
//!
//! Hardcoded constants for the resolution engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Canonical span lengths are the approximations used to compare calendar
//! durations with each other and with range lengths.

/// Number of entries offered in a granularity menu.
pub const MENU_LENGTH: usize = 5;

/// Number of synthesized candidates around an anchored number bucket.
pub const ANCHORED_NUMBER_UNIVERSE_SIZE: usize = 10;

/// Maximum number of entries accepted in a custom granularity set.
///
/// Keeps every search over a caller-supplied set small and bounded.
pub const MAX_CUSTOM_GRANULARITIES: usize = 64;

/// Index of the custom granularity used as the default for a dimension.
pub const CUSTOM_DEFAULT_INDEX: usize = 2;

// =============================================================================
// CANONICAL SPAN LENGTHS (milliseconds)
// =============================================================================

/// One second.
pub const SECOND_MS: u64 = 1_000;

/// One minute.
pub const MINUTE_MS: u64 = 60 * SECOND_MS;

/// One hour.
pub const HOUR_MS: u64 = 60 * MINUTE_MS;

/// One day.
pub const DAY_MS: u64 = 24 * HOUR_MS;

/// One week.
pub const WEEK_MS: u64 = 7 * DAY_MS;

/// One month, approximated as 30 days.
pub const MONTH_MS: u64 = 30 * DAY_MS;

/// One year, approximated as 365 days.
pub const YEAR_MS: u64 = 365 * DAY_MS;
