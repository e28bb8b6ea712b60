//! # Calendar Durations
//!
//! ISO-8601 durations as used by time buckets.
//!
//! - `PnW` or `P[nY][nM][nD][T[nH][nM][nS]]`, at least one non-zero unit
//! - Weeks never combine with other units
//! - Equality is structural: `P7D != P1W` even though both last a week
//!
//! A duration is *floorable* when timestamps can be grouped by it without
//! ambiguity: it uses a single unit, and its count either is one or evenly
//! divides the number of such units in the parent unit.

use crate::primitives::{DAY_MS, HOUR_MS, MINUTE_MS, MONTH_MS, SECOND_MS, WEEK_MS, YEAR_MS};
use crate::types::GranularityError;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SPAN
// =============================================================================

/// A single calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Span {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Span {
    /// All spans, largest first. This is also the ISO rendering order.
    pub const ALL: [Span; 7] = [
        Span::Year,
        Span::Month,
        Span::Week,
        Span::Day,
        Span::Hour,
        Span::Minute,
        Span::Second,
    ];

    const DATE_PART: [Span; 4] = [Span::Year, Span::Month, Span::Week, Span::Day];
    const TIME_PART: [Span; 3] = [Span::Hour, Span::Minute, Span::Second];

    const fn index(self) -> usize {
        match self {
            Span::Year => 0,
            Span::Month => 1,
            Span::Week => 2,
            Span::Day => 3,
            Span::Hour => 4,
            Span::Minute => 5,
            Span::Second => 6,
        }
    }

    const fn designator(self) -> char {
        match self {
            Span::Year => 'Y',
            Span::Month | Span::Minute => 'M',
            Span::Week => 'W',
            Span::Day => 'D',
            Span::Hour => 'H',
            Span::Second => 'S',
        }
    }

    const fn is_time_part(self) -> bool {
        matches!(self, Span::Hour | Span::Minute | Span::Second)
    }

    /// Canonical length of one unit in milliseconds.
    #[must_use]
    pub const fn canonical_length_ms(self) -> u64 {
        match self {
            Span::Year => YEAR_MS,
            Span::Month => MONTH_MS,
            Span::Week => WEEK_MS,
            Span::Day => DAY_MS,
            Span::Hour => HOUR_MS,
            Span::Minute => MINUTE_MS,
            Span::Second => SECOND_MS,
        }
    }

    /// How many of this unit make up its parent unit, when that is fixed.
    ///
    /// Days and weeks have no fixed count in a month.
    const fn siblings(self) -> Option<u32> {
        match self {
            Span::Second | Span::Minute => Some(60),
            Span::Hour => Some(24),
            Span::Month => Some(12),
            Span::Year | Span::Week | Span::Day => None,
        }
    }
}

// =============================================================================
// DURATION
// =============================================================================

/// An ISO-8601 calendar duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    counts: [u32; 7],
}

impl Duration {
    /// Build a single-unit duration. Used for the static tables, where
    /// `count` is a non-zero literal.
    pub(crate) const fn from_span(span: Span, count: u32) -> Self {
        let mut counts = [0; 7];
        counts[span.index()] = count;
        Self { counts }
    }

    /// Build a single-unit duration, rejecting a zero count.
    pub fn of(span: Span, count: u32) -> Result<Self, GranularityError> {
        if count == 0 {
            return Err(GranularityError::InvalidDuration(format!(
                "zero {:?} count",
                span
            )));
        }
        Ok(Self::from_span(span, count))
    }

    /// Parse an ISO-8601 duration string.
    pub fn parse(text: &str) -> Result<Self, GranularityError> {
        let invalid = || GranularityError::InvalidDuration(text.to_string());

        let body = text.strip_prefix('P').ok_or_else(invalid)?;
        let (date_part, time_part) = match body.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (body, None),
        };

        let mut counts = [0u32; 7];
        let mut designators = parse_section(date_part, &Span::DATE_PART, &mut counts)
            .ok_or_else(invalid)?;

        if let Some(time) = time_part {
            let time_designators =
                parse_section(time, &Span::TIME_PART, &mut counts).ok_or_else(invalid)?;
            // "PT" with nothing after it
            if time_designators == 0 {
                return Err(invalid());
            }
            designators += time_designators;
        }

        if designators == 0 || counts.iter().all(|&c| c == 0) {
            return Err(invalid());
        }

        let duration = Self { counts };
        if duration.count(Span::Week) > 0 && designators > 1 {
            return Err(invalid());
        }

        Ok(duration)
    }

    /// Count of the given unit in this duration.
    #[must_use]
    pub const fn count(&self, span: Span) -> u32 {
        self.counts[span.index()]
    }

    /// The only unit in use, if exactly one unit is non-zero.
    #[must_use]
    pub fn single_span(&self) -> Option<Span> {
        let mut used = Span::ALL.into_iter().filter(|s| self.count(*s) > 0);
        match (used.next(), used.next()) {
            (Some(span), None) => Some(span),
            _ => None,
        }
    }

    /// Canonical length in milliseconds (months are 30 days, years 365).
    #[must_use]
    pub fn canonical_length_ms(&self) -> u64 {
        Span::ALL.iter().fold(0u64, |acc, span| {
            let length = u64::from(self.count(*span)).saturating_mul(span.canonical_length_ms());
            acc.saturating_add(length)
        })
    }

    /// Whether timestamps can be floored to this duration.
    #[must_use]
    pub fn is_floorable(&self) -> bool {
        let Some(span) = self.single_span() else {
            return false;
        };
        let count = self.count(span);
        if count == 1 || span == Span::Year {
            return true;
        }
        span.siblings().is_some_and(|siblings| siblings % count == 0)
    }
}

/// Parse one section (`date` or `time`) of a duration body.
///
/// Designators must appear in `order`, each at most once.
/// Returns the number of designators consumed, or `None` on malformed input.
fn parse_section(section: &str, order: &[Span], counts: &mut [u32; 7]) -> Option<usize> {
    let mut digits = String::new();
    let mut next_position = 0;
    let mut consumed = 0;

    for ch in section.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let offset = order[next_position..]
            .iter()
            .position(|span| span.designator() == ch)?;
        let span = order[next_position + offset];
        counts[span.index()] = digits.parse().ok()?;
        digits.clear();
        next_position += offset + 1;
        consumed += 1;
    }

    // Trailing number without a designator
    if !digits.is_empty() {
        return None;
    }
    Some(consumed)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        let mut in_time_part = false;
        for span in Span::ALL {
            let count = self.count(span);
            if count == 0 {
                continue;
            }
            if span.is_time_part() && !in_time_part {
                f.write_str("T")?;
                in_time_part = true;
            }
            write!(f, "{}{}", count, span.designator())?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = GranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
