//! # Kind Profiles
//!
//! Static bucketing configuration for each dimension kind: checkpoint tables,
//! minimum and default granularities, default menus and the universe of
//! candidates an anchored menu is cut from.
//!
//! | Kind | Mode | Thresholds → candidate |
//! |------|------|------------------------|
//! | time | fine | 95d→P1W, 8d→P1D, 8h→PT1H, 3h→PT5M (floor PT1M) |
//! | time | coarse | 95d→P1M, 20d→P1W, 6d→P1D, 2d→PT12H, 23h→PT6H, 3h→PT1H, 30m→PT5M (floor PT1M) |
//! | number | fine | 5000→1000, 500→100, 100→10, 1→1, 0.1→0.1 |
//! | number | coarse | 5e5→5e4, 5e4→1e4, 5000→5000, 1000→1000, 100→100, 10→10, 1→1, 0.1→0.1 |
//!
//! The tables are built once on first use and never mutated.

use crate::bucket::{Bucket, NumberBucket, TimeBucket};
use crate::checkpoint::{Checkpoint, CheckpointMode, CheckpointTable};
use crate::duration::Span;
use crate::primitives::{
    ANCHORED_NUMBER_UNIVERSE_SIZE, DAY_MS, HOUR_MS, MENU_LENGTH, MINUTE_MS,
};
use crate::synthesizer::NumberBucketSynthesizer;
use crate::types::{ContinuousKind, GranularityError};
use std::sync::LazyLock;

// =============================================================================
// PROFILE
// =============================================================================

/// Everything the engine needs to know about one dimension kind.
#[derive(Debug)]
pub struct KindProfile {
    kind: ContinuousKind,
    min_granularity: Bucket,
    default_granularity: Bucket,
    fine: CheckpointTable,
    coarse: Option<CheckpointTable>,
    default_menu: Vec<Bucket>,
    coarse_menu: Option<Vec<Bucket>>,
}

impl KindProfile {
    /// The profile for a kind.
    #[must_use]
    pub fn for_kind(kind: ContinuousKind) -> &'static KindProfile {
        match kind {
            ContinuousKind::Time => &TIME_PROFILE,
            ContinuousKind::Number => &NUMBER_PROFILE,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ContinuousKind {
        self.kind
    }

    /// Smallest bucket the resolver falls back to.
    #[must_use]
    pub const fn min_granularity(&self) -> Bucket {
        self.min_granularity
    }

    /// Bucket used when nothing else is known about a dimension.
    #[must_use]
    pub const fn default_granularity(&self) -> Bucket {
        self.default_granularity
    }

    /// The checkpoint table for a mode, falling back to the fine table.
    #[must_use]
    pub fn table(&self, mode: CheckpointMode) -> &CheckpointTable {
        match (mode, &self.coarse) {
            (CheckpointMode::Coarse, Some(coarse)) => coarse,
            _ => &self.fine,
        }
    }

    /// All tables of this kind.
    pub fn tables(&self) -> impl Iterator<Item = &CheckpointTable> {
        std::iter::once(&self.fine).chain(self.coarse.as_ref())
    }

    /// The unanchored menu, ascending, `MENU_LENGTH` entries.
    #[must_use]
    pub fn default_menu(&self, mode: CheckpointMode) -> &[Bucket] {
        match (mode, &self.coarse_menu) {
            (CheckpointMode::Coarse, Some(coarse)) => coarse,
            _ => &self.default_menu,
        }
    }

    /// Ascending candidates an anchored menu is cut from, and that anchored
    /// resolution searches.
    ///
    /// Time uses a fixed ladder of supported durations. Number synthesizes
    /// round values around the anchor's size.
    pub fn anchored_universe(&self, anchor: &Bucket) -> Result<Vec<Bucket>, GranularityError> {
        match self.kind {
            ContinuousKind::Time => Ok(SUPPORTED_TIME_GRANULARITIES.clone()),
            ContinuousKind::Number => Ok(NumberBucketSynthesizer::synthesize(
                anchor.canonical_size(),
                ANCHORED_NUMBER_UNIVERSE_SIZE,
                false,
            )?
            .into_iter()
            .map(Bucket::Number)
            .collect()),
        }
    }
}

// =============================================================================
// STATIC TABLES
// =============================================================================

const fn time(span: Span, count: u32) -> Bucket {
    Bucket::Time(TimeBucket::from_span(span, count))
}

const fn number(size: f64) -> Bucket {
    Bucket::Number(NumberBucket::from_static(size))
}

const fn days(count: u64) -> f64 {
    (count * DAY_MS) as f64
}

const fn hours(count: u64) -> f64 {
    (count * HOUR_MS) as f64
}

const fn minutes(count: u64) -> f64 {
    (count * MINUTE_MS) as f64
}

const TIME_MIN_GRANULARITY: Bucket = time(Span::Minute, 1);

/// The ladder anchored time menus are cut from.
static SUPPORTED_TIME_GRANULARITIES: LazyLock<Vec<Bucket>> = LazyLock::new(|| {
    vec![
        time(Span::Second, 1),
        time(Span::Minute, 1),
        time(Span::Minute, 5),
        time(Span::Minute, 15),
        time(Span::Hour, 1),
        time(Span::Hour, 6),
        time(Span::Hour, 8),
        time(Span::Hour, 12),
        time(Span::Day, 1),
        time(Span::Week, 1),
        time(Span::Month, 1),
        time(Span::Month, 3),
        time(Span::Month, 6),
        time(Span::Year, 1),
        time(Span::Year, 2),
    ]
});

/// Candidates of a table plus the kind's floor, ascending.
fn floor_and_candidates(floor: Option<Bucket>, table: &CheckpointTable) -> Vec<Bucket> {
    floor.into_iter().chain(table.candidates_ascending()).collect()
}

/// The leading `MENU_LENGTH` entries of an ascending list.
fn leading_menu(mut entries: Vec<Bucket>) -> Vec<Bucket> {
    entries.truncate(MENU_LENGTH);
    entries
}

static TIME_PROFILE: LazyLock<KindProfile> = LazyLock::new(|| {
    let fine = CheckpointTable::new(
        ContinuousKind::Time,
        CheckpointMode::Fine,
        vec![
            Checkpoint::new(days(95), time(Span::Week, 1)),
            Checkpoint::new(days(8), time(Span::Day, 1)),
            Checkpoint::new(hours(8), time(Span::Hour, 1)),
            Checkpoint::new(hours(3), time(Span::Minute, 5)),
        ],
    );
    let coarse = CheckpointTable::new(
        ContinuousKind::Time,
        CheckpointMode::Coarse,
        vec![
            Checkpoint::new(days(95), time(Span::Month, 1)),
            Checkpoint::new(days(20), time(Span::Week, 1)),
            Checkpoint::new(days(6), time(Span::Day, 1)),
            Checkpoint::new(days(2), time(Span::Hour, 12)),
            Checkpoint::new(hours(23), time(Span::Hour, 6)),
            Checkpoint::new(hours(3), time(Span::Hour, 1)),
            Checkpoint::new(minutes(30), time(Span::Minute, 5)),
        ],
    );

    let default_menu = floor_and_candidates(Some(TIME_MIN_GRANULARITY), &fine);
    let coarse_menu = leading_menu(floor_and_candidates(Some(TIME_MIN_GRANULARITY), &coarse));

    KindProfile {
        kind: ContinuousKind::Time,
        min_granularity: TIME_MIN_GRANULARITY,
        default_granularity: time(Span::Day, 1),
        fine,
        coarse: Some(coarse),
        default_menu,
        coarse_menu: Some(coarse_menu),
    }
});

static NUMBER_PROFILE: LazyLock<KindProfile> = LazyLock::new(|| {
    let fine = CheckpointTable::new(
        ContinuousKind::Number,
        CheckpointMode::Fine,
        vec![
            Checkpoint::new(5000.0, number(1000.0)),
            Checkpoint::new(500.0, number(100.0)),
            Checkpoint::new(100.0, number(10.0)),
            Checkpoint::new(1.0, number(1.0)),
            Checkpoint::new(0.1, number(0.1)),
        ],
    );
    let coarse = CheckpointTable::new(
        ContinuousKind::Number,
        CheckpointMode::Coarse,
        vec![
            Checkpoint::new(500_000.0, number(50_000.0)),
            Checkpoint::new(50_000.0, number(10_000.0)),
            Checkpoint::new(5000.0, number(5000.0)),
            Checkpoint::new(1000.0, number(1000.0)),
            Checkpoint::new(100.0, number(100.0)),
            Checkpoint::new(10.0, number(10.0)),
            Checkpoint::new(1.0, number(1.0)),
            Checkpoint::new(0.1, number(0.1)),
        ],
    );

    let default_menu = floor_and_candidates(None, &fine);

    KindProfile {
        kind: ContinuousKind::Number,
        min_granularity: number(1.0),
        default_granularity: number(10.0),
        fine,
        coarse: Some(coarse),
        default_menu,
        // Number menus have no coarse variant.
        coarse_menu: None,
    }
});

// =============================================================================
// TESTS
// =============================================================================
