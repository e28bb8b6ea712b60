//! # granula-core
//!
//! The granularity resolution engine - THE LOGIC.
//!
//! Given the extent of a continuous dimension (a time range or a numeric
//! range), this crate decides which bucket the dimension should be grouped
//! by, and which alternative buckets to offer a user.
//!
//! ## Components
//!
//! - `bucket` - number and time buckets, parsing and display
//! - `checkpoint` / `profile` - the static threshold tables of each kind
//! - `synthesizer` - round number buckets around a magnitude
//! - `menu` - granularity menus, with or without an anchor
//! - `resolver` - the best bucket for a range
//!
//! ## Architectural Constraints
//!
//! - Pure functions over immutable inputs: NO I/O, NO async, NO logging
//! - Static tables are built once and never mutated
//! - Every fallible operation returns `GranularityError`; nothing panics

// =============================================================================
// MODULES
// =============================================================================

pub mod bucket;
pub mod checkpoint;
pub mod duration;
pub mod menu;
pub mod primitives;
pub mod profile;
pub mod resolver;
pub mod search;
pub mod synthesizer;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use bucket::{Bucket, NumberBucket, TimeBucket};
pub use duration::{Duration, Span};
pub use types::{BucketRange, ContinuousKind, GranularityError, GranularityInput};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use checkpoint::{Checkpoint, CheckpointMode, CheckpointTable};
pub use menu::{GranularityMenu, generate_granularity_menu};
pub use profile::KindProfile;
pub use resolver::{default_granularity, resolve_best_bucket};
pub use synthesizer::NumberBucketSynthesizer;
pub use validation::{GranularitySet, is_granularity_valid, validate_granularity};

// =============================================================================
// RE-EXPORTS: Primitives
// =============================================================================

pub use primitives::{MAX_CUSTOM_GRANULARITIES, MENU_LENGTH};
