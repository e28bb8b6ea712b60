//! # Checkpoint Tables
//!
//! A checkpoint pairs a range-length threshold with the bucket to use once a
//! range (or an anchor) exceeds it. Tables are scanned largest threshold
//! first; the first checkpoint that fires wins.

use crate::bucket::Bucket;
use crate::types::ContinuousKind;
use serde::{Deserialize, Serialize};

/// Which of the two tables of a kind to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointMode {
    /// Denser buckets.
    #[default]
    Fine,
    /// Sparser buckets.
    Coarse,
}

impl CheckpointMode {
    #[must_use]
    pub const fn from_coarse(coarse: bool) -> Self {
        if coarse {
            CheckpointMode::Coarse
        } else {
            CheckpointMode::Fine
        }
    }
}

/// A `(threshold, candidate)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    /// Exclusive lower bound, in canonical units.
    pub threshold: f64,
    /// The bucket proposed once the threshold is exceeded.
    pub candidate: Bucket,
}

impl Checkpoint {
    #[must_use]
    pub const fn new(threshold: f64, candidate: Bucket) -> Self {
        Self {
            threshold,
            candidate,
        }
    }

    /// Whether this checkpoint fires for the given range length or anchor size.
    #[must_use]
    pub fn fires(&self, range_length: f64, anchor_size: Option<f64>) -> bool {
        range_length > self.threshold || anchor_size.is_some_and(|size| size > self.threshold)
    }
}

/// An ordered checkpoint table for one `(kind, mode)` combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointTable {
    kind: ContinuousKind,
    mode: CheckpointMode,
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointTable {
    pub(crate) fn new(
        kind: ContinuousKind,
        mode: CheckpointMode,
        checkpoints: Vec<Checkpoint>,
    ) -> Self {
        Self {
            kind,
            mode,
            checkpoints,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ContinuousKind {
        self.kind
    }

    #[must_use]
    pub const fn mode(&self) -> CheckpointMode {
        self.mode
    }

    /// Checkpoints in scan order (descending threshold).
    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// The first checkpoint that fires, scanning from the largest threshold.
    #[must_use]
    pub fn first_firing(&self, range_length: f64, anchor_size: Option<f64>) -> Option<&Checkpoint> {
        self.checkpoints
            .iter()
            .find(|checkpoint| checkpoint.fires(range_length, anchor_size))
    }

    /// Candidates ordered smallest first.
    #[must_use]
    pub fn candidates_ascending(&self) -> Vec<Bucket> {
        self.checkpoints.iter().rev().map(|c| c.candidate).collect()
    }

    /// Whether thresholds are strictly descending.
    #[must_use]
    pub fn is_strictly_descending(&self) -> bool {
        self.checkpoints
            .windows(2)
            .all(|pair| pair[0].threshold > pair[1].threshold)
    }
}

// =============================================================================
// TESTS
// =============================================================================
