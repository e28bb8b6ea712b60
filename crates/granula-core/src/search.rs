//! # Bucket Searches
//!
//! Comparator searches over bucket lists, keyed on canonical size.
//! None of these rely on the input being sorted.

use crate::bucket::Bucket;

/// Index of the first bucket whose size equals `size`.
#[must_use]
pub fn find_exact_index(buckets: &[Bucket], size: f64) -> Option<usize> {
    buckets.iter().position(|b| b.canonical_size() == size)
}

/// Index of the first bucket strictly bigger than `size`.
#[must_use]
pub fn find_first_bigger_index(buckets: &[Bucket], size: f64) -> Option<usize> {
    buckets.iter().position(|b| b.canonical_size() > size)
}

/// The smallest bucket.
#[must_use]
pub fn find_smallest(buckets: &[Bucket]) -> Option<Bucket> {
    buckets
        .iter()
        .copied()
        .min_by(|a, b| a.canonical_size().total_cmp(&b.canonical_size()))
}

/// The biggest bucket.
#[must_use]
pub fn find_biggest(buckets: &[Bucket]) -> Option<Bucket> {
    buckets
        .iter()
        .copied()
        .max_by(|a, b| a.canonical_size().total_cmp(&b.canonical_size()))
}

/// Best stand-in for `ideal` within `buckets`.
///
/// An exact size match wins; otherwise the smallest bucket at least as big
/// as the ideal; otherwise the biggest bucket available.
#[must_use]
pub fn find_best_match(buckets: &[Bucket], ideal: f64) -> Option<Bucket> {
    if let Some(index) = find_exact_index(buckets, ideal) {
        return Some(buckets[index]);
    }
    let bigger: Vec<Bucket> = buckets
        .iter()
        .copied()
        .filter(|b| b.canonical_size() >= ideal)
        .collect();
    find_smallest(&bigger).or_else(|| find_biggest(buckets))
}

/// Among buckets no smaller than `minimum`, the one closest to `ideal`.
///
/// Ties go to the smaller bucket. `None` when every bucket is below `minimum`.
#[must_use]
pub fn find_bigger_closest_to_ideal(
    buckets: &[Bucket],
    minimum: f64,
    ideal: f64,
) -> Option<Bucket> {
    let mut best: Option<(Bucket, f64)> = None;
    for bucket in buckets {
        let size = bucket.canonical_size();
        if size < minimum {
            continue;
        }
        let distance = (size - ideal).abs();
        let closer = match best {
            None => true,
            Some((current, current_distance)) => {
                distance < current_distance
                    || (distance == current_distance && size < current.canonical_size())
            }
        };
        if closer {
            best = Some((*bucket, distance));
        }
    }
    best.map(|(bucket, _)| bucket)
}

// =============================================================================
// TESTS
// =============================================================================
