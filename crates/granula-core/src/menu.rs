//! # Granularity Menus
//!
//! Ordered, length-bounded lists of buckets offered for user selection.
//!
//! - Without an anchor, a kind's precomputed default menu is returned.
//! - With an anchor, a window is cut from the kind's anchored universe just
//!   above the anchor, and the anchor itself is put in front of it.

use crate::bucket::Bucket;
use crate::checkpoint::CheckpointMode;
use crate::primitives::MENU_LENGTH;
use crate::profile::KindProfile;
use crate::search::{find_exact_index, find_first_bigger_index};
use crate::types::{ContinuousKind, GranularityError};
use crate::validation::ensure_kind;
use serde::Serialize;

/// An ascending list of at most `MENU_LENGTH` distinct buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GranularityMenu {
    entries: Vec<Bucket>,
}

impl GranularityMenu {
    #[must_use]
    pub fn as_slice(&self) -> &[Bucket] {
        &self.entries
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Bucket> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a GranularityMenu {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the granularity menu for a kind.
///
/// `coarse` only affects the unanchored menu, and only for kinds that have
/// a coarse menu.
pub fn generate_granularity_menu(
    kind: ContinuousKind,
    anchor: Option<&Bucket>,
    coarse: bool,
) -> Result<GranularityMenu, GranularityError> {
    let profile = KindProfile::for_kind(kind);

    let Some(anchor) = anchor else {
        let entries = profile.default_menu(CheckpointMode::from_coarse(coarse)).to_vec();
        return Ok(GranularityMenu { entries });
    };

    ensure_kind(kind, anchor, "anchor")?;
    let universe = profile.anchored_universe(anchor)?;
    Ok(anchored_window(&universe, anchor))
}

/// Cut the menu window for `anchor` out of an ascending universe.
///
/// Takes up to `MENU_LENGTH` entries starting at the first one bigger than
/// the anchor. Unless the anchor's size is already in the window, the anchor
/// is put in front and the window's last entry dropped. A universe with
/// fewer entries above the anchor yields a shorter menu.
fn anchored_window(universe: &[Bucket], anchor: &Bucket) -> GranularityMenu {
    let anchor_size = anchor.canonical_size();

    let window: Vec<Bucket> = match find_first_bigger_index(universe, anchor_size) {
        Some(start) => universe[start..].iter().take(MENU_LENGTH).copied().collect(),
        None => Vec::new(),
    };

    if find_exact_index(&window, anchor_size).is_some() {
        return GranularityMenu { entries: window };
    }

    let keep = window.len().saturating_sub(1);
    let entries = std::iter::once(*anchor)
        .chain(window.into_iter().take(keep))
        .collect();
    GranularityMenu { entries }
}

// =============================================================================
// TESTS
// =============================================================================
