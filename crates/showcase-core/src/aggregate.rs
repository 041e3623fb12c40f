//! Ranked item list plus totals produced by one aggregation pass.

use std::collections::HashSet;

use serde::Serialize;

use crate::item::NormalizedItem;

/// Number of items shown by the featured carousel.
pub const FEATURED_COUNT: usize = 5;

/// Result of one aggregation pass.
///
/// Items are unique by id and sorted by `playing` descending; ties keep the
/// order in which the source produced them. Totals always cover the full set,
/// so slicing with [`AggregateResult::top`] never changes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    items: Vec<NormalizedItem>,
    total_playing: u64,
    total_visits: u64,
    item_count: usize,
}

impl AggregateResult {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Deduplicates `items` by id (first occurrence wins), ranks them, and
    /// computes totals.
    #[must_use]
    pub fn from_items(mut items: Vec<NormalizedItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        items.retain(|item| seen.insert(item.id.clone()));

        // `sort_by` is stable.
        items.sort_by(|a, b| b.playing.cmp(&a.playing));

        let total_playing = items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.playing));
        let total_visits = items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.visits));
        let item_count = items.len();

        Self {
            items,
            total_playing,
            total_visits,
            item_count,
        }
    }

    /// Full ranked list, for the grid.
    #[must_use]
    pub fn items(&self) -> &[NormalizedItem] {
        &self.items
    }

    /// The first `n` ranked items.
    #[must_use]
    pub fn top(&self, n: usize) -> &[NormalizedItem] {
        &self.items[..n.min(self.items.len())]
    }

    /// Top [`FEATURED_COUNT`] items, for the carousel.
    #[must_use]
    pub fn featured(&self) -> &[NormalizedItem] {
        self.top(FEATURED_COUNT)
    }

    #[must_use]
    pub fn total_playing(&self) -> u64 {
        self.total_playing
    }

    #[must_use]
    pub fn total_visits(&self) -> u64 {
        self.total_visits
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<NormalizedItem> {
        self.items
    }
}
