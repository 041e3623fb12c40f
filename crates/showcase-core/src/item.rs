//! The normalized item record consumed by every presentation surface.

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, PlaceId};

/// Name used when the source omits one or sends a blank string.
pub const DEFAULT_ITEM_NAME: &str = "Untitled";

/// A single game with its stats coerced into well-formed values.
///
/// `playing`, `visits` and the vote counts are never negative; `like_ratio`
/// is always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub id: ItemId,
    pub root_place_id: PlaceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub playing: u64,
    pub visits: u64,
    #[serde(default)]
    pub up_votes: u64,
    #[serde(default)]
    pub down_votes: u64,
    pub like_ratio: u8,
    #[serde(default)]
    pub icon: String,
}

/// Percentage of up votes among all votes, rounded to the nearest integer.
///
/// Returns `0` when no votes were cast.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn like_ratio(up_votes: u64, down_votes: u64) -> u8 {
    if up_votes == 0 && down_votes == 0 {
        return 0;
    }
    // Summed as f64 so counts near u64::MAX keep their proportion.
    let (up, down) = (up_votes as f64, down_votes as f64);
    (up / (up + down) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Case-insensitive search over `name` and `description`.
///
/// A blank term matches everything. Relative order is preserved.
#[must_use]
pub fn filter_items<'a>(items: &'a [NormalizedItem], term: &str) -> Vec<&'a NormalizedItem> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}
