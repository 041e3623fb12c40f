//! Opaque external identifiers.
//!
//! Upstream APIs send identifiers as JSON numbers while configuration and the
//! snapshot document may carry them as strings. Both are canonicalised to
//! their trimmed string form so `123` and `"123"` compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a showcased game (a universe ID upstream).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Root place reference of a game, used for play links and fallback icons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl ItemId {
    /// Parses a raw key, returning `None` when it is blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PlaceId {
    /// Parses a raw place reference, returning `None` when it is blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for PlaceId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a comma-separated identifier list, skipping blank entries.
///
/// Order is preserved and duplicates are kept; deduplication is the
/// caller's concern.
#[must_use]
pub fn parse_id_list(raw: &str) -> Vec<ItemId> {
    raw.split(',').filter_map(ItemId::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(ItemId::parse("  42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(ItemId::parse("   ").is_none());
        assert!(PlaceId::parse("").is_none());
    }

    #[test]
    fn numeric_and_string_forms_compare_equal() {
        assert_eq!(ItemId::from(123), ItemId::parse("123").unwrap());
    }

    #[test]
    fn parse_id_list_skips_blanks_and_keeps_order() {
        let ids = parse_id_list("3, 1,,2 ,");
        let raw: Vec<&str> = ids.iter().map(ItemId::as_str).collect();
        assert_eq!(raw, vec!["3", "1", "2"]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemId::from(7)).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
