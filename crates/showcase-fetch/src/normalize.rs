//! Conversion of untyped stats records into [`NormalizedItem`]s.
//!
//! Upstream payloads are loosely typed: counts arrive as numbers, numeric
//! strings, `null`, or not at all, and identifiers may be numbers or strings.
//! Everything here is total except the identifier checks, which reject a
//! record with [`FetchError::Validation`].

use serde_json::{Map, Value};
use showcase_core::{like_ratio, ItemId, NormalizedItem, PlaceId, DEFAULT_ITEM_NAME};

use crate::error::FetchError;

/// Normalizes one stats record (live `data[0]` or a snapshot `games[]` entry).
///
/// `likeRatio` is used as-is when it is a JSON number; otherwise it is derived
/// from `upVotes`/`downVotes`.
///
/// # Errors
///
/// Returns [`FetchError::Validation`] when `id` or `rootPlaceId` is missing
/// or blank.
pub fn normalize_item(record: &Value) -> Result<NormalizedItem, FetchError> {
    let id = key_from_value(record.get("id"))
        .and_then(|raw| ItemId::parse(&raw))
        .ok_or_else(|| FetchError::Validation {
            reason: "record has no id".to_owned(),
        })?;

    let root_place_id = key_from_value(record.get("rootPlaceId"))
        .and_then(|raw| PlaceId::parse(&raw))
        .ok_or_else(|| FetchError::Validation {
            reason: format!("item {id} has no rootPlaceId"),
        })?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_ITEM_NAME)
        .to_owned();

    let up_votes = coerce_count(record.get("upVotes"));
    let down_votes = coerce_count(record.get("downVotes"));
    let ratio = record
        .get("likeRatio")
        .and_then(explicit_ratio)
        .unwrap_or_else(|| like_ratio(up_votes, down_votes));

    Ok(NormalizedItem {
        id,
        root_place_id,
        name,
        description: string_or_empty(record.get("description")),
        playing: coerce_count(record.get("playing")),
        visits: coerce_count(record.get("visits")),
        up_votes,
        down_votes,
        like_ratio: ratio,
        icon: string_or_empty(record.get("icon")),
    })
}

/// Coerces a loosely typed count to a non-negative integer.
///
/// Fractions are truncated; negatives, non-finite values, unparseable strings,
/// `null`, and absent values all become `0`.
#[must_use]
pub fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(float_to_count))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(float_to_count))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

// `as` saturates at u64::MAX.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

/// A `likeRatio` supplied by the source, rounded and clamped to `0..=100`.
fn explicit_ratio(value: &Value) -> Option<u8> {
    let f = value.as_f64().filter(|f| f.is_finite())?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ratio = f.round().clamp(0.0, 100.0) as u8;
    Some(ratio)
}

/// Reads an identifier that may be a JSON number or string.
pub(crate) fn key_from_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) => Some(s.trim().to_owned()),
        _ => None,
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// The first row of a `{ "data": [...] }` envelope, if it is an object.
pub(crate) fn first_data_row(body: &Value) -> Option<Map<String, Value>> {
    body.get("data")?
        .as_array()?
        .first()?
        .as_object()
        .cloned()
}

/// Copies `upVotes`/`downVotes` from a votes row into a core stats record.
pub(crate) fn merge_votes(record: &mut Map<String, Value>, votes: &Map<String, Value>) {
    for key in ["upVotes", "downVotes"] {
        if let Some(v) = votes.get(key) {
            record.insert(key.to_owned(), v.clone());
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
