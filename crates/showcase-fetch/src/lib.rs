//! Resilient acquisition of game stats for the showcase.
//!
//! [`JsonFetcher`] issues GETs (optionally through a forwarding prefix) with
//! bounded retry, [`ThumbnailBatcher`] resolves icons in concurrent chunks,
//! and the [`ItemDataSource`] strategies feed an [`Aggregator`] that ranks
//! items and computes totals.

pub mod aggregator;
pub mod client;
pub mod error;
pub mod normalize;
pub mod retry;
pub mod source;
pub mod thumbnails;

pub use aggregator::Aggregator;
pub use client::{proxied_url, JsonFetcher};
pub use error::FetchError;
pub use normalize::normalize_item;
pub use retry::{Backoff, RetryPolicy};
pub use source::{DataSource, ItemDataSource, LiveSource, SnapshotSource};
pub use thumbnails::{ThumbnailBatcher, ThumbnailMap, DEFAULT_BATCH_SIZE};
