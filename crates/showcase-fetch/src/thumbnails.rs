//! Chunked, concurrent thumbnail resolution.

use std::collections::HashMap;

use futures::future::join_all;
use reqwest::Url;
use serde_json::Value;
use showcase_core::{AppConfig, ItemId};

use crate::client::JsonFetcher;
use crate::error::FetchError;
use crate::normalize::key_from_value;

/// Upstream limit on identifiers per thumbnail request.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Resolved icons. Identifiers with no usable thumbnail are simply absent.
pub type ThumbnailMap = HashMap<ItemId, String>;

const THUMBNAIL_PATH: &str = "/v1/games/multiget/thumbnails";

#[derive(Debug, Clone)]
pub struct ThumbnailBatcher {
    fetcher: JsonFetcher,
    base_url: String,
    batch_size: usize,
}

impl ThumbnailBatcher {
    #[must_use]
    pub fn new(fetcher: JsonFetcher, base_url: impl Into<String>, batch_size: usize) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            batch_size: batch_size.max(1),
        }
    }

    #[must_use]
    pub fn from_config(fetcher: JsonFetcher, config: &AppConfig) -> Self {
        Self::new(
            fetcher,
            config.thumbnails_api_base.clone(),
            config.thumbnail_batch_size,
        )
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Resolves icons for `ids`, one request per chunk of at most
    /// `batch_size` identifiers, all chunks in flight at once.
    ///
    /// A failed chunk is logged and contributes nothing; the other chunks are
    /// unaffected. Each chunk fills its own map and the maps are merged only
    /// after every chunk has settled, keeping the first URL seen for an id.
    pub async fn resolve(&self, ids: &[ItemId]) -> ThumbnailMap {
        if ids.is_empty() {
            return ThumbnailMap::new();
        }

        let chunks = ids.chunks(self.batch_size);
        let chunk_count = chunks.len();
        let settled = join_all(chunks.enumerate().map(|(index, chunk)| async move {
            match self.resolve_chunk(chunk).await {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        chunk = index,
                        chunk_count,
                        chunk_len = chunk.len(),
                        error = %e,
                        "thumbnail chunk failed; its items keep no icon"
                    );
                    ThumbnailMap::new()
                }
            }
        }))
        .await;

        let mut merged = ThumbnailMap::with_capacity(ids.len());
        for map in settled {
            for (id, url) in map {
                merged.entry(id).or_insert(url);
            }
        }
        tracing::debug!(
            requested = ids.len(),
            resolved = merged.len(),
            chunk_count,
            "thumbnails resolved"
        );
        merged
    }

    async fn resolve_chunk(&self, chunk: &[ItemId]) -> Result<ThumbnailMap, FetchError> {
        let url = self.chunk_url(chunk)?;
        let body = self.fetcher.fetch_json(&url).await?;
        Ok(parse_thumbnail_rows(&body))
    }

    /// Request URL for one chunk of identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the configured base URL is invalid.
    pub fn chunk_url(&self, chunk: &[ItemId]) -> Result<String, FetchError> {
        let raw = format!("{}{THUMBNAIL_PATH}", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        let joined = chunk
            .iter()
            .map(ItemId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        url.query_pairs_mut()
            .append_pair("size", "768x432")
            .append_pair("format", "Png")
            .append_pair("isCircular", "false")
            .append_pair("universeIds", &joined);
        Ok(url.into())
    }
}

/// Extracts `universeId → thumbnails[0].imageUrl` pairs from a response body.
///
/// Rows without an id, without thumbnails, or with a blank first URL are
/// skipped rather than mapped to a placeholder.
fn parse_thumbnail_rows(body: &Value) -> ThumbnailMap {
    let Some(rows) = body.get("data").and_then(Value::as_array) else {
        return ThumbnailMap::new();
    };

    rows.iter()
        .filter_map(|row| {
            let id = key_from_value(row.get("universeId")).and_then(|raw| ItemId::parse(&raw))?;
            let url = row
                .get("thumbnails")?
                .as_array()?
                .first()?
                .get("imageUrl")?
                .as_str()
                .filter(|u| !u.trim().is_empty())?;
            Some((id, url.to_owned()))
        })
        .collect()
}
