use std::collections::HashSet;
use std::future::Future;

use serde_json::Value;
use showcase_core::{AppConfig, ItemId, NormalizedItem};

use super::ItemDataSource;
use crate::client::JsonFetcher;
use crate::error::FetchError;
use crate::normalize::normalize_item;
use crate::retry::RetryPolicy;

/// One pre-aggregated `{ "games": [...] }` document, fetched with retry.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    fetcher: JsonFetcher,
    url: String,
    retry: RetryPolicy,
}

impl SnapshotSource {
    /// Snapshot at `url`, retried up to 3 times with 250 ms linear back-off.
    #[must_use]
    pub fn new(fetcher: JsonFetcher, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            retry: RetryPolicy::linear(3, 250),
        }
    }

    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] when no snapshot URL is configured.
    pub fn from_config(fetcher: JsonFetcher, config: &AppConfig) -> Result<Self, FetchError> {
        let url = config
            .snapshot_url
            .clone()
            .ok_or_else(|| FetchError::InvalidUrl {
                url: String::new(),
                reason: "snapshot source selected without a snapshot URL".to_owned(),
            })?;
        Ok(Self::new(fetcher, url).with_retry(RetryPolicy::linear(
            config.snapshot_max_attempts,
            config.snapshot_backoff_ms,
        )))
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ItemDataSource for SnapshotSource {
    /// Fetches the document and keeps the normalized `games` entries listed
    /// in `ids`. An empty id list yields no items and makes no request.
    fn fetch_all(
        &self,
        ids: &[ItemId],
    ) -> impl Future<Output = Result<Vec<NormalizedItem>, FetchError>> + Send {
        async move {
            if ids.is_empty() {
                tracing::warn!("no item ids configured; snapshot pass has nothing to load");
                return Ok(Vec::new());
            }
            let body = self
                .fetcher
                .fetch_json_with_retry(&self.url, &self.retry)
                .await?;
            let items = parse_snapshot(&body, ids)?;
            tracing::debug!(url = %self.url, items = items.len(), "snapshot loaded");
            Ok(items)
        }
    }
}

fn parse_snapshot(body: &Value, ids: &[ItemId]) -> Result<Vec<NormalizedItem>, FetchError> {
    let entries = body
        .get("games")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Validation {
            reason: "snapshot document has no `games` array".to_owned(),
        })?;

    let wanted: HashSet<&ItemId> = ids.iter().collect();
    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match normalize_item(entry) {
            Ok(item) if wanted.contains(&item.id) => items.push(item),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(entry = index, error = %e, "skipping invalid snapshot entry");
            }
        }
    }
    Ok(items)
}
