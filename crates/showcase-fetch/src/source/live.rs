use std::collections::HashSet;
use std::future::Future;

use futures::future::join_all;
use serde_json::{Map, Value};
use showcase_core::{AppConfig, ItemId, NormalizedItem, PlaceId};

use super::ItemDataSource;
use crate::client::JsonFetcher;
use crate::error::FetchError;
use crate::normalize::{first_data_row, merge_votes, normalize_item};
use crate::thumbnails::{ThumbnailBatcher, ThumbnailMap};

/// Icon used when the thumbnail service has nothing for an item.
#[must_use]
pub fn fallback_icon_url(place: &PlaceId) -> String {
    format!("https://www.roblox.com/asset-thumbnail/image?assetId={place}&width=768&height=432")
}

/// Per-item calls against the live games API, with icons from the
/// thumbnail service.
#[derive(Debug, Clone)]
pub struct LiveSource {
    fetcher: JsonFetcher,
    thumbnails: ThumbnailBatcher,
    games_api_base: String,
    fetch_votes: bool,
    fallback_icons: bool,
}

impl LiveSource {
    /// Votes and fallback icons are enabled by default.
    #[must_use]
    pub fn new(
        fetcher: JsonFetcher,
        thumbnails: ThumbnailBatcher,
        games_api_base: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            thumbnails,
            games_api_base: games_api_base.into().trim_end_matches('/').to_owned(),
            fetch_votes: true,
            fallback_icons: true,
        }
    }

    #[must_use]
    pub fn from_config(fetcher: JsonFetcher, config: &AppConfig) -> Self {
        let thumbnails = ThumbnailBatcher::from_config(fetcher.clone(), config);
        Self::new(fetcher, thumbnails, config.games_api_base.clone())
            .with_votes(config.fetch_votes)
            .with_fallback_icons(config.fallback_icons)
    }

    #[must_use]
    pub fn with_votes(mut self, enabled: bool) -> Self {
        self.fetch_votes = enabled;
        self
    }

    #[must_use]
    pub fn with_fallback_icons(mut self, enabled: bool) -> Self {
        self.fallback_icons = enabled;
        self
    }

    fn core_url(&self, id: &ItemId) -> String {
        format!("{}/v1/games?universeIds={id}", self.games_api_base)
    }

    fn votes_url(&self, id: &ItemId) -> String {
        format!("{}/v1/games/votes?universeIds={id}", self.games_api_base)
    }

    /// Fetches core stats and votes for one item and normalizes the merged
    /// record. `None` means the item is dropped from the pass.
    async fn fetch_item(&self, id: &ItemId) -> Option<NormalizedItem> {
        let core_url = self.core_url(id);
        let (core, votes) = tokio::join!(self.fetch_row(&core_url), self.fetch_vote_row(id));

        let mut record = match core {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!(item_id = %id, "stats response had no data; dropping item");
                return None;
            }
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "stats fetch failed; dropping item");
                return None;
            }
        };
        if let Some(votes) = votes {
            merge_votes(&mut record, &votes);
        }

        match normalize_item(&Value::Object(record)) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "invalid stats record; dropping item");
                None
            }
        }
    }

    /// Vote row for `id`, or `None` when disabled or unavailable.
    async fn fetch_vote_row(&self, id: &ItemId) -> Option<Map<String, Value>> {
        if !self.fetch_votes {
            return None;
        }
        match self.fetch_row(&self.votes_url(id)).await {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(
                    item_id = %id,
                    error = %e,
                    "vote fetch failed; keeping item without votes"
                );
                None
            }
        }
    }

    async fn fetch_row(&self, url: &str) -> Result<Option<Map<String, Value>>, FetchError> {
        let body = self.fetcher.fetch_json(url).await?;
        Ok(first_data_row(&body))
    }

    fn apply_icon(&self, item: &mut NormalizedItem, icons: &ThumbnailMap) {
        if let Some(url) = icons.get(&item.id) {
            item.icon.clone_from(url);
        } else if self.fallback_icons {
            item.icon = fallback_icon_url(&item.root_place_id);
        } else {
            item.icon.clear();
        }
    }
}

impl ItemDataSource for LiveSource {
    /// Never fails: items whose stats cannot be fetched are left out.
    fn fetch_all(
        &self,
        ids: &[ItemId],
    ) -> impl Future<Output = Result<Vec<NormalizedItem>, FetchError>> + Send {
        async move {
            let mut seen = HashSet::with_capacity(ids.len());
            let unique: Vec<ItemId> = ids.iter().filter(|id| seen.insert(*id)).cloned().collect();
            if unique.is_empty() {
                tracing::warn!("no item ids configured; live pass has nothing to fetch");
                return Ok(Vec::new());
            }

            let (icons, fetched) = tokio::join!(
                self.thumbnails.resolve(&unique),
                join_all(unique.iter().map(|id| self.fetch_item(id))),
            );

            let mut items: Vec<NormalizedItem> = fetched.into_iter().flatten().collect();
            for item in &mut items {
                self.apply_icon(item, &icons);
            }
            tracing::debug!(
                requested = unique.len(),
                fetched = items.len(),
                dropped = unique.len() - items.len(),
                "live pass complete"
            );
            Ok(items)
        }
    }
}
